use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const VOTE_VALUES: [&str; 2] = ["agree", "disagree"];

/// A recorded vote. Append-only: there is no update or delete surface.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: i64,
    /// String form of the voting suggestion id, as received on the wire.
    pub suggestion_id: String,
    /// Normalized numeric form, backfilled in the write path when
    /// suggestion_id parses as an id.
    pub voting_suggestion_id: Option<i64>,
    pub feedback_id: Option<i64>,
    pub vote: String,
    pub voter_fingerprint: String,
    pub ip_address: String,
    pub user_agent: String,
    pub voted_at: DateTime<Utc>,
}

/// Input for recording a vote.
#[derive(Debug, Clone)]
pub struct NewVote {
    pub suggestion_id: String,
    pub feedback_id: Option<i64>,
    pub vote: String,
    pub voter_fingerprint: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Live tally for one suggestion.
#[derive(Debug, Clone, Copy, Default, Serialize, sqlx::FromRow)]
pub struct VoteCounts {
    pub agree: i64,
    pub disagree: i64,
    pub total: i64,
}

/// Global voting statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VotingStats {
    pub total_votes: i64,
    pub agree_votes: i64,
    pub disagree_votes: i64,
    pub unique_voters: i64,
}

/// Recent-activity subset for the statistics overview.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentVote {
    pub vote: String,
    pub voted_at: DateTime<Utc>,
    pub suggestion_id: String,
}

/// Whether a fingerprint has voted on a suggestion, and how.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCheck {
    pub has_voted: bool,
    pub vote: Option<String>,
}

/// Body for POST /api/voting/suggestions/{id}/vote.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote: Option<String>,
}
