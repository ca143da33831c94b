use sqlx::PgPool;

use super::types::*;
use crate::errors::AppError;

/// Record a vote. The unique (suggestion_id, voter_fingerprint) constraint
/// is the authoritative double-vote guard: a concurrent duplicate insert
/// surfaces as a unique violation here and is translated to DuplicateVote,
/// never to a generic server error.
pub async fn insert(pool: &PgPool, new: &NewVote) -> Result<Vote, AppError> {
    // Normalization kept from the legacy single-suggestion-type model: when
    // the wire id parses as a numeric id, store the typed back-reference too.
    let voting_suggestion_id: Option<i64> = new.suggestion_id.parse().ok();

    let result = sqlx::query_as::<_, Vote>(
        "INSERT INTO votes \
         (suggestion_id, voting_suggestion_id, feedback_id, vote, \
          voter_fingerprint, ip_address, user_agent) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, suggestion_id, voting_suggestion_id, feedback_id, vote, \
                   voter_fingerprint, ip_address, user_agent, voted_at",
    )
    .bind(&new.suggestion_id)
    .bind(voting_suggestion_id)
    .bind(new.feedback_id)
    .bind(&new.vote)
    .bind(&new.voter_fingerprint)
    .bind(&new.ip_address)
    .bind(&new.user_agent)
    .fetch_one(pool)
    .await;

    match result {
        Ok(vote) => Ok(vote),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::DuplicateVote),
        Err(e) => Err(AppError::Db(e)),
    }
}

/// Find the vote a fingerprint has already cast on a suggestion, if any.
pub async fn find_existing(
    pool: &PgPool,
    suggestion_id: &str,
    voter_fingerprint: &str,
) -> Result<Option<Vote>, AppError> {
    let row = sqlx::query_as(
        "SELECT id, suggestion_id, voting_suggestion_id, feedback_id, vote, \
                voter_fingerprint, ip_address, user_agent, voted_at \
         FROM votes WHERE suggestion_id = $1 AND voter_fingerprint = $2",
    )
    .bind(suggestion_id)
    .bind(voter_fingerprint)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Live tally for one suggestion.
pub async fn counts_for(pool: &PgPool, suggestion_id: &str) -> Result<VoteCounts, AppError> {
    let counts = sqlx::query_as(
        "SELECT COUNT(*) FILTER (WHERE vote = 'agree') AS agree, \
                COUNT(*) FILTER (WHERE vote = 'disagree') AS disagree, \
                COUNT(*) AS total \
         FROM votes WHERE suggestion_id = $1",
    )
    .bind(suggestion_id)
    .fetch_one(pool)
    .await?;
    Ok(counts)
}

/// Global totals plus the distinct voter count.
pub async fn stats(pool: &PgPool) -> Result<VotingStats, AppError> {
    let stats = sqlx::query_as(
        "SELECT COUNT(*) AS total_votes, \
                COUNT(*) FILTER (WHERE vote = 'agree') AS agree_votes, \
                COUNT(*) FILTER (WHERE vote = 'disagree') AS disagree_votes, \
                COUNT(DISTINCT voter_fingerprint) AS unique_voters \
         FROM votes",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// Most recent votes, reduced to the statistics display subset.
pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentVote>, AppError> {
    let rows = sqlx::query_as(
        "SELECT vote, voted_at, suggestion_id FROM votes \
         ORDER BY voted_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
