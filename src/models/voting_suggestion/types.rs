use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUSES: [&str; 3] = ["draft", "active", "closed"];

/// Curated suggestion eligible for public voting once active.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VotingSuggestion {
    pub id: i64,
    pub title: String,
    pub issue_description: String,
    pub suggested_improvement: String,
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub original_feedback_id: Option<i64>,
    pub status: String,
    pub priority: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Originating feedback block resolved at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalFeedbackSummary {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Listing shape: the suggestion plus its originating feedback, when the
/// back-reference still resolves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingSuggestionWithSource {
    #[serde(flatten)]
    pub suggestion: VotingSuggestion,
    pub original_feedback: Option<OriginalFeedbackSummary>,
}

/// Validated input for a new voting suggestion. Status always starts at
/// draft; created_by is set by the caller, never by the request body.
#[derive(Debug, Clone)]
pub struct NewVotingSuggestion {
    pub title: String,
    pub issue_description: String,
    pub suggested_improvement: String,
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub original_feedback_id: Option<i64>,
    pub priority: String,
    pub created_by: String,
}

/// Body for POST /api/admin/feedback/{id}/promote.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteRequest {
    pub suggestion_number: Option<i32>,
    pub title: Option<String>,
    pub edited_issue_description: Option<String>,
    pub edited_suggested_improvement: Option<String>,
    pub priority: Option<String>,
}

/// Body for POST /api/admin/suggestions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuggestionRequest {
    pub title: Option<String>,
    pub issue_description: Option<String>,
    pub suggested_improvement: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub original_feedback_id: Option<i64>,
    pub priority: Option<String>,
}

/// Body for PUT /api/admin/suggestions/{id}. `originalFeedbackId` and
/// `createdBy` are deliberately absent: provenance fields cannot be changed
/// through this route, so any such keys in the payload are dropped on
/// deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSuggestionRequest {
    pub title: Option<String>,
    pub issue_description: Option<String>,
    pub suggested_improvement: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}
