use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::validate::{is_valid_email, sanitize, validate_required};

pub const STATUSES: [&str; 5] = ["pending", "reviewed", "approved", "rejected", "implemented"];
pub const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

const MAX_SUGGESTIONS: usize = 4;

/// One issue/improvement pair inside a feedback submission. The number is
/// the 1-based position in the submitted list, assigned server-side.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub suggestion_number: i32,
    pub issue_description: String,
    pub suggested_improvement: String,
}

/// Full feedback document with its embedded suggestion list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDetail {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub status: String,
    pub priority: String,
    pub submitted_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feedback row before the suggestion list is attached.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRow {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub status: String,
    pub priority: String,
    pub submitted_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recent-activity subset for the statistics overview.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentFeedback {
    pub name: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub suggestion_count: i64,
}

/// One page of feedback plus pagination metadata.
#[derive(Debug, Clone)]
pub struct FeedbackPage {
    pub items: Vec<FeedbackDetail>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Inbound body for POST /api/feedback. Any client-supplied suggestion
/// numbering is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub suggestions: Option<Vec<SuggestionInput>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionInput {
    #[serde(default)]
    pub issue_description: Option<String>,
    #[serde(default)]
    pub suggested_improvement: Option<String>,
}

/// Body for PUT /api/admin/feedback/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// Validated, sanitized feedback ready for insertion.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub ip_address: String,
    pub user_agent: String,
}

impl NewFeedback {
    /// Sanitize and validate an inbound submission, re-numbering suggestions
    /// 1..N by array position.
    pub fn from_submission(
        body: FeedbackSubmission,
        ip_address: String,
        user_agent: String,
    ) -> Result<Self, AppError> {
        let name = body.name.as_deref().map(str::trim).unwrap_or("");
        let raw_suggestions = body.suggestions.unwrap_or_default();

        if name.is_empty() || raw_suggestions.is_empty() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }

        let name = sanitize(name);
        let email = body
            .email
            .as_deref()
            .map(|e| sanitize(e).to_lowercase())
            .filter(|e| !e.is_empty());

        if let Some(ref email) = email {
            if !is_valid_email(email) {
                return Err(AppError::InvalidEmail);
            }
            if email.len() > 150 {
                return Err(AppError::Validation(
                    "Email must be at most 150 characters".to_string(),
                ));
            }
        }

        if raw_suggestions.len() > MAX_SUGGESTIONS {
            return Err(AppError::TooManySuggestions);
        }

        if let Some(msg) = validate_required(&name, "Name", 100) {
            return Err(AppError::Validation(msg));
        }

        let suggestions: Vec<Suggestion> = raw_suggestions
            .into_iter()
            .enumerate()
            .map(|(i, s)| Suggestion {
                suggestion_number: (i + 1) as i32,
                issue_description: sanitize(s.issue_description.as_deref().unwrap_or("")),
                suggested_improvement: sanitize(s.suggested_improvement.as_deref().unwrap_or("")),
            })
            .collect();

        for s in &suggestions {
            if let Some(msg) = validate_required(&s.issue_description, "Issue description", 200) {
                return Err(AppError::Validation(msg));
            }
            if let Some(msg) =
                validate_required(&s.suggested_improvement, "Suggested improvement", 200)
            {
                return Err(AppError::Validation(msg));
            }
        }

        Ok(NewFeedback {
            name,
            email,
            suggestions,
            ip_address,
            user_agent,
        })
    }
}
