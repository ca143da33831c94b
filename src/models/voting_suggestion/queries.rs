use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::types::*;
use crate::errors::AppError;

const SUGGESTION_COLUMNS: &str = "id, title, issue_description, suggested_improvement, \
     submitter_name, submitter_email, original_feedback_id, status, priority, \
     created_by, created_at, updated_at";

pub async fn create(
    pool: &PgPool,
    new: &NewVotingSuggestion,
) -> Result<VotingSuggestion, AppError> {
    let row = sqlx::query_as(&format!(
        "INSERT INTO voting_suggestions \
         (title, issue_description, suggested_improvement, submitter_name, \
          submitter_email, original_feedback_id, priority, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {SUGGESTION_COLUMNS}"
    ))
    .bind(&new.title)
    .bind(&new.issue_description)
    .bind(&new.suggested_improvement)
    .bind(&new.submitter_name)
    .bind(&new.submitter_email)
    .bind(new.original_feedback_id)
    .bind(&new.priority)
    .bind(&new.created_by)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// All voting suggestions newest-first, optionally filtered by status, each
/// joined with its originating feedback's submitter block when the
/// back-reference still resolves.
pub async fn find_all(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<VotingSuggestionWithSource>, AppError> {
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        title: String,
        issue_description: String,
        suggested_improvement: String,
        submitter_name: String,
        submitter_email: Option<String>,
        original_feedback_id: Option<i64>,
        status: String,
        priority: String,
        created_by: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        feedback_name: Option<String>,
        feedback_email: Option<String>,
        feedback_submitted_at: Option<DateTime<Utc>>,
    }

    let base_sql = "SELECT vs.id, vs.title, vs.issue_description, vs.suggested_improvement, \
                           vs.submitter_name, vs.submitter_email, vs.original_feedback_id, \
                           vs.status, vs.priority, vs.created_by, vs.created_at, vs.updated_at, \
                           f.name AS feedback_name, f.email AS feedback_email, \
                           f.submitted_at AS feedback_submitted_at \
                    FROM voting_suggestions vs \
                    LEFT JOIN feedback f ON f.id = vs.original_feedback_id";

    let rows: Vec<Row> = match status {
        Some(status) => {
            sqlx::query_as(&format!(
                "{base_sql} WHERE vs.status = $1 ORDER BY vs.created_at DESC, vs.id DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!("{base_sql} ORDER BY vs.created_at DESC, vs.id DESC"))
                .fetch_all(pool)
                .await?
        }
    };

    let items = rows
        .into_iter()
        .map(|row| {
            let original_feedback = match (row.original_feedback_id, row.feedback_name) {
                (Some(id), Some(name)) => Some(OriginalFeedbackSummary {
                    id,
                    name,
                    email: row.feedback_email,
                    submitted_at: row.feedback_submitted_at.unwrap_or(row.created_at),
                }),
                _ => None,
            };
            VotingSuggestionWithSource {
                suggestion: VotingSuggestion {
                    id: row.id,
                    title: row.title,
                    issue_description: row.issue_description,
                    suggested_improvement: row.suggested_improvement,
                    submitter_name: row.submitter_name,
                    submitter_email: row.submitter_email,
                    original_feedback_id: row.original_feedback_id,
                    status: row.status,
                    priority: row.priority,
                    created_by: row.created_by,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                original_feedback,
            }
        })
        .collect();

    Ok(items)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<VotingSuggestion>, AppError> {
    let row = sqlx::query_as(&format!(
        "SELECT {SUGGESTION_COLUMNS} FROM voting_suggestions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Resolve an id only if the suggestion is currently active. Draft and
/// closed suggestions are invisible to the public surface.
pub async fn find_active_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<VotingSuggestion>, AppError> {
    let row = sqlx::query_as(&format!(
        "SELECT {SUGGESTION_COLUMNS} FROM voting_suggestions \
         WHERE id = $1 AND status = 'active'"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update. Provenance columns (original_feedback_id,
/// created_by) are not touched by this statement. Returns None if the id
/// does not resolve.
pub async fn update_partial(
    pool: &PgPool,
    id: i64,
    update: &UpdateSuggestionRequest,
) -> Result<Option<VotingSuggestion>, AppError> {
    let row = sqlx::query_as(&format!(
        "UPDATE voting_suggestions SET \
             title = COALESCE($2, title), \
             issue_description = COALESCE($3, issue_description), \
             suggested_improvement = COALESCE($4, suggested_improvement), \
             submitter_name = COALESCE($5, submitter_name), \
             submitter_email = COALESCE($6, submitter_email), \
             status = COALESCE($7, status), \
             priority = COALESCE($8, priority), \
             updated_at = now() \
         WHERE id = $1 RETURNING {SUGGESTION_COLUMNS}"
    ))
    .bind(id)
    .bind(update.title.as_deref().map(str::trim))
    .bind(update.issue_description.as_deref().map(str::trim))
    .bind(update.suggested_improvement.as_deref().map(str::trim))
    .bind(update.submitter_name.as_deref().map(str::trim))
    .bind(update.submitter_email.as_deref().map(str::trim))
    .bind(update.status.as_deref())
    .bind(update.priority.as_deref())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Hard delete. Returns the deleted id and title, or None if absent.
pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<(i64, String)>, AppError> {
    let row = sqlx::query_as("DELETE FROM voting_suggestions WHERE id = $1 RETURNING id, title")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Force a suggestion's status, regardless of its current state.
pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: &str,
) -> Result<Option<VotingSuggestion>, AppError> {
    let row = sqlx::query_as(&format!(
        "UPDATE voting_suggestions SET status = $2, updated_at = now() \
         WHERE id = $1 RETURNING {SUGGESTION_COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Suggestion counts grouped by status.
pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, AppError> {
    let counts = sqlx::query_as("SELECT status, COUNT(*) FROM voting_suggestions GROUP BY status")
        .fetch_all(pool)
        .await?;
    Ok(counts)
}
