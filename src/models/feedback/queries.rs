use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::types::*;
use crate::errors::AppError;

const FEEDBACK_COLUMNS: &str = "id, name, email, status, priority, submitted_at, \
     ip_address, user_agent, created_at, updated_at";

/// Insert a feedback document with its suggestion list in one transaction.
/// Returns the new id and submission timestamp.
pub async fn create(pool: &PgPool, new: &NewFeedback) -> Result<(i64, DateTime<Utc>), AppError> {
    let mut tx = pool.begin().await?;

    let (id, submitted_at): (i64, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO feedback (name, email, ip_address, user_agent) \
         VALUES ($1, $2, $3, $4) RETURNING id, submitted_at",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.ip_address)
    .bind(&new.user_agent)
    .fetch_one(&mut *tx)
    .await?;

    for s in &new.suggestions {
        sqlx::query(
            "INSERT INTO feedback_suggestions \
             (feedback_id, suggestion_number, issue_description, suggested_improvement) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(s.suggestion_number)
        .bind(&s.issue_description)
        .bind(&s.suggested_improvement)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok((id, submitted_at))
}

/// All feedback, newest first, with embedded suggestions.
pub async fn find_all(pool: &PgPool) -> Result<Vec<FeedbackDetail>, AppError> {
    let rows: Vec<FeedbackRow> = sqlx::query_as(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY submitted_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    attach_suggestions(pool, rows).await
}

/// One page of feedback sorted by submitted_at descending, optionally
/// filtered by status, plus pagination metadata.
pub async fn find_paginated(
    pool: &PgPool,
    status: Option<&str>,
    page: i64,
    limit: i64,
) -> Result<FeedbackPage, AppError> {
    let offset = (page - 1) * limit;

    let (total, rows): (i64, Vec<FeedbackRow>) = match status {
        Some(status) => {
            let total = sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;
            let rows = sqlx::query_as(&format!(
                "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE status = $1 \
                 ORDER BY submitted_at DESC, id DESC LIMIT $2 OFFSET $3"
            ))
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
            (total, rows)
        }
        None => {
            let total = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
                .fetch_one(pool)
                .await?;
            let rows = sqlx::query_as(&format!(
                "SELECT {FEEDBACK_COLUMNS} FROM feedback \
                 ORDER BY submitted_at DESC, id DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
            (total, rows)
        }
    };

    let items = attach_suggestions(pool, rows).await?;
    Ok(FeedbackPage {
        items,
        page,
        limit,
        total,
        pages: (total + limit - 1) / limit,
    })
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<FeedbackDetail>, AppError> {
    let row: Option<FeedbackRow> = sqlx::query_as(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(attach_suggestions(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Update a feedback document's status. Returns the updated document, or
/// None if the id does not resolve.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: &str,
) -> Result<Option<FeedbackDetail>, AppError> {
    let row: Option<FeedbackRow> = sqlx::query_as(&format!(
        "UPDATE feedback SET status = $2, updated_at = now() \
         WHERE id = $1 RETURNING {FEEDBACK_COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(attach_suggestions(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Feedback counts grouped by status.
pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, AppError> {
    let counts = sqlx::query_as("SELECT status, COUNT(*) FROM feedback GROUP BY status")
        .fetch_all(pool)
        .await?;
    Ok(counts)
}

/// Most recent submissions, reduced to the statistics display subset.
pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentFeedback>, AppError> {
    let rows = sqlx::query_as(
        "SELECT f.name, f.status, f.submitted_at, \
                (SELECT COUNT(*) FROM feedback_suggestions s WHERE s.feedback_id = f.id) \
                    AS suggestion_count \
         FROM feedback f ORDER BY f.submitted_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Bulk-delete every feedback document. Returns the deleted count.
pub async fn delete_all(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM feedback").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Load the suggestion lists for a batch of feedback rows and assemble the
/// full documents, preserving row order.
async fn attach_suggestions(
    pool: &PgPool,
    rows: Vec<FeedbackRow>,
) -> Result<Vec<FeedbackDetail>, AppError> {
    #[derive(sqlx::FromRow)]
    struct SuggestionRow {
        feedback_id: i64,
        suggestion_number: i32,
        issue_description: String,
        suggested_improvement: String,
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

    let suggestion_rows: Vec<SuggestionRow> = if ids.is_empty() {
        Vec::new()
    } else {
        sqlx::query_as(
            "SELECT feedback_id, suggestion_number, issue_description, suggested_improvement \
             FROM feedback_suggestions WHERE feedback_id = ANY($1) \
             ORDER BY feedback_id, suggestion_number",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?
    };

    let mut by_feedback: HashMap<i64, Vec<Suggestion>> = HashMap::new();
    for row in suggestion_rows {
        by_feedback
            .entry(row.feedback_id)
            .or_default()
            .push(Suggestion {
                suggestion_number: row.suggestion_number,
                issue_description: row.issue_description,
                suggested_improvement: row.suggested_improvement,
            });
    }

    Ok(rows
        .into_iter()
        .map(|row| FeedbackDetail {
            suggestions: by_feedback.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            email: row.email,
            status: row.status,
            priority: row.priority,
            submitted_at: row.submitted_at,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect())
}
