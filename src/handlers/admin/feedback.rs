use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::admin::require_admin;
use crate::errors::AppError;
use crate::models::feedback::{self, STATUSES, StatusUpdate};
use crate::models::voting_suggestion::{self, NewVotingSuggestion, PromoteRequest};

/// GET /api/admin/feedback - paginated listing for curation
/// Query params: status (default all), page (default 1), limit (default 50)
pub async fn list(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<i64>().ok())
        .unwrap_or(50)
        .max(1)
        .min(100); // Cap at 100
    let status = query
        .get("status")
        .map(String::as_str)
        .filter(|s| !s.is_empty() && *s != "all");

    let result = feedback::find_paginated(&pool, status, page, limit).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Feedback retrieved successfully",
        "data": result.items,
        "pagination": {
            "current": result.page,
            "limit": result.limit,
            "total": result.total,
            "pages": result.pages,
        },
    })))
}

/// PUT /api/admin/feedback/{id}/status
pub async fn update_status(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let status = body.status.as_deref().unwrap_or("");
    if !STATUSES.contains(&status) {
        return Err(AppError::Validation("Invalid status value".to_string()));
    }

    let id = path.into_inner();
    let updated = feedback::update_status(&pool, id, status)
        .await?
        .ok_or(AppError::NotFound("Feedback"))?;

    log::info!("Updated feedback {} status to: {}", id, status);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Feedback status updated successfully",
        "data": updated,
    })))
}

/// POST /api/admin/feedback/{id}/promote
/// Copy one embedded suggestion into the voting pool, using the edited
/// text. The source feedback is left untouched.
pub async fn promote(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<PromoteRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let body = body.into_inner();
    let (Some(suggestion_number), Some(title), Some(issue), Some(improvement)) = (
        body.suggestion_number,
        body.title.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        body.edited_issue_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        body.edited_suggested_improvement
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields for promotion".to_string(),
        ));
    };

    let priority = match body.priority.as_deref() {
        None => "medium",
        Some(p) if feedback::PRIORITIES.contains(&p) => p,
        Some(_) => {
            return Err(AppError::Validation("Invalid priority value".to_string()));
        }
    };

    let feedback_id = path.into_inner();
    let source = feedback::find_by_id(&pool, feedback_id)
        .await?
        .ok_or(AppError::FeedbackNotFound)?;

    let original_suggestion = source
        .suggestions
        .iter()
        .find(|s| s.suggestion_number == suggestion_number)
        .ok_or(AppError::SuggestionNotFound)?;

    let created = voting_suggestion::create(
        &pool,
        &NewVotingSuggestion {
            title: title.to_string(),
            issue_description: issue.to_string(),
            suggested_improvement: improvement.to_string(),
            submitter_name: source.name.clone(),
            submitter_email: source.email.clone(),
            original_feedback_id: Some(feedback_id),
            priority: priority.to_string(),
            created_by: "admin".to_string(),
        },
    )
    .await?;

    log::info!(
        "Promoted feedback {} suggestion {} to voting suggestion {}",
        feedback_id,
        suggestion_number,
        created.id
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Suggestion promoted to voting successfully",
        "code": "SUCCESS",
        "data": {
            "votingSuggestion": created,
            "originalFeedback": {
                "id": source.id,
                "submitter": source.name,
                "originalSuggestion": original_suggestion,
            },
        },
    })))
}
