use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::admin::require_admin;
use crate::errors::AppError;
use crate::models::feedback::PRIORITIES;
use crate::models::voting_suggestion::{
    self, CreateSuggestionRequest, NewVotingSuggestion, STATUSES, UpdateSuggestionRequest,
};

/// GET /api/admin/suggestions - listing with originating-feedback context
/// Query params: status (default all)
pub async fn list(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let status = query
        .get("status")
        .map(String::as_str)
        .filter(|s| !s.is_empty() && *s != "all");

    let items = voting_suggestion::find_all(&pool, status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Suggestions retrieved successfully",
        "count": items.len(),
        "data": items,
    })))
}

/// POST /api/admin/suggestions - direct authoring without a source feedback
pub async fn create(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    body: web::Json<CreateSuggestionRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let body = body.into_inner();
    let (Some(title), Some(issue), Some(improvement), Some(submitter_name)) = (
        body.title.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        body.issue_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        body.suggested_improvement
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        body.submitter_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let priority = match body.priority.as_deref() {
        None => "medium",
        Some(p) if PRIORITIES.contains(&p) => p,
        Some(_) => {
            return Err(AppError::Validation("Invalid priority value".to_string()));
        }
    };

    let created = voting_suggestion::create(
        &pool,
        &NewVotingSuggestion {
            title: title.to_string(),
            issue_description: issue.to_string(),
            suggested_improvement: improvement.to_string(),
            submitter_name: submitter_name.to_string(),
            submitter_email: body
                .submitter_email
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            original_feedback_id: body.original_feedback_id,
            priority: priority.to_string(),
            created_by: "admin".to_string(),
        },
    )
    .await?;

    log::info!("Admin suggestion created: {} ({})", created.id, created.title);

    Ok(HttpResponse::Created().json(json!({
        "message": "Suggestion created successfully",
        "code": "SUCCESS",
        "data": created,
    })))
}

/// PUT /api/admin/suggestions/{id} - partial update
/// Provenance fields (originalFeedbackId, createdBy) in the payload are
/// ignored; see UpdateSuggestionRequest.
pub async fn update(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSuggestionRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let body = body.into_inner();
    if let Some(ref status) = body.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation("Invalid status value".to_string()));
        }
    }
    if let Some(ref priority) = body.priority {
        if !PRIORITIES.contains(&priority.as_str()) {
            return Err(AppError::Validation("Invalid priority value".to_string()));
        }
    }

    let id = path.into_inner();
    let updated = voting_suggestion::update_partial(&pool, id, &body)
        .await?
        .ok_or(AppError::NotFound("Suggestion"))?;

    log::info!("Updated suggestion: {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Suggestion updated successfully",
        "data": updated,
    })))
}

/// DELETE /api/admin/suggestions/{id} - hard delete, any status
pub async fn delete(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let id = path.into_inner();
    let (id, title) = voting_suggestion::delete(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Suggestion"))?;

    log::info!("Deleted suggestion: {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Suggestion deleted successfully",
        "data": { "id": id, "title": title },
    })))
}

/// POST /api/admin/suggestions/{id}/activate
/// Forces status to active from any prior state.
pub async fn activate(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let id = path.into_inner();
    let updated = voting_suggestion::set_status(&pool, id, "active")
        .await?
        .ok_or(AppError::NotFound("Suggestion"))?;

    log::info!("Activated suggestion for voting: {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Suggestion activated for voting",
        "data": updated,
    })))
}

/// POST /api/admin/suggestions/{id}/close
/// Forces status to closed from any prior state.
pub async fn close(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let id = path.into_inner();
    let updated = voting_suggestion::set_status(&pool, id, "closed")
        .await?
        .ok_or(AppError::NotFound("Suggestion"))?;

    log::info!("Closed suggestion voting: {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Suggestion voting closed",
        "data": updated,
    })))
}
