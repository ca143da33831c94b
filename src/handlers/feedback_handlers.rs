use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::admin::require_admin;
use crate::auth::rate_limit::RateLimiter;
use crate::errors::AppError;
use crate::models::feedback;
use crate::models::feedback::{FeedbackSubmission, NewFeedback};

/// POST /api/feedback
/// Public intake: sanitize, renumber, validate, persist.
pub async fn submit(
    pool: web::Data<PgPool>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    body: web::Json<FeedbackSubmission>,
) -> Result<HttpResponse, AppError> {
    let (ip, user_agent) = super::client_meta(&req);

    if limiter.is_blocked(&ip) {
        return Err(AppError::RateLimited);
    }
    limiter.record_submission(&ip);

    let new = NewFeedback::from_submission(body.into_inner(), ip, user_agent)?;
    let (id, submitted_at) = feedback::create(&pool, &new).await?;

    log::info!(
        "Feedback {} submitted with {} suggestions",
        id,
        new.suggestions.len()
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Feedback submitted successfully",
        "code": "SUCCESS",
        "data": {
            "id": id,
            "submittedAt": submitted_at,
            "suggestionCount": new.suggestions.len(),
        },
    })))
}

/// GET /api/feedback
/// Full dump, newest first. Admin-gated: raw submissions carry submitter
/// contact details and network metadata.
pub async fn list(pool: web::Data<PgPool>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let items = feedback::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Feedback retrieved successfully",
        "count": items.len(),
        "data": items,
    })))
}

/// GET /api/feedback/reset
/// Destructive bulk delete of every feedback document. Admin-gated.
pub async fn reset(pool: web::Data<PgPool>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let deleted = feedback::delete_all(&pool).await?;
    log::warn!("Feedback reset: deleted {} items", deleted);

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Database reset successful! Deleted {deleted} feedback items."),
        "deletedCount": deleted,
    })))
}
