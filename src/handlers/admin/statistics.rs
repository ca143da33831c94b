use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::admin::require_admin;
use crate::errors::AppError;
use crate::models::{feedback, vote, voting_suggestion};

/// GET /api/admin/statistics
/// Informational aggregates. Each section degrades to zeroed counts on an
/// internal fault instead of failing the whole call.
pub async fn overview(pool: web::Data<PgPool>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    require_admin(&req)?;

    let feedback_counts = feedback::count_by_status(&pool).await.unwrap_or_default();
    let suggestion_counts = voting_suggestion::count_by_status(&pool)
        .await
        .unwrap_or_default();
    let voting = vote::stats(&pool).await.unwrap_or_default();
    let recent_feedback = feedback::recent(&pool, 5).await.unwrap_or_default();
    let recent_votes = vote::recent(&pool, 10).await.unwrap_or_default();

    let feedback_by_status: serde_json::Map<String, serde_json::Value> = feedback_counts
        .into_iter()
        .map(|(status, count)| (status, json!(count)))
        .collect();
    let suggestions_by_status: serde_json::Map<String, serde_json::Value> = suggestion_counts
        .into_iter()
        .map(|(status, count)| (status, json!(count)))
        .collect();

    log::info!("Generated admin statistics");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Statistics retrieved successfully",
        "data": {
            "feedback": feedback_by_status,
            "suggestions": suggestions_by_status,
            "voting": voting,
            "recent": {
                "feedback": recent_feedback,
                "votes": recent_votes,
            },
        },
    })))
}
