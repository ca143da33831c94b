use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::fingerprint::fingerprint;
use crate::models::vote::{self, NewVote, VOTE_VALUES, VoteCheck, VoteCounts, VoteRequest};
use crate::models::voting_suggestion::{self, OriginalFeedbackSummary};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/suggestions", web::get().to(list_active))
        .route("/suggestions/{id}/vote", web::post().to(cast_vote))
        .route("/suggestions/{id}/votes", web::get().to(vote_counts))
        .route("/check/{id}", web::get().to(check_vote));
}

/// Public shape of an active suggestion with its live tally.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveSuggestionItem {
    suggestion_id: String,
    title: String,
    issue_description: String,
    suggested_improvement: String,
    submitter: String,
    submitter_email: Option<String>,
    priority: String,
    created_at: DateTime<Utc>,
    votes: VoteCounts,
    original_feedback: Option<OriginalFeedbackSummary>,
}

/// GET /api/voting/suggestions
/// Active suggestions only, newest first, each joined with its tally.
pub async fn list_active(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let suggestions = voting_suggestion::find_all(&pool, Some("active")).await?;

    let mut items = Vec::with_capacity(suggestions.len());
    for entry in suggestions {
        let suggestion = entry.suggestion;
        let votes = vote::counts_for(&pool, &suggestion.id.to_string()).await?;
        items.push(ActiveSuggestionItem {
            suggestion_id: suggestion.id.to_string(),
            title: suggestion.title,
            issue_description: suggestion.issue_description,
            suggested_improvement: suggestion.suggested_improvement,
            submitter: suggestion.submitter_name,
            submitter_email: suggestion.submitter_email,
            priority: suggestion.priority,
            created_at: suggestion.created_at,
            votes,
            original_feedback: entry.original_feedback,
        });
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Active suggestions retrieved successfully",
        "count": items.len(),
        "data": items,
    })))
}

/// POST /api/voting/suggestions/{id}/vote
///
/// The pre-insert existing-vote lookup is advisory UX; under concurrent
/// requests from one fingerprint the unique constraint decides, and its
/// violation surfaces as DuplicateVote rather than a server error.
pub async fn cast_vote(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<VoteRequest>,
) -> Result<HttpResponse, AppError> {
    let vote_value = body.vote.as_deref().unwrap_or("");
    if !VOTE_VALUES.contains(&vote_value) {
        return Err(AppError::InvalidVote);
    }

    let id = path.into_inner();
    let suggestion = voting_suggestion::find_active_by_id(&pool, id)
        .await?
        .ok_or(AppError::ActiveSuggestionNotFound)?;

    let suggestion_id = suggestion.id.to_string();
    let (ip, user_agent) = super::client_meta(&req);
    let voter_fingerprint = fingerprint(&ip, &user_agent);

    if let Some(existing) = vote::find_existing(&pool, &suggestion_id, &voter_fingerprint).await? {
        return Err(AppError::AlreadyVoted(existing.vote));
    }

    vote::insert(
        &pool,
        &NewVote {
            suggestion_id: suggestion_id.clone(),
            feedback_id: suggestion.original_feedback_id,
            vote: vote_value.to_string(),
            voter_fingerprint,
            ip_address: ip,
            user_agent,
        },
    )
    .await?;

    let counts = vote::counts_for(&pool, &suggestion_id).await?;

    log::info!("Vote recorded: {} on suggestion {}", vote_value, suggestion_id);

    Ok(HttpResponse::Created().json(json!({
        "message": "Vote recorded successfully",
        "code": "SUCCESS",
        "data": {
            "suggestionId": suggestion_id,
            "vote": vote_value,
            "voteCounts": counts,
        },
    })))
}

/// GET /api/voting/suggestions/{id}/votes
pub async fn vote_counts(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let suggestion = voting_suggestion::find_active_by_id(&pool, id)
        .await?
        .ok_or(AppError::ActiveSuggestionNotFound)?;

    let suggestion_id = suggestion.id.to_string();
    let counts = vote::counts_for(&pool, &suggestion_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Vote counts retrieved successfully",
        "data": {
            "suggestionId": suggestion_id,
            "votes": counts,
        },
    })))
}

/// GET /api/voting/check/{id}
/// Report whether the requesting client's fingerprint has voted.
pub async fn check_vote(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let suggestion = voting_suggestion::find_active_by_id(&pool, id)
        .await?
        .ok_or(AppError::ActiveSuggestionNotFound)?;

    let (ip, user_agent) = super::client_meta(&req);
    let voter_fingerprint = fingerprint(&ip, &user_agent);

    let existing =
        vote::find_existing(&pool, &suggestion.id.to_string(), &voter_fingerprint).await?;

    let check = VoteCheck {
        has_voted: existing.is_some(),
        vote: existing.map(|v| v.vote),
    };

    Ok(HttpResponse::Ok().json(json!({
        "message": "Vote check completed",
        "data": check,
    })))
}
