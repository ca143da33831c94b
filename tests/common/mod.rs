//! Shared test infrastructure: service construction and seed helpers.
//!
//! Each `#[sqlx::test]` gets a fresh database with the crate migrations
//! applied; `app()` builds the full service against that pool so tests
//! exercise the real route table, extractors, and error envelopes.
#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, Error, web};
use sqlx::PgPool;

use council_feedback::auth::admin::AdminKey;
use council_feedback::auth::rate_limit::RateLimiter;
use council_feedback::handlers;
use council_feedback::models::feedback::{self, NewFeedback, Suggestion};
use council_feedback::models::voting_suggestion::{self, NewVotingSuggestion};

pub const ADMIN_KEY: &str = "integration-test-admin-key";
pub const DEFAULT_UA: &str = "integration-test-agent";

/// Build the full application for a test database pool.
pub fn app(
    pool: PgPool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(pool))
        .app_data(web::Data::new(AdminKey(ADMIN_KEY.to_string())))
        .app_data(web::Data::new(RateLimiter::new()))
        .configure(handlers::configure_app)
}

/// A GET request with a stable user agent.
pub fn get(uri: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .insert_header((header::USER_AGENT, DEFAULT_UA))
}

/// A POST request with a JSON body and a stable user agent.
pub fn post_json(uri: &str, body: serde_json::Value) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((header::USER_AGENT, DEFAULT_UA))
        .set_json(body)
}

/// Same as `get`, carrying the admin key header.
pub fn admin_get(uri: &str) -> TestRequest {
    get(uri).insert_header(("X-Admin-Key", ADMIN_KEY))
}

pub fn admin_post(uri: &str, body: serde_json::Value) -> TestRequest {
    post_json(uri, body).insert_header(("X-Admin-Key", ADMIN_KEY))
}

pub fn admin_put(uri: &str, body: serde_json::Value) -> TestRequest {
    TestRequest::put()
        .uri(uri)
        .insert_header((header::USER_AGENT, DEFAULT_UA))
        .insert_header(("X-Admin-Key", ADMIN_KEY))
        .set_json(body)
}

pub fn admin_delete(uri: &str) -> TestRequest {
    TestRequest::delete()
        .uri(uri)
        .insert_header((header::USER_AGENT, DEFAULT_UA))
        .insert_header(("X-Admin-Key", ADMIN_KEY))
}

/// Seed a feedback document with one suggestion via the model layer,
/// returning its id.
pub async fn seed_feedback(pool: &PgPool, name: &str) -> i64 {
    let new = NewFeedback {
        name: name.to_string(),
        email: Some(format!(
            "{}@example.com",
            name.to_lowercase().replace([' ', '.'], "")
        )),
        suggestions: vec![Suggestion {
            suggestion_number: 1,
            issue_description: "Long queues at the service desk".to_string(),
            suggested_improvement: "Add more staff at peak hours".to_string(),
        }],
        ip_address: "203.0.113.7".to_string(),
        user_agent: DEFAULT_UA.to_string(),
    };
    let (id, _) = feedback::create(pool, &new).await.unwrap();
    id
}

/// Seed a voting suggestion via the model layer, forcing the given status.
/// Returns its id.
pub async fn seed_suggestion(
    pool: &PgPool,
    title: &str,
    status: &str,
    original_feedback_id: Option<i64>,
) -> i64 {
    let created = voting_suggestion::create(
        pool,
        &NewVotingSuggestion {
            title: title.to_string(),
            issue_description: "Queues are too long".to_string(),
            suggested_improvement: "More staff".to_string(),
            submitter_name: "A. Karim".to_string(),
            submitter_email: Some("a.karim@example.com".to_string()),
            original_feedback_id,
            priority: "medium".to_string(),
            created_by: "admin".to_string(),
        },
    )
    .await
    .unwrap();

    if status != "draft" {
        voting_suggestion::set_status(pool, created.id, status)
            .await
            .unwrap()
            .unwrap();
    }
    created.id
}
