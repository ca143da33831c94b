//! Integration tests for the public feedback intake surface.

mod common;

use actix_web::test;
use common::*;
use serde_json::json;
use sqlx::PgPool;

use council_feedback::models::feedback;

#[sqlx::test]
async fn submit_valid_feedback_returns_created(pool: PgPool) {
    let app = test::init_service(app(pool)).await;

    let req = post_json(
        "/api/feedback",
        json!({
            "name": "A. Karim",
            "email": "a.karim@example.com",
            "suggestions": [
                {"issueDescription": "Long queues", "suggestedImprovement": "Add more staff"}
            ]
        }),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "SUCCESS");
    assert_eq!(body["data"]["suggestionCount"], 1);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert!(body["data"]["submittedAt"].is_string());
}

#[sqlx::test]
async fn stored_suggestions_are_renumbered_by_position(pool: PgPool) {
    let app = test::init_service(app(pool.clone())).await;

    let req = post_json(
        "/api/feedback",
        json!({
            "name": "A. Karim",
            "suggestions": [
                {"suggestionNumber": 9, "issueDescription": "First issue", "suggestedImprovement": "First fix"},
                {"suggestionNumber": 2, "issueDescription": "Second issue", "suggestedImprovement": "Second fix"}
            ]
        }),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let stored = feedback::find_by_id(&pool, id).await.unwrap().unwrap();
    let numbers: Vec<i32> = stored
        .suggestions
        .iter()
        .map(|s| s.suggestion_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(stored.suggestions[0].issue_description, "First issue");
    assert_eq!(stored.status, "pending");
    assert_eq!(stored.priority, "medium");
}

#[sqlx::test]
async fn submission_without_name_is_rejected(pool: PgPool) {
    let app = test::init_service(app(pool)).await;

    let req = post_json(
        "/api/feedback",
        json!({
            "suggestions": [
                {"issueDescription": "i", "suggestedImprovement": "s"}
            ]
        }),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test]
async fn four_suggestions_accepted_five_rejected(pool: PgPool) {
    let app = test::init_service(app(pool)).await;
    let pair = || json!({"issueDescription": "i", "suggestedImprovement": "s"});

    let req = post_json(
        "/api/feedback",
        json!({"name": "A. Karim", "suggestions": [pair(), pair(), pair(), pair()]}),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["suggestionCount"], 4);

    let req = post_json(
        "/api/feedback",
        json!({"name": "B. Karim", "suggestions": [pair(), pair(), pair(), pair(), pair()]}),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TOO_MANY_SUGGESTIONS");
}

#[sqlx::test]
async fn invalid_email_is_rejected(pool: PgPool) {
    let app = test::init_service(app(pool)).await;

    let req = post_json(
        "/api/feedback",
        json!({
            "name": "A. Karim",
            "email": "not-an-email",
            "suggestions": [{"issueDescription": "i", "suggestedImprovement": "s"}]
        }),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_EMAIL");
}

#[sqlx::test]
async fn stored_text_is_sanitized(pool: PgPool) {
    let app = test::init_service(app(pool.clone())).await;

    let req = post_json(
        "/api/feedback",
        json!({
            "name": "<script>alert(1)</script>",
            "suggestions": [{"issueDescription": "a & b", "suggestedImprovement": "c > d"}]
        }),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let stored = feedback::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!stored.name.contains('<'));
    assert!(stored.name.contains("&lt;script&gt;"));
    assert_eq!(stored.suggestions[0].issue_description, "a &amp; b");
    assert_eq!(stored.suggestions[0].suggested_improvement, "c &gt; d");
}

#[sqlx::test]
async fn listing_and_reset_require_admin_key(pool: PgPool) {
    let app = test::init_service(app(pool)).await;

    let resp = test::call_service(&app, get("/api/feedback").to_request()).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let resp = test::call_service(&app, get("/api/feedback/reset").to_request()).await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(
        &app,
        get("/api/feedback")
            .insert_header(("X-Admin-Key", "wrong-key-entirely"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[sqlx::test]
async fn listing_returns_newest_first(pool: PgPool) {
    let app = test::init_service(app(pool.clone())).await;

    seed_feedback(&pool, "First Member").await;
    seed_feedback(&pool, "Second Member").await;

    let resp = test::call_service(&app, admin_get("/api/feedback").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second Member", "First Member"]);
}

#[sqlx::test]
async fn reset_deletes_everything(pool: PgPool) {
    let app = test::init_service(app(pool.clone())).await;

    seed_feedback(&pool, "First Member").await;
    seed_feedback(&pool, "Second Member").await;

    let resp = test::call_service(&app, admin_get("/api/feedback/reset").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["deletedCount"], 2);

    let remaining = council_feedback::models::feedback::find_all(&pool)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[sqlx::test]
async fn sixth_submission_in_window_is_rate_limited(pool: PgPool) {
    let app = test::init_service(app(pool)).await;
    let body = || {
        json!({
            "name": "A. Karim",
            "suggestions": [{"issueDescription": "i", "suggestedImprovement": "s"}]
        })
    };

    for _ in 0..5 {
        let resp = test::call_service(&app, post_json("/api/feedback", body()).to_request()).await;
        assert_eq!(resp.status(), 201);
    }

    let resp = test::call_service(&app, post_json("/api/feedback", body()).to_request()).await;
    assert_eq!(resp.status(), 429);
    let envelope: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(envelope["code"], "RATE_LIMIT_EXCEEDED");
}

#[sqlx::test]
async fn malformed_json_gets_error_envelope(pool: PgPool) {
    let app = test::init_service(app(pool)).await;

    let req = actix_web::test::TestRequest::post()
        .uri("/api/feedback")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
