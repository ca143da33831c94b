pub mod admin;
pub mod feedback_handlers;
pub mod voting_handlers;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

/// Client network metadata used for audit capture and fingerprinting.
pub fn client_meta(req: &HttpRequest) -> (String, String) {
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("")
        .to_string();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    (ip, user_agent)
}

/// GET /api/health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "message": "Council feedback API is running",
        "timestamp": chrono::Utc::now(),
    }))
}

/// Register every route. Shared between the server binary and the
/// integration test harness.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies and non-numeric path ids get the standard
    // error envelope instead of the default plain-text response.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({
            "error": err.to_string(),
            "code": "VALIDATION_ERROR",
        });
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(body),
        )
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let body = json!({
            "error": "Invalid identifier in request path",
            "code": "VALIDATION_ERROR",
        });
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(body),
        )
        .into()
    }));

    cfg.route("/api/health", web::get().to(health))
        .service(
            web::scope("/api/feedback")
                .route("", web::post().to(feedback_handlers::submit))
                .route("", web::get().to(feedback_handlers::list))
                .route("/reset", web::get().to(feedback_handlers::reset)),
        )
        .service(web::scope("/api/admin").configure(admin::configure))
        .service(web::scope("/api/voting").configure(voting_handlers::configure));
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    #[actix_rt::test]
    async fn health_reports_ok() {
        let app = test::init_service(
            App::new().route("/api/health", web::get().to(super::health)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].is_string());
    }
}
