pub mod feedback;
pub mod statistics;
pub mod suggestions;

use actix_web::web;

/// Configure the /api/admin scope. Every handler starts with an admin-key
/// check; there is no unauthenticated admin route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feedback", web::get().to(feedback::list))
        .route("/feedback/{id}/status", web::put().to(feedback::update_status))
        .route("/feedback/{id}/promote", web::post().to(feedback::promote))
        .route("/suggestions", web::get().to(suggestions::list))
        .route("/suggestions", web::post().to(suggestions::create))
        .route("/suggestions/{id}", web::put().to(suggestions::update))
        .route("/suggestions/{id}", web::delete().to(suggestions::delete))
        .route(
            "/suggestions/{id}/activate",
            web::post().to(suggestions::activate),
        )
        .route("/suggestions/{id}/close", web::post().to(suggestions::close))
        .route("/statistics", web::get().to(statistics::overview));
}
