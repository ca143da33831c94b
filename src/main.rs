use actix_web::{App, HttpServer, middleware, web};

use council_feedback::auth::admin::AdminKey;
use council_feedback::auth::rate_limit::RateLimiter;
use council_feedback::config::Config;
use council_feedback::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool).await;

    let admin_key = web::Data::new(AdminKey(config.admin_api_key.clone()));
    let limiter = web::Data::new(RateLimiter::new());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(admin_key.clone())
            .app_data(limiter.clone())
            .configure(handlers::configure_app)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
