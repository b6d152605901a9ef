pub mod auth;
pub mod health;
pub mod swagger;

use crate::{middleware::AuthMiddleware, utils::AppError};
use actix_web::web;

/// Routes shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .service(
                    web::resource("/me")
                        .route(web::get().to(auth::me))
                        .wrap(AuthMiddleware),
                ),
        );
}

/// Body parse failures answer 400 with the same `{message}` shape as handler errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}
