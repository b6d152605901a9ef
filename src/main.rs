use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use lms_auth::{
    api,
    config::{Config, StoreKind},
    database::{MemoryUserStore, MongoDB, UserStore},
    middleware,
    state::AppState,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting LMS Auth Service...");

    let users: Arc<dyn UserStore> = match config.store {
        StoreKind::MongoDB => {
            log::info!("📊 Database: {}", config.database_url);
            let db = MongoDB::new(&config.database_url).await.map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to MongoDB: {}", e),
                )
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        StoreKind::Memory => {
            log::warn!("⚠️  USER_STORE=memory: users are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    let state = web::Data::new(AppState::new(users, config.auth.clone()));
    let frontend_url = config.frontend_url.clone();
    let bind_address = config.bind_address();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_origin("http://localhost:5173") // Vite dev server
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
