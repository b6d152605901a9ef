use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "User store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_ok = state.users.is_healthy().await;

    let body = HealthResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        service: "lms-auth-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if store_ok { "connected" } else { "unreachable" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if store_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api,
        config::AuthSettings,
        database::{MemoryUserStore, UserStore},
        models::User,
        utils::AppError,
    };
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct UnreachableStore;

    #[async_trait]
    impl UserStore for UnreachableStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
            Err(AppError::DatabaseError("unreachable".to_string()))
        }

        async fn find_by_id(&self, _user_id: &str) -> Result<Option<User>, AppError> {
            Err(AppError::DatabaseError("unreachable".to_string()))
        }

        async fn insert(&self, _user: User) -> Result<User, AppError> {
            Err(AppError::DatabaseError("unreachable".to_string()))
        }

        async fn is_healthy(&self) -> bool {
            false
        }
    }

    fn state(users: Arc<dyn UserStore>) -> web::Data<AppState> {
        web::Data::new(AppState::new(users, AuthSettings::new("test-secret")))
    }

    #[actix_web::test]
    async fn test_health_reports_healthy() {
        let state = state(Arc::new(MemoryUserStore::new()));
        let app = test::init_service(App::new().app_data(state).configure(api::configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "lms-auth-service");
        assert_eq!(body.database, "connected");
    }

    #[actix_web::test]
    async fn test_health_degraded_when_store_unreachable() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(UnreachableStore)))
                .configure(api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "degraded");
        assert_eq!(body.database, "unreachable");
    }
}
