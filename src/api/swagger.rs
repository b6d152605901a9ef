use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LMS Auth Service API",
        version = "1.0.0",
        description = "Registration and login for the Learning Management System.\n\nSuccessful calls return a JWT (30-day expiry) that the frontend keeps in local storage and sends as `Authorization: Bearer <token>`.\n\nErrors are returned as `{\"message\": \"...\"}`."
    ),
    paths(
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::me,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::auth_service::MeResponse,
            crate::models::UserProfile,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "User registration, login and current-user lookup."),
        (name = "Health", description = "Service and database health."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/auth/login or /api/auth/register"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_auth_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/register"));
        assert!(doc.paths.paths.contains_key("/api/auth/login"));
        assert!(doc.paths.paths.contains_key("/api/auth/me"));
    }
}
