use crate::services::auth_service::{
    self, AuthResponse, Claims, LoginRequest, MeResponse, RegisterRequest,
};
use crate::{state::AppState, utils::AppError};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Missing fields or user already exists"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /api/auth/register - email: {}", email);

    let response = auth_service::register(state.users.as_ref(), &state.auth, &request).await?;

    log::info!("✅ Registration successful: {}", response.user.email);
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Unknown email or invalid password"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /api/auth/login - email: {}", email);

    let response = auth_service::login(state.users.as_ref(), &state.auth, &request).await?;

    log::info!("✅ Login successful: {}", response.user.email);
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /api/auth/me - user: {}", claims.user_id);

    let user = auth_service::get_current_user(state.users.as_ref(), &claims.user_id).await?;

    Ok(HttpResponse::Ok().json(MeResponse { user }))
}
