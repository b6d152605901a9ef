use crate::{
    config::AuthSettings,
    database::UserStore,
    models::{normalize_email, User, UserProfile},
    utils::AppError,
    validation,
};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub user: UserProfile,
}

// Generate JWT token
pub fn generate_token(user_id: &str, settings: &AuthSettings) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = Duration::try_days(settings.jwt_expires_in_days)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid token lifetime: {} days",
                settings.jwt_expires_in_days
            ))
        })?;

    let claims = Claims {
        user_id: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

/// bcrypt is CPU-bound, so it runs off the async workers.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn match_password(candidate: &str, password_hash: &str) -> Result<bool, AppError> {
    let candidate = candidate.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || verify(candidate, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(AppError::from)
}

// User registration
pub async fn register(
    store: &dyn UserStore,
    settings: &AuthSettings,
    request: &RegisterRequest,
) -> Result<AuthResponse, AppError> {
    let name = validation::require(request.name.as_deref(), "Name")
        .map_err(AppError::InvalidRequest)?;
    let email = validation::require(request.email.as_deref(), "Email")
        .map_err(AppError::InvalidRequest)?;
    let password = validation::require(request.password.as_deref(), "Password")
        .map_err(AppError::InvalidRequest)?;

    if !validation::is_valid_email(email) {
        return Err(AppError::InvalidRequest("Invalid email address".to_string()));
    }
    let email = normalize_email(email);

    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    let password_hash = hash_password(password, settings.bcrypt_cost).await?;
    let user = store
        .insert(User::new(name.trim().to_string(), email, password_hash))
        .await?;

    let user_id = user
        .user_id()
        .ok_or_else(|| AppError::Internal("Stored user has no identifier".to_string()))?;
    let token = generate_token(&user_id, settings)?;

    log::info!("✅ User registered successfully: {} ({})", user.email, user_id);

    Ok(AuthResponse {
        user: user.profile(),
        token,
    })
}

// User login
pub async fn login(
    store: &dyn UserStore,
    settings: &AuthSettings,
    request: &LoginRequest,
) -> Result<AuthResponse, AppError> {
    let email = validation::require(request.email.as_deref(), "Email")
        .map_err(AppError::InvalidRequest)?;
    let password = validation::require(request.password.as_deref(), "Password")
        .map_err(AppError::InvalidRequest)?;

    let user = store
        .find_by_email(&normalize_email(email))
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !match_password(password, &user.password).await? {
        return Err(AppError::InvalidPassword);
    }

    let user_id = user
        .user_id()
        .ok_or_else(|| AppError::Internal("Stored user has no identifier".to_string()))?;
    let token = generate_token(&user_id, settings)?;

    Ok(AuthResponse {
        user: user.profile(),
        token,
    })
}

// Get current user
pub async fn get_current_user(
    store: &dyn UserStore,
    user_id: &str,
) -> Result<UserProfile, AppError> {
    store
        .find_by_id(user_id)
        .await?
        .map(|user| user.profile())
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryUserStore;

    fn settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_days: 30,
            bcrypt_cost: 4,
        }
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some("Ada Lovelace".to_string()),
            email: Some(email.to_string()),
            password: Some("Abcdef12".to_string()),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let store = MemoryUserStore::new();
        let response = register(&store, &settings(), &register_request("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.user.name, "Ada Lovelace");

        let stored = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password, "Abcdef12");
        assert!(bcrypt::verify("Abcdef12", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_register_token_carries_user_id() {
        let store = MemoryUserStore::new();
        let response = register(&store, &settings(), &register_request("ada@example.com"))
            .await
            .unwrap();

        let claims = verify_token(&response.token, &settings()).unwrap();
        let stored = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(Some(claims.user_id), stored.user_id());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = MemoryUserStore::new();
        register(&store, &settings(), &register_request("ada@example.com"))
            .await
            .unwrap();

        let err = register(&store, &settings(), &register_request("ADA@example.com "))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::UserAlreadyExists);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let store = MemoryUserStore::new();
        let request = RegisterRequest {
            name: None,
            email: Some("ada@example.com".to_string()),
            password: Some("Abcdef12".to_string()),
        };

        let err = register(&store, &settings(), &request).await.unwrap_err();
        assert_eq!(err, AppError::InvalidRequest("Name is required".to_string()));
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let store = MemoryUserStore::new();
        let err = register(&store, &settings(), &register_request("not-an-email"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::InvalidRequest("Invalid email address".to_string()));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let store = MemoryUserStore::new();
        register(&store, &settings(), &register_request("ada@example.com"))
            .await
            .unwrap();

        let ok = login(&store, &settings(), &login_request("ada@example.com", "Abcdef12"))
            .await
            .unwrap();
        assert_eq!(ok.user.name, "Ada Lovelace");
        assert!(verify_token(&ok.token, &settings()).is_ok());

        let wrong = login(&store, &settings(), &login_request("ada@example.com", "Wrong123"))
            .await
            .unwrap_err();
        assert_eq!(wrong, AppError::InvalidPassword);

        let unknown = login(&store, &settings(), &login_request("bob@example.com", "Abcdef12"))
            .await
            .unwrap_err();
        assert_eq!(unknown, AppError::UserNotFound);
    }

    #[test]
    fn test_token_expires_in_thirty_days() {
        let token = generate_token("65f0c0ffee0000000000abcd", &settings()).unwrap();
        let claims = verify_token(&token, &settings()).unwrap();

        assert_eq!(claims.user_id, "65f0c0ffee0000000000abcd");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = generate_token("65f0c0ffee0000000000abcd", &settings()).unwrap();
        let other = AuthSettings::new("another-secret");

        let err = verify_token(&token, &other).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut expired = settings();
        expired.jwt_expires_in_days = -1;
        let token = generate_token("65f0c0ffee0000000000abcd", &expired).unwrap();

        assert!(verify_token(&token, &settings()).is_err());
    }

    #[test]
    fn test_token_lifetime_overflow_is_an_error() {
        let mut huge = settings();
        huge.jwt_expires_in_days = 1_000_000_000_000;

        let err = generate_token("65f0c0ffee0000000000abcd", &huge).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_get_current_user_unknown_id() {
        let store = MemoryUserStore::new();
        let err = get_current_user(&store, "65f0c0ffee0000000000abcd")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
