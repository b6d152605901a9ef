use super::ClientError;
use crate::models::UserProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Success body of `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeBody {
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The calls the forms make against the backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, payload: &LoginPayload<'_>) -> Result<AuthSession, ClientError>;
    async fn register(&self, payload: &RegisterPayload<'_>) -> Result<AuthSession, ClientError>;
    async fn current_user(&self, token: &str) -> Result<UserProfile, ClientError>;
}

pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/auth/{}", self.base_url, path)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<AuthSession, ClientError> {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        parse_response(response).await
    }
}

impl Default for HttpAuthApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::Http(e.to_string()))?;

    if status.is_success() {
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    } else {
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&bytes),
        })
    }
}

/// `message` from an error body, if the server sent one.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, payload: &LoginPayload<'_>) -> Result<AuthSession, ClientError> {
        self.post("login", payload).await
    }

    async fn register(&self, payload: &RegisterPayload<'_>) -> Result<AuthSession, ClientError> {
        self.post("register", payload).await
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .client
            .get(self.endpoint("me"))
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let body: MeBody = parse_response(response).await?;
        Ok(body.user)
    }
}
