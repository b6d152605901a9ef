use super::{Alert, AuthApi, LoginPayload, RegisterPayload, TokenStorage, TOKEN_KEY};
use crate::validation::{is_strong_password, validate_password, PASSWORD_REQUIREMENTS};

/// Where a successful login lands.
pub const DASHBOARD_ROUTE: &str = "/admin/dashboard";

/// What the UI should do once a submission settles.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub alert: Option<Alert>,
    pub redirect: Option<String>,
}

impl SubmitOutcome {
    fn alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            redirect: None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    show_password: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// The password as the input renders it.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    pub async fn submit(&mut self, api: &dyn AuthApi, storage: &dyn TokenStorage) -> SubmitOutcome {
        if self.email.is_empty() || self.password.is_empty() {
            return SubmitOutcome::alert(Alert::warning(
                "Missing Information",
                "Please fill in all fields.",
            ));
        }

        let payload = LoginPayload {
            email: &self.email,
            password: &self.password,
        };

        let failure = |text: Option<&str>| {
            Alert::error(
                "Login Failed",
                text.unwrap_or("Invalid email or password."),
                "Try Again",
            )
        };

        let session = match api.login(&payload).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Login failed: {}", e);
                return SubmitOutcome::alert(failure(e.server_message()));
            }
        };

        if let Err(e) = storage.set_item(TOKEN_KEY, &session.token) {
            log::error!("Could not store token: {}", e);
            return SubmitOutcome::alert(failure(None));
        }

        SubmitOutcome {
            alert: Some(Alert::success(
                "Login Successful",
                format!("Welcome back, {}!", session.user.name),
            )),
            redirect: Some(DASHBOARD_ROUTE.to_string()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
    password_error: Option<String>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Re-validates on every change, like the input's onChange.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.password_error = validate_password(&self.password).err();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }

    pub async fn submit(&mut self, api: &dyn AuthApi) -> SubmitOutcome {
        if self.password_error.is_some() || !is_strong_password(&self.password) {
            self.password_error = Some(PASSWORD_REQUIREMENTS.to_string());
            return SubmitOutcome::default();
        }

        let payload = RegisterPayload {
            name: &self.name,
            email: &self.email,
            password: &self.password,
        };

        match api.register(&payload).await {
            Ok(session) => {
                let text = session
                    .message
                    .unwrap_or_else(|| "User created successfully!".to_string());
                self.clear();
                SubmitOutcome::alert(Alert::success("Registration Successful", text))
            }
            Err(e) => {
                log::warn!("Registration failed: {}", e);
                SubmitOutcome::alert(Alert::error(
                    "Registration Failed",
                    e.server_message()
                        .unwrap_or("Something went wrong. Please try again."),
                    "Retry",
                ))
            }
        }
    }

    fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.password_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AlertIcon, AuthSession, ClientError, MemoryTokenStorage};
    use crate::models::UserProfile;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned backend that records how often it was called.
    struct FakeApi {
        result: Result<AuthSession, ClientError>,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn ok(name: &str, token: &str) -> Self {
            Self {
                result: Ok(AuthSession {
                    user: UserProfile {
                        name: name.to_string(),
                        email: "ada@example.com".to_string(),
                    },
                    token: token.to_string(),
                    message: None,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(status: u16, message: Option<&str>) -> Self {
            Self {
                result: Err(ClientError::Api {
                    status,
                    message: message.map(str::to_string),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<AuthSession, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[async_trait]
    impl AuthApi for FakeApi {
        async fn login(&self, _payload: &LoginPayload<'_>) -> Result<AuthSession, ClientError> {
            self.respond()
        }

        async fn register(&self, _payload: &RegisterPayload<'_>) -> Result<AuthSession, ClientError> {
            self.respond()
        }

        async fn current_user(&self, _token: &str) -> Result<UserProfile, ClientError> {
            self.respond().map(|s| s.user)
        }
    }

    fn filled_login() -> LoginForm {
        let mut form = LoginForm::new();
        form.set_email("ada@example.com");
        form.set_password("Abcdef12");
        form
    }

    #[tokio::test]
    async fn test_login_success_stores_token_and_redirects() {
        let api = FakeApi::ok("Ada", "jwt-token");
        let storage = MemoryTokenStorage::new();

        let outcome = filled_login().submit(&api, &storage).await;

        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("jwt-token"));
        assert_eq!(outcome.redirect.as_deref(), Some(DASHBOARD_ROUTE));
        let alert = outcome.alert.unwrap();
        assert_eq!(alert.icon, AlertIcon::Success);
        assert_eq!(alert.text, "Welcome back, Ada!");
    }

    #[tokio::test]
    async fn test_login_missing_fields_skips_request() {
        let api = FakeApi::ok("Ada", "jwt-token");
        let storage = MemoryTokenStorage::new();
        let mut form = LoginForm::new();
        form.set_email("ada@example.com");

        let outcome = form.submit(&api, &storage).await;

        assert_eq!(api.calls(), 0);
        let alert = outcome.alert.unwrap();
        assert_eq!(alert.icon, AlertIcon::Warning);
        assert_eq!(alert.title, "Missing Information");
        assert!(outcome.redirect.is_none());
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let api = FakeApi::err(400, Some("Invalid password"));
        let storage = MemoryTokenStorage::new();

        let outcome = filled_login().submit(&api, &storage).await;

        let alert = outcome.alert.unwrap();
        assert_eq!(alert.title, "Login Failed");
        assert_eq!(alert.text, "Invalid password");
        assert_eq!(alert.confirm_button_text.as_deref(), Some("Try Again"));
        assert!(outcome.redirect.is_none());
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_failure_without_message_uses_fallback() {
        let api = FakeApi::err(502, None);
        let outcome = filled_login().submit(&api, &MemoryTokenStorage::new()).await;
        assert_eq!(outcome.alert.unwrap().text, "Invalid email or password.");
    }

    #[test]
    fn test_password_visibility_toggle() {
        let mut form = filled_login();
        assert_eq!(form.password_display(), "••••••••");
        form.toggle_show_password();
        assert_eq!(form.password_display(), "Abcdef12");
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_before_submit() {
        let api = FakeApi::ok("Ada", "jwt-token");
        let mut form = RegisterForm::new();
        form.set_name("Ada");
        form.set_email("ada@example.com");
        form.set_password("abcdefg");
        assert_eq!(form.password_error(), Some(PASSWORD_REQUIREMENTS));

        let outcome = form.submit(&api).await;

        assert_eq!(api.calls(), 0);
        assert!(outcome.alert.is_none());
        assert_eq!(form.password_error(), Some(PASSWORD_REQUIREMENTS));
    }

    #[tokio::test]
    async fn test_register_success_clears_fields() {
        let api = FakeApi::ok("Ada", "jwt-token");
        let mut form = RegisterForm::new();
        form.set_name("Ada");
        form.set_email("ada@example.com");
        form.set_password("Abcdef12");
        assert!(form.password_error().is_none());

        let outcome = form.submit(&api).await;

        assert_eq!(api.calls(), 1);
        let alert = outcome.alert.unwrap();
        assert_eq!(alert.title, "Registration Successful");
        assert_eq!(alert.text, "User created successfully!");
        assert!(form.name().is_empty());
        assert!(form.email().is_empty());
        assert!(form.password().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_keeps_fields() {
        let api = FakeApi::err(400, Some("User already exists"));
        let mut form = RegisterForm::new();
        form.set_name("Ada");
        form.set_email("ada@example.com");
        form.set_password("Abcdef12");

        let outcome = form.submit(&api).await;

        let alert = outcome.alert.unwrap();
        assert_eq!(alert.title, "Registration Failed");
        assert_eq!(alert.text, "User already exists");
        assert_eq!(alert.confirm_button_text.as_deref(), Some("Retry"));
        assert_eq!(form.email(), "ada@example.com");
    }
}
