use crate::{config::AuthSettings, database::UserStore};
use std::sync::Arc;

/// Shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, auth: AuthSettings) -> Self {
        Self { users, auth }
    }
}
