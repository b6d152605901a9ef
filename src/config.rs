use std::env;
use std::ops::RangeInclusive;

const DEV_JWT_SECRET: &str = "default-secret-change-me";

const JWT_EXPIRY_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Which backend holds the `users` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    MongoDB,
    Memory,
}

/// Token signing settings shared by every handler.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_expires_in_days: i64,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expires_in_days: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub store: StoreKind,
    pub frontend_url: String,
    pub auth: AuthSettings,
}

impl Config {
    /// Reads configuration from the process environment (`.env` is loaded by `main`).
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let database_url = var("DATABASE_URL")
            .unwrap_or_else(|| "mongodb://localhost:27017/lms".to_string());

        let store = match var("USER_STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            Some("mongodb") | None => StoreKind::MongoDB,
            Some(other) => return Err(format!("Invalid USER_STORE: {}. Supported: mongodb, memory", other)),
        };

        let frontend_url =
            var("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_string());

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("⚠️  JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt_expires_in_days = match var("JWT_EXPIRES_IN_DAYS") {
            Some(days) => days
                .parse::<i64>()
                .map_err(|e| format!("Invalid JWT_EXPIRES_IN_DAYS: {}", e))?,
            None => 30,
        };
        if !JWT_EXPIRY_DAYS_RANGE.contains(&jwt_expires_in_days) {
            return Err(format!(
                "Invalid JWT_EXPIRES_IN_DAYS: {} (expected {}..={})",
                jwt_expires_in_days,
                JWT_EXPIRY_DAYS_RANGE.start(),
                JWT_EXPIRY_DAYS_RANGE.end()
            ));
        }

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(cost) => cost
                .parse::<u32>()
                .map_err(|e| format!("Invalid BCRYPT_COST: {}", e))?,
            None => bcrypt::DEFAULT_COST,
        };
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(format!(
                "Invalid BCRYPT_COST: {} (expected {}..={})",
                bcrypt_cost,
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            ));
        }

        Ok(Self {
            host,
            port,
            database_url,
            store,
            frontend_url,
            auth: AuthSettings {
                jwt_secret,
                jwt_expires_in_days,
                bcrypt_cost,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
