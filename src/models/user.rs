use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Documento da collection "users"
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password: String,  // bcrypt hash
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<BsonDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<BsonDateTime>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: None,
            name,
            email,
            password: password_hash,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Hex form of the generated identifier, as carried in tokens.
    pub fn user_id(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public profile fields returned by the API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Lowercased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
