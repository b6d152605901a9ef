use crate::{database::MongoDB, models::User, utils::AppError};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use tokio::sync::RwLock;

pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persistence seam for the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Unknown or malformed identifiers resolve to `None`.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Persists a new user and returns it with its generated identifier.
    /// A clash on `email` yields `AppError::UserAlreadyExists`.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let collection = self.collection::<User>(USERS_COLLECTION);
        Ok(collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let oid = match ObjectId::parse_str(user_id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let collection = self.collection::<User>(USERS_COLLECTION);
        Ok(collection.find_one(doc! { "_id": oid }).await?)
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let collection = self.collection::<User>(USERS_COLLECTION);

        let result = collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::UserAlreadyExists
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("Inserted user has no ObjectId".to_string())
        })?;
        user.id = Some(oid);

        Ok(user)
    }

    async fn is_healthy(&self) -> bool {
        self.health_check().await
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        *e.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref w)) if w.code == DUPLICATE_KEY_CODE
    )
}

/// Process-local store, used with `USER_STORE=memory` and in tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let oid = match ObjectId::parse_str(user_id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == Some(oid)).cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::UserAlreadyExists);
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());

        Ok(user)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
