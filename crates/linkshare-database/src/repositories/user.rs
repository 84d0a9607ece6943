//! User repository implementation.

use async_trait::async_trait;
use dashmap::DashMap;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::types::UserId;
use linkshare_entity::user::User;

use crate::store::UserStore;

/// Repository for user records.
#[derive(Debug, Default)]
pub struct UserRepository {
    users: DashMap<UserId, User>,
}

impl UserRepository {
    /// Create an empty user repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get(&self, id: UserId) -> AppResult<User> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn insert(&self, user: User) -> AppResult<()> {
        self.users.insert(user.id, user);
        Ok(())
    }
}
