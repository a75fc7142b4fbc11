//! In-memory implementation of the user repository.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;
use std::collections::HashMap;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Process-local user store keyed by normalized login.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write();

        if users.contains_key(&user.login) {
            return Err(AppError::already_exists(
                format!("User with login '{}' already exists", user.login),
                json!({ "login": user.login }),
            ));
        }

        users.insert(user.login.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().get(login).cloned())
    }
}
