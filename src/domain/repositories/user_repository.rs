//! Repository trait for user accounts.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered users.
///
/// Logins are stored and looked up in normalized form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the login is taken.
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// Finds a user by normalized login.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError>;
}
