//! Current-identity tracking.

use parking_lot::RwLock;
use serde_json::json;

use crate::domain::entities::User;
use crate::error::AppError;

/// Holds at most one authenticated user.
///
/// Logging in replaces whoever was current.
#[derive(Default)]
pub struct Session {
    current: RwLock<Option<User>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, user: User) {
        *self.current.write() = Some(user);
    }

    /// Clears the current identity, returning it if there was one.
    pub fn logout(&self) -> Option<User> {
        self.current.write().take()
    }

    pub fn current(&self) -> Option<User> {
        self.current.read().clone()
    }

    /// Returns the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`] if nobody is logged in.
    pub fn require(&self) -> Result<User, AppError> {
        self.current().ok_or_else(|| {
            AppError::not_authenticated("Authentication required", json!({}))
        })
    }
}
