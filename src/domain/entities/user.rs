//! User entity owning short links.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered user.
///
/// `login` is stored normalized (trimmed, lower-cased) and is the
/// uniqueness key. The credential is an Argon2 PHC string and is never
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user from an already normalized login and hashed credential.
    pub fn new(login: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            login,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Normalizes a login into its uniqueness key.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_lowercase()
}
