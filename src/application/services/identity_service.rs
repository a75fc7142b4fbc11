//! User registration and credential checks.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{User, normalize_login};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::input_validator::{validate_login, validate_password};
use crate::utils::password::{hash_password, verify_password};

/// Service for registering users and checking their credentials.
///
/// Logins are case-insensitive: they are trimmed and lowercased before
/// storage and lookup. Passwords are stored as Argon2id PHC strings.
pub struct IdentityService<U: UserRepository> {
    user_repository: Arc<U>,
    min_password_length: usize,
}

impl<U: UserRepository> IdentityService<U> {
    /// Creates a new identity service.
    ///
    /// # Arguments
    ///
    /// - `user_repository` - storage for registered users
    /// - `min_password_length` - shortest accepted password, in characters
    pub fn new(user_repository: Arc<U>, min_password_length: usize) -> Self {
        Self {
            user_repository,
            min_password_length,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the login or password is malformed.
    /// Returns [`AppError::AlreadyExists`] if the normalized login is taken.
    /// Returns [`AppError::Internal`] if hashing fails.
    pub async fn register(&self, login: &str, password: &str) -> Result<User, AppError> {
        validate_login(login)?;
        validate_password(password, self.min_password_length)?;

        let login = normalize_login(login);

        if self.user_repository.find_by_login(&login).await?.is_some() {
            return Err(login_taken(&login));
        }

        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))?;

        let user = self
            .user_repository
            .create(User::new(login, password_hash))
            .await?;

        info!(user_id = %user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Checks a login and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this login.
    /// Returns [`AppError::InvalidCredentials`] if the password does not match.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<User, AppError> {
        let login = normalize_login(login);

        let user = self
            .user_repository
            .find_by_login(&login)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found", json!({ "login": login }))
            })?;

        let password = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::internal("Password verification task failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Stored credential is unreadable", json!({ "reason": e.to_string() })))?;

        if !matches {
            debug!(login = %login, "Password mismatch");
            return Err(AppError::invalid_credentials(
                "Invalid login or password",
                json!({ "login": login }),
            ));
        }

        info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }
}

fn login_taken(login: &str) -> AppError {
    AppError::already_exists(
        format!("User with login '{login}' already exists"),
        json!({ "login": login }),
    )
}
