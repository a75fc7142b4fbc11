//! Login and password shape checks.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

static LOGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("login pattern is valid"));

/// Validates a login before normalization.
///
/// Surrounding whitespace is ignored; the rest must be 3-20 letters,
/// digits, or underscores.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the login is blank or malformed.
pub fn validate_login(login: &str) -> Result<(), AppError> {
    let trimmed = login.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request("Login cannot be empty", json!({})));
    }

    if !LOGIN_PATTERN.is_match(trimmed) {
        return Err(AppError::bad_request(
            "Login must be 3-20 characters (letters, digits, underscores)",
            json!({ "login": trimmed }),
        ));
    }

    Ok(())
}

/// Validates password length.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the password has fewer than
/// `min_length` characters.
pub fn validate_password(password: &str, min_length: usize) -> Result<(), AppError> {
    let length = password.chars().count();

    if length < min_length {
        return Err(AppError::bad_request(
            format!("Password must contain at least {min_length} characters"),
            json!({ "provided_length": length }),
        ));
    }

    Ok(())
}
