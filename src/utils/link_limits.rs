//! Range checks for owner-supplied click budgets and expiration times.

use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Validates a click budget against the configured ceiling.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `max_clicks` is zero or above `limit`.
pub fn validate_max_clicks(max_clicks: u32, limit: u32) -> Result<(), AppError> {
    if max_clicks < 1 {
        return Err(AppError::bad_request(
            "Max clicks must be at least 1",
            json!({ "max_clicks": max_clicks }),
        ));
    }

    if max_clicks > limit {
        return Err(AppError::bad_request(
            format!("Max clicks cannot exceed {limit}"),
            json!({ "max_clicks": max_clicks, "limit": limit }),
        ));
    }

    Ok(())
}

/// Validates an expiration time relative to `now`.
///
/// The accepted window is `[now + min_lead_minutes, now + max_horizon_days]`,
/// both ends inclusive.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `expires_at` falls outside the window.
pub fn validate_expiration(
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
    min_lead_minutes: i64,
    max_horizon_days: i64,
) -> Result<(), AppError> {
    let (Some(earliest), Some(latest)) = (
        Duration::try_minutes(min_lead_minutes).and_then(|d| now.checked_add_signed(d)),
        Duration::try_days(max_horizon_days).and_then(|d| now.checked_add_signed(d)),
    ) else {
        return Err(AppError::bad_request(
            "Expiration window is out of range",
            json!({ "min_lead_minutes": min_lead_minutes, "max_horizon_days": max_horizon_days }),
        ));
    };

    if expires_at < earliest {
        return Err(AppError::bad_request(
            format!("Expiration date must be at least {min_lead_minutes} minutes in the future"),
            json!({ "expires_at": expires_at, "earliest": earliest }),
        ));
    }

    if expires_at > latest {
        return Err(AppError::bad_request(
            format!("Expiration date cannot be more than {max_horizon_days} days in the future"),
            json!({ "expires_at": expires_at, "latest": latest }),
        ));
    }

    Ok(())
}
