//! Engine configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any service
//! is constructed. Every option has a default, so an empty environment
//! yields a usable configuration.
//!
//! ## Link Options
//!
//! - `LINK_DEFAULT_EXPIRATION_HOURS` - Lifetime of a link created without an explicit expiration (default: 24)
//! - `LINK_MAX_EXPIRATION_DAYS` - Farthest allowed expiration horizon (default: 365, max: 36500)
//! - `LINK_MIN_EXPIRATION_MINUTES` - Minimum lead time of an explicit expiration (default: 5)
//! - `LINK_DEFAULT_MAX_CLICKS` - Click budget of a link created without one (default: 10)
//! - `LINK_MAX_CLICKS_LIMIT` - Absolute click budget ceiling (default: 10000)
//! - `LINK_CODE_LENGTH` - Length of generated codes (default: 8)
//! - `LINK_SHORT_URL_PREFIX` - Prefix prepended to codes (default: `clck.ru/`)
//! - `LINK_MAX_CODE_ATTEMPTS` - Collision retries before giving up (default: 10)
//!
//! ## Security Options
//!
//! - `SECURITY_ALLOWED_SCHEMES` - Comma-separated URL schemes (default: `http,https,ftp`)
//! - `SECURITY_MAX_URL_LENGTH` - Longest accepted URL (default: 2048)
//! - `AUTH_MIN_PASSWORD_LENGTH` - Shortest accepted password (default: 4)
//!
//! ## Runtime Options
//!
//! - `SWEEP_INTERVAL_SECONDS` - Background sweep period, `0` disables it (default: 0)
//! - `EVENT_QUEUE_CAPACITY` - Buffered lifecycle notifications (default: 1024, min: 16)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

/// Farthest expiration horizon accepted for `LINK_MAX_EXPIRATION_DAYS`.
pub const MAX_EXPIRATION_DAYS_CEILING: i64 = 36_500;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub default_expiration_hours: i64,
    pub max_expiration_days: i64,
    pub min_expiration_minutes: i64,
    pub default_max_clicks: u32,
    pub max_clicks_limit: u32,
    pub code_length: usize,
    pub short_url_prefix: String,
    /// Lower-cased URL schemes accepted at link creation.
    pub allowed_schemes: BTreeSet<String>,
    pub max_url_length: usize,
    /// Upper bound on code generation attempts for a single link.
    pub max_code_attempts: usize,
    pub min_password_length: usize,
    /// Period of the background sweeper in seconds; `0` disables it.
    pub sweep_interval_seconds: u64,
    pub event_queue_capacity: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_expiration_hours: 24,
            max_expiration_days: 365,
            min_expiration_minutes: 5,
            default_max_clicks: 10,
            max_clicks_limit: 10_000,
            code_length: 8,
            short_url_prefix: "clck.ru/".to_string(),
            allowed_schemes: parse_schemes("http,https,ftp"),
            max_url_length: 2048,
            max_code_attempts: 10,
            min_password_length: 4,
            sweep_interval_seconds: 0,
            event_queue_capacity: 1024,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let allowed_schemes = env::var("SECURITY_ALLOWED_SCHEMES")
            .map(|v| parse_schemes(&v))
            .unwrap_or(defaults.allowed_schemes);

        Ok(Self {
            default_expiration_hours: parse_var(
                "LINK_DEFAULT_EXPIRATION_HOURS",
                defaults.default_expiration_hours,
            )?,
            max_expiration_days: parse_var("LINK_MAX_EXPIRATION_DAYS", defaults.max_expiration_days)?,
            min_expiration_minutes: parse_var(
                "LINK_MIN_EXPIRATION_MINUTES",
                defaults.min_expiration_minutes,
            )?,
            default_max_clicks: parse_var("LINK_DEFAULT_MAX_CLICKS", defaults.default_max_clicks)?,
            max_clicks_limit: parse_var("LINK_MAX_CLICKS_LIMIT", defaults.max_clicks_limit)?,
            code_length: parse_var("LINK_CODE_LENGTH", defaults.code_length)?,
            short_url_prefix: env::var("LINK_SHORT_URL_PREFIX")
                .unwrap_or(defaults.short_url_prefix),
            allowed_schemes,
            max_url_length: parse_var("SECURITY_MAX_URL_LENGTH", defaults.max_url_length)?,
            max_code_attempts: parse_var("LINK_MAX_CODE_ATTEMPTS", defaults.max_code_attempts)?,
            min_password_length: parse_var(
                "AUTH_MIN_PASSWORD_LENGTH",
                defaults.min_password_length,
            )?,
            sweep_interval_seconds: parse_var(
                "SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            )?,
            event_queue_capacity: parse_var("EVENT_QUEUE_CAPACITY", defaults.event_queue_capacity)?,
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any expiration bound is non-positive or the minimum lead exceeds the horizon
    /// - the default expiration falls outside the allowed window
    /// - the click limits are zero or the default exceeds the ceiling
    /// - `code_length` is outside `4..=64`
    /// - no URL scheme is allowed
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.default_expiration_hours <= 0 {
            anyhow::bail!(
                "LINK_DEFAULT_EXPIRATION_HOURS must be positive, got {}",
                self.default_expiration_hours
            );
        }

        if self.max_expiration_days <= 0 || self.max_expiration_days > MAX_EXPIRATION_DAYS_CEILING {
            anyhow::bail!(
                "LINK_MAX_EXPIRATION_DAYS must be between 1 and {}, got {}",
                MAX_EXPIRATION_DAYS_CEILING,
                self.max_expiration_days
            );
        }
        let horizon_minutes = self.max_expiration_days * 24 * 60;

        if self.min_expiration_minutes < 0 {
            anyhow::bail!(
                "LINK_MIN_EXPIRATION_MINUTES must not be negative, got {}",
                self.min_expiration_minutes
            );
        }

        if self.min_expiration_minutes > horizon_minutes {
            anyhow::bail!("LINK_MIN_EXPIRATION_MINUTES exceeds the maximum expiration horizon");
        }

        let default_minutes = self
            .default_expiration_hours
            .checked_mul(60)
            .unwrap_or(i64::MAX);
        if default_minutes < self.min_expiration_minutes || default_minutes > horizon_minutes {
            anyhow::bail!(
                "LINK_DEFAULT_EXPIRATION_HOURS ({}) is outside the allowed expiration window",
                self.default_expiration_hours
            );
        }

        if self.max_clicks_limit == 0 {
            anyhow::bail!("LINK_MAX_CLICKS_LIMIT must be at least 1");
        }

        if self.default_max_clicks == 0 || self.default_max_clicks > self.max_clicks_limit {
            anyhow::bail!(
                "LINK_DEFAULT_MAX_CLICKS must be between 1 and {}, got {}",
                self.max_clicks_limit,
                self.default_max_clicks
            );
        }

        if !(4..=64).contains(&self.code_length) {
            anyhow::bail!(
                "LINK_CODE_LENGTH must be between 4 and 64, got {}",
                self.code_length
            );
        }

        if self.max_code_attempts == 0 {
            anyhow::bail!("LINK_MAX_CODE_ATTEMPTS must be at least 1");
        }

        if self.allowed_schemes.is_empty() {
            anyhow::bail!("SECURITY_ALLOWED_SCHEMES must list at least one scheme");
        }

        if self.max_url_length == 0 {
            anyhow::bail!("SECURITY_MAX_URL_LENGTH must be greater than 0");
        }

        if self.event_queue_capacity < 16 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY must be at least 16, got {}",
                self.event_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Returns whether the background sweeper should run.
    pub fn is_sweep_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Expiration: default {}h, min lead {}m, max {}d",
            self.default_expiration_hours,
            self.min_expiration_minutes,
            self.max_expiration_days
        );
        tracing::info!(
            "  Clicks: default {}, ceiling {}",
            self.default_max_clicks,
            self.max_clicks_limit
        );
        tracing::info!(
            "  Codes: length {}, prefix '{}'",
            self.code_length,
            self.short_url_prefix
        );
        tracing::info!(
            "  Allowed schemes: {}",
            self.allowed_schemes
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(",")
        );

        if self.is_sweep_enabled() {
            tracing::info!("  Sweeper: every {}s", self.sweep_interval_seconds);
        } else {
            tracing::info!("  Sweeper: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated scheme list into a lower-cased set.
fn parse_schemes(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
