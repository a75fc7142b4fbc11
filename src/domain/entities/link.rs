//! Short link entity and its access-time state machine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// A registered short link.
///
/// `code`, `original_url`, `owner_id` and `created_at` never change after
/// creation. `click_count` is only advanced by [`ShortLink::register_click`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub id: Uuid,
    pub code: String,
    pub original_url: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u32,
    pub max_clicks: u32,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ShortLink {
    /// Creates a new, never-visited link.
    pub fn new(
        code: String,
        original_url: String,
        owner_id: Uuid,
        expires_at: DateTime<Utc>,
        max_clicks: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            original_url,
            owner_id,
            created_at: Utc::now(),
            expires_at,
            click_count: 0,
            max_clicks,
            title: None,
            description: None,
        }
    }

    /// Returns true once `now` is strictly past the expiration timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns true when no clicks remain in the budget.
    pub fn is_exhausted(&self) -> bool {
        self.click_count >= self.max_clicks
    }

    pub fn remaining_clicks(&self) -> u32 {
        self.max_clicks.saturating_sub(self.click_count)
    }

    /// Reason this link should leave the registry at `now`, if any.
    ///
    /// Expiration takes precedence over the click limit.
    pub fn eviction_reason(&self, now: DateTime<Utc>) -> Option<EvictionReason> {
        if self.is_expired_at(now) {
            Some(EvictionReason::Expired)
        } else if self.is_exhausted() {
            Some(EvictionReason::LimitExceeded)
        } else {
            None
        }
    }

    /// Applies one access to the link.
    ///
    /// The caller must evict the link whenever the returned decision
    /// [`ClickDecision::evicts`].
    pub fn register_click(&mut self, now: DateTime<Utc>) -> ClickDecision {
        if let Some(reason) = self.eviction_reason(now) {
            return ClickDecision::Rejected(reason);
        }

        self.click_count += 1;
        ClickDecision::Counted {
            exhausted: self.is_exhausted(),
        }
    }

    /// Applies a patch atomically.
    ///
    /// Every supplied field is checked before anything is written, so a
    /// rejected patch leaves the link untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `max_clicks` would drop below the
    /// current click count.
    pub fn apply_patch(&mut self, patch: &LinkPatch) -> Result<(), AppError> {
        if let FieldUpdate::Set(max_clicks) = patch.max_clicks
            && max_clicks < self.click_count
        {
            return Err(AppError::bad_request(
                "Max clicks cannot be lower than the current click count",
                json!({
                    "code": self.code,
                    "max_clicks": max_clicks,
                    "click_count": self.click_count,
                }),
            ));
        }

        if let FieldUpdate::Set(title) = &patch.title {
            self.title = title.clone();
        }
        if let FieldUpdate::Set(description) = &patch.description {
            self.description = description.clone();
        }
        if let FieldUpdate::Set(max_clicks) = patch.max_clicks {
            self.max_clicks = max_clicks;
        }
        if let FieldUpdate::Set(expires_at) = patch.expires_at {
            self.expires_at = expires_at;
        }

        Ok(())
    }
}

/// Why a link left the registry without an explicit delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    Expired,
    LimitExceeded,
}

/// Result of [`ShortLink::register_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDecision {
    /// The access was counted; `exhausted` is set when it used the last click.
    Counted { exhausted: bool },
    /// The access was refused and the link must be evicted.
    Rejected(EvictionReason),
}

impl ClickDecision {
    pub fn evicts(&self) -> bool {
        matches!(
            self,
            ClickDecision::Counted { exhausted: true } | ClickDecision::Rejected(_)
        )
    }
}

/// Outcome of an access as recorded by a link repository.
///
/// Each variant carries the link as it stood right after the access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Redirect { link: ShortLink, exhausted: bool },
    Rejected { link: ShortLink, reason: EvictionReason },
}

/// Explicit "leave it" / "replace it" marker for patch fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Unchanged => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldUpdate::Unchanged, FieldUpdate::Set)
    }
}

/// Owner-requested change to an existing link.
///
/// `title: Set(None)` clears the title; `Unchanged` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub title: FieldUpdate<Option<String>>,
    pub description: FieldUpdate<Option<String>>,
    pub max_clicks: FieldUpdate<u32>,
    pub expires_at: FieldUpdate<DateTime<Utc>>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        !(self.title.is_set()
            || self.description.is_set()
            || self.max_clicks.is_set()
            || self.expires_at.is_set())
    }
}

/// Caller input for creating a link.
///
/// Omitted limits fall back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_clicks: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}
