//! Lifecycle notification model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{EvictionReason, ShortLink};

/// Point-in-time view of a link attached to every notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSnapshot {
    pub code: String,
    pub original_url: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u32,
    pub max_clicks: u32,
}

impl From<&ShortLink> for LinkSnapshot {
    fn from(link: &ShortLink) -> Self {
        Self {
            code: link.code.clone(),
            original_url: link.original_url.clone(),
            owner_id: link.owner_id,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count: link.click_count,
            max_clicks: link.max_clicks,
        }
    }
}

/// A lifecycle transition published to an [`crate::domain::event_sink::EventSink`].
///
/// # Usage Flow
///
/// 1. A service detects a transition (creation, expiry, exhausted budget)
/// 2. It builds the event from the affected link
/// 3. The sink receives it synchronously and must return quickly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkEvent {
    Created {
        link: LinkSnapshot,
        occurred_at: DateTime<Utc>,
    },
    Expired {
        link: LinkSnapshot,
        occurred_at: DateTime<Utc>,
    },
    LimitExceeded {
        link: LinkSnapshot,
        occurred_at: DateTime<Utc>,
    },
}

impl LinkEvent {
    pub fn created(link: &ShortLink) -> Self {
        Self::Created {
            link: link.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn expired(link: &ShortLink) -> Self {
        Self::Expired {
            link: link.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn limit_exceeded(link: &ShortLink) -> Self {
        Self::LimitExceeded {
            link: link.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Builds the notification matching an eviction.
    pub fn evicted(link: &ShortLink, reason: EvictionReason) -> Self {
        match reason {
            EvictionReason::Expired => Self::expired(link),
            EvictionReason::LimitExceeded => Self::limit_exceeded(link),
        }
    }

    pub fn link(&self) -> &LinkSnapshot {
        match self {
            LinkEvent::Created { link, .. }
            | LinkEvent::Expired { link, .. }
            | LinkEvent::LimitExceeded { link, .. } => link,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LinkEvent::Created { occurred_at, .. }
            | LinkEvent::Expired { occurred_at, .. }
            | LinkEvent::LimitExceeded { occurred_at, .. } => *occurred_at,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LinkEvent::Created { .. } => "created",
            LinkEvent::Expired { .. } => "expired",
            LinkEvent::LimitExceeded { .. } => "limit_exceeded",
        }
    }
}
