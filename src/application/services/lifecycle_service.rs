//! Access-time lifecycle transitions: resolve and sweep.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::{ClickOutcome, EvictionReason, ShortLink};
use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Drives links from `Active` to their terminal states.
///
/// # State Machine
///
/// - `Active -> Expired` when accessed or swept after `expires_at`
/// - `Active -> LimitExceeded` when the click budget is used up
///
/// Both transitions evict the link and publish a notification. Eviction
/// does not depend on who triggered it.
pub struct LifecycleService<L: LinkRepository> {
    link_repository: Arc<L>,
    events: Arc<dyn EventSink>,
}

impl<L: LinkRepository> LifecycleService<L> {
    /// Creates a new lifecycle service.
    pub fn new(link_repository: Arc<L>, events: Arc<dyn EventSink>) -> Self {
        Self {
            link_repository,
            events,
        }
    }

    /// Resolves a code to its original URL, counting the access.
    ///
    /// Expiration is checked before the click limit. The access that uses
    /// the last click still succeeds; the link is evicted in the same step.
    ///
    /// `requester_id` is only recorded in logs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the code.
    /// Returns [`AppError::Expired`] if the link has expired (it is evicted).
    /// Returns [`AppError::LimitExceeded`] if no clicks remain (it is evicted).
    pub async fn resolve(&self, code: &str, requester_id: Option<Uuid>) -> Result<String, AppError> {
        let outcome = self.link_repository.record_click(code, Utc::now()).await?;

        match outcome {
            ClickOutcome::Redirect { link, exhausted } => {
                debug!(
                    code = %code,
                    requester = ?requester_id,
                    clicks = link.click_count,
                    remaining = link.remaining_clicks(),
                    "Link resolved"
                );

                if exhausted {
                    info!(code = %code, "Click limit reached, link evicted");
                    self.events.publish(LinkEvent::limit_exceeded(&link));
                }

                Ok(link.original_url)
            }
            ClickOutcome::Rejected { link, reason } => {
                info!(
                    code = %code,
                    requester = ?requester_id,
                    reason = ?reason,
                    "Inactive link evicted on access"
                );
                self.events.publish(LinkEvent::evicted(&link, reason));

                Err(rejection_error(&link, reason))
            }
        }
    }

    /// Evicts an owner's expired or exhausted links without an access.
    ///
    /// Returns the evicted links; a notification is published for each.
    pub async fn sweep(&self, owner_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let evicted = self
            .link_repository
            .evict_inactive(owner_id, Utc::now())
            .await?;

        if !evicted.is_empty() {
            info!(owner = %owner_id, count = evicted.len(), "Swept inactive links");
        }

        Ok(self.publish_evictions(evicted))
    }

    /// Evicts every expired or exhausted link in the registry.
    pub async fn sweep_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let evicted = self.link_repository.evict_all_inactive(Utc::now()).await?;

        if !evicted.is_empty() {
            info!(count = evicted.len(), "Swept inactive links");
        }

        Ok(self.publish_evictions(evicted))
    }

    fn publish_evictions(&self, evicted: Vec<(ShortLink, EvictionReason)>) -> Vec<ShortLink> {
        evicted
            .into_iter()
            .map(|(link, reason)| {
                self.events.publish(LinkEvent::evicted(&link, reason));
                link
            })
            .collect()
    }
}

fn rejection_error(link: &ShortLink, reason: EvictionReason) -> AppError {
    match reason {
        EvictionReason::Expired => AppError::expired(
            "Short link has expired",
            json!({ "code": link.code, "expires_at": link.expires_at }),
        ),
        EvictionReason::LimitExceeded => AppError::limit_exceeded(
            format!(
                "Click limit exceeded: {}/{}",
                link.click_count, link.max_clicks
            ),
            json!({
                "code": link.code,
                "click_count": link.click_count,
                "max_clicks": link.max_clicks,
            }),
        ),
    }
}
