//! Event sink that reports notifications through `tracing`.

use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;
use tracing::info;

/// Writes every notification as an `INFO` event under the `link_events` target.
///
/// # Example Logs
///
/// ```text
/// INFO link_events: Link created code=Ab3dE6gH url=https://example.com expires_at=... max_clicks=10
/// INFO link_events: Link expired code=Ab3dE6gH created_at=... expires_at=...
/// INFO link_events: Click limit reached code=Ab3dE6gH click_count=10 max_clicks=10
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, event: LinkEvent) {
        let at = event.occurred_at();
        match &event {
            LinkEvent::Created { link, .. } => info!(
                target: "link_events",
                code = %link.code,
                url = %link.original_url,
                expires_at = %link.expires_at,
                max_clicks = link.max_clicks,
                %at,
                "Link created"
            ),
            LinkEvent::Expired { link, .. } => info!(
                target: "link_events",
                code = %link.code,
                created_at = %link.created_at,
                expires_at = %link.expires_at,
                %at,
                "Link expired"
            ),
            LinkEvent::LimitExceeded { link, .. } => info!(
                target: "link_events",
                code = %link.code,
                click_count = link.click_count,
                max_clicks = link.max_clicks,
                %at,
                "Click limit reached"
            ),
        }
    }
}
