//! Capability through which services publish lifecycle notifications.

use crate::domain::link_event::LinkEvent;

/// Receiver of link lifecycle notifications.
///
/// Called synchronously from inside service operations, so implementations
/// must not block: buffer, log, or drop instead.
///
/// # Implementations
///
/// - [`crate::infrastructure::events::TracingEventSink`] - Console notifier via `tracing`
/// - [`crate::infrastructure::events::ChannelEventSink`] - Hands events to a background consumer
/// - [`crate::infrastructure::events::RecordingEventSink`] - Keeps events in memory for inspection
/// - [`crate::infrastructure::events::NullEventSink`] - Discards everything
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn publish(&self, event: LinkEvent);
}
