//! No-op event sink for disabled notifications.

use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;
use tracing::debug;

/// An event sink that does nothing.
///
/// # Use Cases
///
/// - Embedding the engine where nobody listens for notifications
/// - Tests that only care about registry state
pub struct NullEventSink;

impl NullEventSink {
    /// Creates a new NullEventSink instance.
    pub fn new() -> Self {
        debug!("Using NullEventSink (notifications disabled)");
        Self
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventSink {
    fn publish(&self, _event: LinkEvent) {}
}
