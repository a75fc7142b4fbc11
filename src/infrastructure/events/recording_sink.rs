//! Event sink that keeps notifications in memory.

use parking_lot::Mutex;

use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;

/// Collects published events in order.
///
/// Useful for embedding callers that poll for notifications and for tests
/// that assert on the exact sequence of transitions.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<LinkEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event published so far.
    pub fn events(&self) -> Vec<LinkEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns every event published so far.
    pub fn drain(&self) -> Vec<LinkEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Event kinds in publication order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(LinkEvent::kind).collect()
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: LinkEvent) {
        self.events.lock().push(event);
    }
}
