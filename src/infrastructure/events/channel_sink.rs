//! Event sink backed by a bounded channel, plus the consumer loop.

use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;

/// Hands notifications to a background task without blocking the caller.
///
/// When the queue is full or the consumer has gone away the event is
/// dropped with a warning; the operation that produced it still succeeds.
#[derive(Clone)]
pub struct ChannelEventSink {
    tx: mpsc::Sender<LinkEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<LinkEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LinkEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: LinkEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(
                    kind = event.kind(),
                    code = %event.link().code,
                    "Event queue full, dropping notification"
                );
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    kind = event.kind(),
                    code = %event.link().code,
                    "Event consumer stopped, dropping notification"
                );
            }
        }
    }
}

/// Forwards queued events to `sink` until every sender is dropped.
pub async fn run_event_worker(mut rx: mpsc::Receiver<LinkEvent>, sink: Arc<dyn EventSink>) {
    while let Some(event) = rx.recv().await {
        sink.publish(event);
    }

    debug!("Event worker stopped");
}
