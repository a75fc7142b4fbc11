//! Lifecycle notification delivery.
//!
//! Provides [`EventSink`](crate::domain::event_sink::EventSink) implementations:
//! - [`TracingEventSink`] - Writes each notification as a structured log line
//! - [`ChannelEventSink`] - Queues notifications for a background consumer
//! - [`RecordingEventSink`] - Keeps notifications in memory
//! - [`NullEventSink`] - Discards notifications

mod channel_sink;
mod null_sink;
mod recording_sink;
mod tracing_sink;

pub use channel_sink::{ChannelEventSink, run_event_worker};
pub use null_sink::NullEventSink;
pub use recording_sink::RecordingEventSink;
pub use tracing_sink::TracingEventSink;
