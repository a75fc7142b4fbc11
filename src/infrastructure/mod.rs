//! Infrastructure layer for storage and notification delivery.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`events`] - Event sink implementations (tracing, channel, recording, no-op)
//! - [`persistence`] - In-memory repository implementations

pub mod events;
pub mod persistence;
