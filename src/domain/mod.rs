//! Domain layer containing business entities and contracts.
//!
//! Defines entities, repository interfaces, and the notification capability
//! independent of how they are stored or delivered.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures and the link state machine
//! - [`repositories`] - Storage trait definitions
//! - [`link_event`] - Lifecycle notification model
//! - [`event_sink`] - Capability that receives notifications
//!
//! # Resolve Flow
//!
//! 1. Caller asks [`crate::application::services::LifecycleService`] to resolve a code
//! 2. [`repositories::LinkRepository::record_click`] applies
//!    [`entities::ShortLink::register_click`] under the repository lock
//! 3. Terminal transitions evict the link in the same step
//! 4. A [`link_event::LinkEvent`] is published to the [`event_sink::EventSink`]

pub mod entities;
pub mod event_sink;
pub mod link_event;
pub mod repositories;
