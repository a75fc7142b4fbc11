//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and lifecycle rules. Services consume repository traits and are
//! composed by [`crate::state::AppState`].
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup, and owner-gated edits
//! - [`services::lifecycle_service::LifecycleService`] - Resolution, expiration, and click-limit eviction
//! - [`services::identity_service::IdentityService`] - User registration and authentication
//!
//! [`session::Session`] tracks the current identity and [`sweeper`] runs
//! periodic eviction in the background.

pub mod services;
pub mod session;
pub mod sweeper;
