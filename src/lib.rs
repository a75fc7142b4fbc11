//! # Short Link Service
//!
//! An in-process short-link engine: users register, create links with a
//! click budget and an expiration, and resolve codes back to URLs. Links are
//! evicted the moment they expire or run out of clicks.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, lifecycle events, and repository traits
//! - **Application Layer** ([`application`]) - Link, lifecycle, and identity services
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory storage and event sinks
//! - **Utilities** ([`utils`]) - Code generation, validation, and password hashing
//!
//! [`state::AppState`] wires the layers together and exposes the call surface
//! a presentation layer would use.
//!
//! ## Features
//!
//! - Salted, collision-checked base-62 codes
//! - Click limits and expirations enforced atomically on access
//! - Owner-only updates and deletes with all-or-nothing patches
//! - Argon2id password storage
//! - Lifecycle notifications through pluggable sinks
//!
//! ## Quick Start
//!
//! ```bash
//! # Shorten a URL and follow it three times
//! cargo run -- https://example.com --max-clicks 2 --resolves 3
//! ```
//!
//! ## Configuration
//!
//! Engine configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{IdentityService, LifecycleService, LinkService};
    pub use crate::config::Config;
    pub use crate::domain::entities::{FieldUpdate, LinkPatch, NewLink, ShortLink, User};
    pub use crate::domain::event_sink::EventSink;
    pub use crate::domain::link_event::LinkEvent;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
