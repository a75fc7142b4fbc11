//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A registered short link with its click budget and expiry
//! - [`User`] - An account that owns links
//!
//! # Design Pattern
//!
//! Creation and mutation inputs are separate types:
//! - [`NewLink`] - Caller input for creating a link
//! - [`LinkPatch`] - Partial, all-or-nothing update built from [`FieldUpdate`] fields
//!
//! Access-time transitions live on the entity itself
//! ([`ShortLink::register_click`]) so every repository applies the same rules.

pub mod link;
pub mod user;

pub use link::{
    ClickDecision, ClickOutcome, EvictionReason, FieldUpdate, LinkPatch, NewLink, ShortLink,
};
pub use user::{User, normalize_login};
