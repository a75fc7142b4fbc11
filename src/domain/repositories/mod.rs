//! Repository trait definitions for the domain layer.
//!
//! These traits abstract storage of links and users. The in-memory
//! implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link registry with atomic lifecycle operations
//! - [`UserRepository`] - User accounts keyed by normalized login

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
