//! In-memory repository implementations.
//!
//! Concrete implementations of the domain repository traits. State lives
//! for the lifetime of the process; nothing is written to disk.
//!
//! # Repositories
//!
//! - [`InMemoryLinkRepository`] - Link registry with code and owner indices
//! - [`InMemoryUserRepository`] - User accounts keyed by normalized login

pub mod memory_link_repository;
pub mod memory_user_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use memory_user_repository::InMemoryUserRepository;
