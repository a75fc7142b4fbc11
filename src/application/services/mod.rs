//! Business logic services for the application layer.

pub mod identity_service;
pub mod lifecycle_service;
pub mod link_service;

pub use identity_service::IdentityService;
pub use lifecycle_service::LifecycleService;
pub use link_service::LinkService;
