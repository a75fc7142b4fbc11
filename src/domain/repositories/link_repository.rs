//! Repository trait for short link storage.

use crate::domain::entities::{ClickOutcome, EvictionReason, LinkPatch, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for registered short links.
///
/// Every method that checks and then mutates a link does both under a single
/// critical section, so callers never observe or create a state where
/// `click_count > max_clicks` or where two links share a code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - Lock-guarded maps
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Registers a link unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the link was stored
    /// - `Ok(false)` if another registered link already uses the code
    async fn insert_unique(&self, link: ShortLink) -> Result<bool, AppError>;

    /// Finds a registered link by code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Lists the links registered for an owner, oldest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ShortLink>, AppError>;

    /// Applies a patch on behalf of `actor_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not registered.
    /// Returns [`AppError::AccessDenied`] if `actor_id` does not own the link.
    /// Returns [`AppError::Validation`] if the patch conflicts with the link's
    /// click count; nothing is changed in that case.
    async fn update(
        &self,
        code: &str,
        actor_id: Uuid,
        patch: LinkPatch,
    ) -> Result<ShortLink, AppError>;

    /// Removes a link on behalf of `actor_id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::AccessDenied`] as for
    /// [`LinkRepository::update`].
    async fn delete(&self, code: &str, actor_id: Uuid) -> Result<ShortLink, AppError>;

    /// Records an access at `now`, evicting the link when the access
    /// expires or exhausts it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not registered.
    async fn record_click(&self, code: &str, now: DateTime<Utc>)
    -> Result<ClickOutcome, AppError>;

    /// Evicts the owner's links that are expired or out of clicks at `now`.
    async fn evict_inactive(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<(ShortLink, EvictionReason)>, AppError>;

    /// Evicts every expired or exhausted link at `now`.
    async fn evict_all_inactive(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(ShortLink, EvictionReason)>, AppError>;

    /// Counts registered links.
    async fn count(&self) -> Result<usize, AppError>;
}
