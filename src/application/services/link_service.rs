//! Link creation, lookup, and owner-gated mutation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::entities::{LinkPatch, NewLink, ShortLink};
use crate::domain::event_sink::EventSink;
use crate::domain::link_event::LinkEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::link_limits::{validate_expiration, validate_max_clicks};
use crate::utils::url_validator::validate_url;

/// Service owning the link registry.
///
/// Validates caller input against the configured limits, generates
/// collision-free codes, and enforces ownership on every mutation.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
    events: Arc<dyn EventSink>,
    config: Arc<Config>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        generator: Arc<dyn CodeGenerator>,
        events: Arc<dyn EventSink>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            link_repository,
            generator,
            events,
            config,
        }
    }

    /// Creates a short link owned by `owner_id`.
    ///
    /// Omitted limits fall back to the configured defaults: `max_clicks`
    /// to `default_max_clicks`, `expires_at` to now plus
    /// `default_expiration_hours`.
    ///
    /// # Code Generation
    ///
    /// Codes are generated and inserted with an atomic check-and-insert,
    /// retrying on collision up to `max_code_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is malformed, too long, uses a disallowed scheme, or has no host
    /// - `max_clicks` is outside `1..=max_clicks_limit`
    /// - `expires_at` is outside the allowed window
    ///
    /// Returns [`AppError::CodeSpaceExhausted`] if every attempt collided.
    pub async fn create(&self, owner_id: Uuid, new_link: NewLink) -> Result<ShortLink, AppError> {
        validate_url(
            &new_link.url,
            &self.config.allowed_schemes,
            self.config.max_url_length,
        )
        .map_err(|e| AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() })))?;

        let max_clicks = new_link.max_clicks.unwrap_or(self.config.default_max_clicks);
        validate_max_clicks(max_clicks, self.config.max_clicks_limit)?;

        let now = Utc::now();
        let expires_at = match new_link.expires_at {
            Some(expires_at) => expires_at,
            None => Duration::try_hours(self.config.default_expiration_hours)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .ok_or_else(|| {
                    AppError::internal(
                        "Default expiration is out of range",
                        json!({ "default_expiration_hours": self.config.default_expiration_hours }),
                    )
                })?,
        };
        validate_expiration(
            expires_at,
            now,
            self.config.min_expiration_minutes,
            self.config.max_expiration_days,
        )?;

        for attempt in 1..=self.config.max_code_attempts {
            let code = self.generator.generate(&new_link.url);

            let mut link = ShortLink::new(
                code,
                new_link.url.clone(),
                owner_id,
                expires_at,
                max_clicks,
            );
            link.title = new_link.title.clone();
            link.description = new_link.description.clone();

            if self.link_repository.insert_unique(link.clone()).await? {
                info!(
                    code = %link.code,
                    owner = %owner_id,
                    max_clicks,
                    expires_at = %expires_at,
                    "Short link created"
                );
                self.events.publish(LinkEvent::created(&link));
                return Ok(link);
            }

            debug!(attempt, "Generated code collided, retrying");
        }

        warn!(
            attempts = self.config.max_code_attempts,
            "Failed to generate unique code"
        );
        Err(AppError::code_space_exhausted(
            "Failed to generate unique code",
            json!({
                "reason": "Too many collisions",
                "attempts": self.config.max_code_attempts,
            }),
        ))
    }

    /// Retrieves a registered link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the code.
    pub async fn get(&self, code: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Updates a link on behalf of its owner.
    ///
    /// The code and owner are checked first, then every supplied field is
    /// validated before anything is written; a rejected call changes nothing.
    /// The click-count floor is rechecked by the repository under its lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the code.
    /// Returns [`AppError::AccessDenied`] if `actor_id` is not the owner.
    /// Returns [`AppError::Validation`] if:
    /// - `max_clicks` is outside `1..=max_clicks_limit` or below the click count
    /// - `expires_at` is outside the allowed window
    pub async fn update(
        &self,
        code: &str,
        actor_id: Uuid,
        patch: LinkPatch,
    ) -> Result<ShortLink, AppError> {
        let current = self.get(code).await?;
        if current.owner_id != actor_id {
            debug!(code = %code, actor = %actor_id, "Update refused for non-owner");
            return Err(AppError::access_denied(
                "You do not have permission to modify this link",
                json!({ "code": code }),
            ));
        }

        if patch.is_empty() {
            debug!(code = %code, "Empty patch, nothing to update");
            return Ok(current);
        }

        if let Some(max_clicks) = patch.max_clicks.as_set() {
            validate_max_clicks(*max_clicks, self.config.max_clicks_limit)?;
        }

        if let Some(expires_at) = patch.expires_at.as_set() {
            validate_expiration(
                *expires_at,
                Utc::now(),
                self.config.min_expiration_minutes,
                self.config.max_expiration_days,
            )?;
        }

        let link = self.link_repository.update(code, actor_id, patch).await?;
        info!(code = %code, owner = %actor_id, "Short link updated");

        Ok(link)
    }

    /// Deletes a link on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the code.
    /// Returns [`AppError::AccessDenied`] if `actor_id` is not the owner.
    pub async fn delete(&self, code: &str, actor_id: Uuid) -> Result<(), AppError> {
        self.link_repository.delete(code, actor_id).await?;
        info!(code = %code, owner = %actor_id, "Short link deleted");

        Ok(())
    }

    /// Lists the links currently registered for an owner.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Constructs the full short URL from the configured prefix and code.
    pub fn short_url(&self, link: &ShortLink) -> String {
        format!("{}{}", self.config.short_url_prefix, link.code)
    }
}
