//! Shared application state and the in-process call surface.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::services::{IdentityService, LifecycleService, LinkService};
use crate::application::session::Session;
use crate::config::Config;
use crate::domain::entities::{LinkPatch, NewLink, ShortLink, User};
use crate::domain::event_sink::EventSink;
use crate::error::AppError;
use crate::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};
use crate::utils::code_generator::{CodeGenerator, SaltedHashCodeGenerator};

/// Services shared by every caller, plus the single current session.
///
/// The `*_link` methods act on behalf of the session user. The services
/// themselves take the acting user explicitly and can be used directly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub links: Arc<InMemoryLinkRepository>,
    pub link_service: Arc<LinkService<InMemoryLinkRepository>>,
    pub lifecycle_service: Arc<LifecycleService<InMemoryLinkRepository>>,
    pub identity_service: Arc<IdentityService<InMemoryUserRepository>>,
    pub session: Arc<Session>,
}

impl AppState {
    /// Builds in-memory state with the salted-hash code generator.
    pub fn new(config: Config, events: Arc<dyn EventSink>) -> Self {
        let generator = Arc::new(SaltedHashCodeGenerator::new(config.code_length));
        Self::with_generator(config, generator, events)
    }

    /// Builds in-memory state with a caller-supplied code generator.
    pub fn with_generator(
        config: Config,
        generator: Arc<dyn CodeGenerator>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let config = Arc::new(config);
        let links = Arc::new(InMemoryLinkRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        let link_service = Arc::new(LinkService::new(
            links.clone(),
            generator,
            events.clone(),
            config.clone(),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(links.clone(), events));
        let identity_service = Arc::new(IdentityService::new(users, config.min_password_length));

        Self {
            config,
            links,
            link_service,
            lifecycle_service,
            identity_service,
            session: Arc::new(Session::new()),
        }
    }

    pub async fn register(&self, login: &str, password: &str) -> Result<User, AppError> {
        self.identity_service.register(login, password).await
    }

    /// Authenticates and makes the user current.
    ///
    /// A failed attempt leaves the session as it was.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Uuid, AppError> {
        let user = self.identity_service.authenticate(login, password).await?;
        let id = user.id;

        self.session.login(user);
        Ok(id)
    }

    pub fn logout(&self) -> Option<User> {
        let user = self.session.logout();
        if let Some(user) = &user {
            info!(user_id = %user.id, "User logged out");
        }
        user
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    /// Creates a link owned by the current user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`] without a session, otherwise
    /// whatever [`LinkService::create`] returns.
    pub async fn create_link(&self, new_link: NewLink) -> Result<ShortLink, AppError> {
        let user = self.session.require()?;
        self.link_service.create(user.id, new_link).await
    }

    /// Resolves a code; works with or without a session.
    pub async fn resolve_link(&self, code: &str) -> Result<String, AppError> {
        let requester = self.session.current().map(|u| u.id);
        self.lifecycle_service.resolve(code, requester).await
    }

    pub async fn update_link(&self, code: &str, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let user = self.session.require()?;
        self.link_service.update(code, user.id, patch).await
    }

    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        let user = self.session.require()?;
        self.link_service.delete(code, user.id).await
    }

    /// Lists the current user's links after evicting stale ones.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        let user = self.session.require()?;

        self.lifecycle_service.sweep(user.id).await?;
        self.link_service.list_by_owner(user.id).await
    }

    pub async fn get_link(&self, code: &str) -> Result<ShortLink, AppError> {
        self.link_service.get(code).await
    }

    pub fn short_url(&self, link: &ShortLink) -> String {
        self.link_service.short_url(link)
    }
}
