//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::{
    ClickDecision, ClickOutcome, EvictionReason, LinkPatch, ShortLink,
};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Both registry indices, always mutated together.
#[derive(Default)]
struct LinkStore {
    by_code: HashMap<String, ShortLink>,
    by_owner: HashMap<Uuid, HashSet<String>>,
}

impl LinkStore {
    fn insert(&mut self, link: ShortLink) {
        self.by_owner
            .entry(link.owner_id)
            .or_default()
            .insert(link.code.clone());
        self.by_code.insert(link.code.clone(), link);
    }

    fn remove(&mut self, code: &str) -> Option<ShortLink> {
        let link = self.by_code.remove(code)?;

        if let Some(codes) = self.by_owner.get_mut(&link.owner_id) {
            codes.remove(code);
            if codes.is_empty() {
                self.by_owner.remove(&link.owner_id);
            }
        }

        Some(link)
    }

    /// Looks up a link the actor is allowed to modify.
    fn owned_mut(&mut self, code: &str, actor_id: Uuid) -> Result<&mut ShortLink, AppError> {
        let link = self
            .by_code
            .get_mut(code)
            .ok_or_else(|| link_not_found(code))?;

        if link.owner_id != actor_id {
            return Err(AppError::access_denied(
                "You do not have permission to modify this link",
                json!({ "code": code }),
            ));
        }

        Ok(link)
    }

    fn inactive_codes<'a>(
        &self,
        codes: impl Iterator<Item = &'a String>,
        now: DateTime<Utc>,
    ) -> Vec<(String, EvictionReason)> {
        codes
            .filter_map(|code| {
                let link = self.by_code.get(code)?;
                link.eviction_reason(now).map(|reason| (code.clone(), reason))
            })
            .collect()
    }

    fn evict(&mut self, inactive: Vec<(String, EvictionReason)>) -> Vec<(ShortLink, EvictionReason)> {
        inactive
            .into_iter()
            .filter_map(|(code, reason)| self.remove(&code).map(|link| (link, reason)))
            .collect()
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

/// Process-local link registry.
///
/// A single lock covers both the code index and the owner index, and every
/// trait method completes its check-then-act sequence while holding it.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    store: RwLock<LinkStore>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_unique(&self, link: ShortLink) -> Result<bool, AppError> {
        let mut store = self.store.write();

        if store.by_code.contains_key(&link.code) {
            debug!(code = %link.code, "Code collision");
            return Ok(false);
        }

        store.insert(link);
        Ok(true)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.store.read().by_code.get(code).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let store = self.store.read();

        let mut links: Vec<ShortLink> = store
            .by_owner
            .get(&owner_id)
            .into_iter()
            .flatten()
            .filter_map(|code| store.by_code.get(code).cloned())
            .collect();

        links.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.code.cmp(&b.code)));
        Ok(links)
    }

    async fn update(
        &self,
        code: &str,
        actor_id: Uuid,
        patch: LinkPatch,
    ) -> Result<ShortLink, AppError> {
        let mut store = self.store.write();
        let link = store.owned_mut(code, actor_id)?;

        link.apply_patch(&patch)?;
        Ok(link.clone())
    }

    async fn delete(&self, code: &str, actor_id: Uuid) -> Result<ShortLink, AppError> {
        let mut store = self.store.write();
        store.owned_mut(code, actor_id)?;

        store.remove(code).ok_or_else(|| link_not_found(code))
    }

    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<ClickOutcome, AppError> {
        let mut store = self.store.write();

        let link = store
            .by_code
            .get_mut(code)
            .ok_or_else(|| link_not_found(code))?;

        let decision = link.register_click(now);
        let snapshot = link.clone();

        if decision.evicts() {
            store.remove(code);
        }

        Ok(match decision {
            ClickDecision::Counted { exhausted } => ClickOutcome::Redirect {
                link: snapshot,
                exhausted,
            },
            ClickDecision::Rejected(reason) => ClickOutcome::Rejected {
                link: snapshot,
                reason,
            },
        })
    }

    async fn evict_inactive(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<(ShortLink, EvictionReason)>, AppError> {
        let mut store = self.store.write();

        let inactive = match store.by_owner.get(&owner_id) {
            Some(codes) => store.inactive_codes(codes.iter(), now),
            None => return Ok(Vec::new()),
        };

        Ok(store.evict(inactive))
    }

    async fn evict_all_inactive(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(ShortLink, EvictionReason)>, AppError> {
        let mut store = self.store.write();

        let inactive = store.inactive_codes(store.by_code.keys(), now);
        Ok(store.evict(inactive))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.store.read().by_code.len())
    }
}
