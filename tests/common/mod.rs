#![allow(dead_code)]

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use short_link_service::config::Config;
use short_link_service::domain::entities::ShortLink;
use short_link_service::domain::repositories::LinkRepository;
use short_link_service::infrastructure::events::RecordingEventSink;
use short_link_service::state::AppState;
use short_link_service::utils::code_generator::CodeGenerator;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret";

/// Hands out a fixed list of codes, repeating the last one when exhausted.
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl SequenceCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(codes.last().copied().unwrap_or("fallback").to_string()),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self, _original_url: &str) -> String {
        match self.codes.lock().pop_front() {
            Some(code) => {
                *self.last.lock() = code.clone();
                code
            }
            None => self.last.lock().clone(),
        }
    }
}

pub fn create_test_state() -> (AppState, Arc<RecordingEventSink>) {
    create_test_state_with(Config::default())
}

pub fn create_test_state_with(config: Config) -> (AppState, Arc<RecordingEventSink>) {
    let events = Arc::new(RecordingEventSink::new());
    let state = AppState::new(config, events.clone());
    (state, events)
}

pub fn create_state_with_codes(
    config: Config,
    codes: &[&str],
) -> (AppState, Arc<RecordingEventSink>) {
    let events = Arc::new(RecordingEventSink::new());
    let state = AppState::with_generator(
        config,
        Arc::new(SequenceCodeGenerator::new(codes)),
        events.clone(),
    );
    (state, events)
}

/// Registers `login` and makes it the current session user.
pub async fn login_as(state: &AppState, login: &str) -> Uuid {
    if state
        .identity_service
        .authenticate(login, TEST_PASSWORD)
        .await
        .is_err()
    {
        state.register(login, TEST_PASSWORD).await.unwrap();
    }
    state.authenticate(login, TEST_PASSWORD).await.unwrap()
}

/// Stores a link directly, bypassing creation-time validation.
pub async fn insert_link(
    state: &AppState,
    owner_id: Uuid,
    code: &str,
    expires_at: DateTime<Utc>,
    click_count: u32,
    max_clicks: u32,
) -> ShortLink {
    let mut link = ShortLink::new(
        code.to_string(),
        "https://example.com/stored".to_string(),
        owner_id,
        expires_at,
        max_clicks,
    );
    link.click_count = click_count;

    assert!(state.links.insert_unique(link.clone()).await.unwrap());
    link
}

pub async fn link_count(state: &AppState) -> usize {
    state.links.count().await.unwrap()
}
