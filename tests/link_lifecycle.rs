mod common;

use chrono::{Duration, Utc};
use short_link_service::config::Config;
use short_link_service::domain::entities::{FieldUpdate, LinkPatch, NewLink};
use short_link_service::error::AppError;
use short_link_service::utils::code_generator::BASE62_ALPHABET;

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_requires_session() {
    let (state, events) = common::create_test_state();

    let result = state.create_link(NewLink::new("https://example.com")).await;

    assert!(matches!(result, Err(AppError::NotAuthenticated { .. })));
    assert_eq!(common::link_count(&state).await, 0);
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn test_create_uses_defaults_and_prefix() {
    let (state, events) = common::create_test_state();
    let owner = common::login_as(&state, "alice").await;

    let link = state
        .create_link(NewLink::new("https://example.com/page"))
        .await
        .unwrap();

    assert_eq!(link.owner_id, owner);
    assert_eq!(link.max_clicks, 10);
    assert_eq!(link.click_count, 0);
    assert_eq!(link.code.len(), 8);
    assert!(link.code.bytes().all(|b| BASE62_ALPHABET.contains(&b)));
    assert_eq!(state.short_url(&link), format!("clck.ru/{}", link.code));
    assert_eq!(events.kinds(), vec!["created"]);

    let stored = state.get_link(&link.code).await.unwrap();
    assert_eq!(stored, link);
}

#[tokio::test]
async fn test_create_same_url_gives_distinct_codes() {
    let (state, _events) = common::create_test_state();
    let mut codes = std::collections::HashSet::new();

    for login in ["alice", "bob"] {
        common::login_as(&state, login).await;
        for _ in 0..50 {
            let link = state
                .create_link(NewLink::new("https://example.com/same"))
                .await
                .unwrap();
            assert!(codes.insert(link.code));
        }
    }

    assert_eq!(common::link_count(&state).await, 100);
}

#[tokio::test]
async fn test_create_rejects_expiration_inside_minimum_lead() {
    let (state, events) = common::create_test_state();
    common::login_as(&state, "alice").await;

    let mut new_link = NewLink::new("https://example.com");
    new_link.expires_at = Some(Utc::now() + Duration::minutes(1));

    let result = state.create_link(new_link).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert_eq!(common::link_count(&state).await, 0);
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;

    for url in ["", "not a url", "javascript:alert(1)", "mailto:a@b.c"] {
        let result = state.create_link(NewLink::new(url)).await;
        assert!(
            matches!(result, Err(AppError::Validation { .. })),
            "url {url:?} should be rejected"
        );
    }

    for max_clicks in [0, 10_001] {
        let mut new_link = NewLink::new("https://example.com");
        new_link.max_clicks = Some(max_clicks);
        let result = state.create_link(new_link).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    assert_eq!(common::link_count(&state).await, 0);
}

#[tokio::test]
async fn test_create_with_unrepresentable_horizon_fails_cleanly() {
    let config = Config {
        max_expiration_days: 200_000_000,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let (state, events) = common::create_test_state_with(config);
    common::login_as(&state, "alice").await;

    let result = state.create_link(NewLink::new("https://example.com")).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert_eq!(common::link_count(&state).await, 0);
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn test_create_retries_on_collision() {
    let (state, _events) =
        common::create_state_with_codes(Config::default(), &["dupe0001", "dupe0001", "next0001"]);
    common::login_as(&state, "alice").await;

    let first = state.create_link(NewLink::new("https://a.example")).await.unwrap();
    let second = state.create_link(NewLink::new("https://b.example")).await.unwrap();

    assert_eq!(first.code, "dupe0001");
    assert_eq!(second.code, "next0001");
}

#[tokio::test]
async fn test_create_gives_up_when_codes_keep_colliding() {
    let config = Config {
        max_code_attempts: 3,
        ..Config::default()
    };
    let (state, events) = common::create_state_with_codes(config, &["same0001"]);
    common::login_as(&state, "alice").await;

    state.create_link(NewLink::new("https://a.example")).await.unwrap();
    let result = state.create_link(NewLink::new("https://b.example")).await;

    assert!(matches!(result, Err(AppError::CodeSpaceExhausted { .. })));
    assert_eq!(common::link_count(&state).await, 1);
    assert_eq!(events.kinds(), vec!["created"]);
}

// ─── RESOLVE ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_click_link_is_gone_after_first_resolve() {
    let (state, events) = common::create_test_state();
    common::login_as(&state, "alice").await;

    let mut new_link = NewLink::new("https://example.com/once");
    new_link.max_clicks = Some(1);
    let link = state.create_link(new_link).await.unwrap();

    let url = state.resolve_link(&link.code).await.unwrap();
    assert_eq!(url, "https://example.com/once");

    let second = state.resolve_link(&link.code).await;
    assert!(matches!(second, Err(AppError::NotFound { .. })));
    assert_eq!(events.kinds(), vec!["created", "limit_exceeded"]);
}

#[tokio::test]
async fn test_resolve_counts_clicks() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;

    let mut new_link = NewLink::new("https://example.com");
    new_link.max_clicks = Some(5);
    let link = state.create_link(new_link).await.unwrap();

    for expected in 1..=3 {
        state.resolve_link(&link.code).await.unwrap();
        let stored = state.get_link(&link.code).await.unwrap();
        assert_eq!(stored.click_count, expected);
        assert!(stored.click_count <= stored.max_clicks);
    }
}

#[tokio::test]
async fn test_resolve_without_session() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;
    let link = state.create_link(NewLink::new("https://example.com")).await.unwrap();

    state.logout();

    assert_eq!(
        state.resolve_link(&link.code).await.unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn test_resolve_expired_link_evicts_it() {
    let (state, events) = common::create_test_state();
    let owner = common::login_as(&state, "alice").await;
    common::insert_link(&state, owner, "old00001", Utc::now() - Duration::minutes(1), 0, 5).await;

    let result = state.resolve_link("old00001").await;
    assert!(matches!(result, Err(AppError::Expired { .. })));
    assert_eq!(common::link_count(&state).await, 0);
    assert_eq!(events.kinds(), vec!["expired"]);

    let again = state.resolve_link("old00001").await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_resolve_expiry_checked_before_limit() {
    let (state, events) = common::create_test_state();
    let owner = common::login_as(&state, "alice").await;
    common::insert_link(&state, owner, "both0001", Utc::now() - Duration::minutes(1), 3, 3).await;

    let result = state.resolve_link("both0001").await;
    assert!(matches!(result, Err(AppError::Expired { .. })));
    assert_eq!(events.kinds(), vec!["expired"]);
}

#[tokio::test]
async fn test_resolve_evicts_regardless_of_requester() {
    let (state, events) = common::create_test_state();
    let owner = common::login_as(&state, "alice").await;
    common::insert_link(&state, owner, "full0001", Utc::now() + Duration::hours(1), 2, 2).await;

    common::login_as(&state, "bob").await;
    let result = state.resolve_link("full0001").await;

    assert!(matches!(result, Err(AppError::LimitExceeded { .. })));
    assert_eq!(common::link_count(&state).await, 0);
    assert_eq!(events.kinds(), vec!["limit_exceeded"]);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (state, events) = common::create_test_state();

    let result = state.resolve_link("nothere1").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert!(events.events().is_empty());
}

// ─── UPDATE / DELETE ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_applies_supplied_fields_only() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;

    let mut new_link = NewLink::new("https://example.com");
    new_link.title = Some("Original".to_string());
    new_link.description = Some("Keep me".to_string());
    let link = state.create_link(new_link).await.unwrap();

    let new_expiry = Utc::now() + Duration::days(2);
    let patch = LinkPatch {
        title: FieldUpdate::Set(None),
        max_clicks: FieldUpdate::Set(50),
        expires_at: FieldUpdate::Set(new_expiry),
        ..LinkPatch::default()
    };

    let updated = state.update_link(&link.code, patch).await.unwrap();

    assert_eq!(updated.title, None);
    assert_eq!(updated.description.as_deref(), Some("Keep me"));
    assert_eq!(updated.max_clicks, 50);
    assert_eq!(updated.expires_at, new_expiry);
    assert_eq!(updated.original_url, link.original_url);
    assert_eq!(updated.created_at, link.created_at);
}

#[tokio::test]
async fn test_update_below_click_count_changes_nothing() {
    let (state, _events) = common::create_test_state();
    let owner = common::login_as(&state, "alice").await;
    let before =
        common::insert_link(&state, owner, "used0001", Utc::now() + Duration::hours(1), 3, 10).await;

    let patch = LinkPatch {
        title: FieldUpdate::Set(Some("New title".to_string())),
        description: FieldUpdate::Set(Some("New description".to_string())),
        max_clicks: FieldUpdate::Set(2),
        ..LinkPatch::default()
    };

    let result = state.update_link("used0001", patch).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert_eq!(state.get_link("used0001").await.unwrap(), before);
}

#[tokio::test]
async fn test_update_rejects_expiration_outside_window() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;
    let link = state.create_link(NewLink::new("https://example.com")).await.unwrap();

    for expires_at in [
        Utc::now() + Duration::minutes(1),
        Utc::now() + Duration::days(400),
    ] {
        let patch = LinkPatch {
            title: FieldUpdate::Set(Some("ignored".to_string())),
            expires_at: FieldUpdate::Set(expires_at),
            ..LinkPatch::default()
        };
        let result = state.update_link(&link.code, patch).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    assert_eq!(state.get_link(&link.code).await.unwrap(), link);
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let (state, _events) = common::create_test_state();
    common::login_as(&state, "alice").await;
    let link = state.create_link(NewLink::new("https://example.com")).await.unwrap();

    common::login_as(&state, "mallory").await;

    let patch = LinkPatch {
        title: FieldUpdate::Set(Some("Hacked".to_string())),
        ..LinkPatch::default()
    };
    let update = state.update_link(&link.code, patch).await;
    assert!(matches!(update, Err(AppError::AccessDenied { .. })));

    let delete = state.delete_link(&link.code).await;
    assert!(matches!(delete, Err(AppError::AccessDenied { .. })));

    assert_eq!(state.get_link(&link.code).await.unwrap(), link);
}

#[tokio::test]
async fn test_update_reports_ownership_before_field_errors() {
    let (state, _events) = common::create_test_state();
    let alice = common::login_as(&state, "alice").await;
    let before =
        common::insert_link(&state, alice, "own00001", Utc::now() + Duration::hours(1), 0, 5).await;

    common::login_as(&state, "mallory").await;

    let bad_patch = || LinkPatch {
        max_clicks: FieldUpdate::Set(0),
        ..LinkPatch::default()
    };

    let foreign = state.update_link("own00001", bad_patch()).await;
    assert!(matches!(foreign, Err(AppError::AccessDenied { .. })));

    let missing = state.update_link("missing9", bad_patch()).await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));

    assert_eq!(state.get_link("own00001").await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_by_owner() {
    let (state, events) = common::create_test_state();
    common::login_as(&state, "alice").await;
    let link = state.create_link(NewLink::new("https://example.com")).await.unwrap();

    state.delete_link(&link.code).await.unwrap();

    assert!(matches!(
        state.get_link(&link.code).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        state.delete_link(&link.code).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(state.list_links().await.unwrap().is_empty());
    assert_eq!(events.kinds(), vec!["created"]);
}

#[tokio::test]
async fn test_mutations_require_session() {
    let (state, _events) = common::create_test_state();

    assert!(matches!(
        state.update_link("any00001", LinkPatch::default()).await,
        Err(AppError::NotAuthenticated { .. })
    ));
    assert!(matches!(
        state.delete_link("any00001").await,
        Err(AppError::NotAuthenticated { .. })
    ));
    assert!(matches!(
        state.list_links().await,
        Err(AppError::NotAuthenticated { .. })
    ));
}

// ─── LIST / SWEEP ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sweeps_stale_links_first() {
    let (state, events) = common::create_test_state();
    let alice = common::login_as(&state, "alice").await;

    let soon = Utc::now() + Duration::hours(1);
    common::insert_link(&state, alice, "live0001", soon, 1, 5).await;
    common::insert_link(&state, alice, "done0001", soon, 5, 5).await;
    common::insert_link(&state, alice, "past0001", Utc::now() - Duration::seconds(1), 0, 5).await;

    let bob = common::login_as(&state, "bob").await;
    common::insert_link(&state, bob, "bobs0001", soon, 5, 5).await;

    common::login_as(&state, "alice").await;
    let links = state.list_links().await.unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, "live0001");

    let mut kinds = events.kinds();
    kinds.sort();
    assert_eq!(kinds, vec!["expired", "limit_exceeded"]);

    assert!(state.get_link("bobs0001").await.is_ok());
}

#[tokio::test]
async fn test_sweep_all_covers_every_owner() {
    let (state, events) = common::create_test_state();
    let alice = common::login_as(&state, "alice").await;
    let bob = common::login_as(&state, "bob").await;

    let past = Utc::now() - Duration::seconds(1);
    common::insert_link(&state, alice, "alic0001", past, 0, 5).await;
    common::insert_link(&state, bob, "bobb0001", past, 0, 5).await;

    let evicted = state.lifecycle_service.sweep_all().await.unwrap();

    assert_eq!(evicted.len(), 2);
    assert_eq!(common::link_count(&state).await, 0);
    assert_eq!(events.kinds(), vec!["expired", "expired"]);
}
