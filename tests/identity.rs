mod common;

use short_link_service::error::AppError;

#[tokio::test]
async fn test_register_then_authenticate_case_insensitive() {
    let (state, _events) = common::create_test_state();

    let user = state.register("alice", "secret").await.unwrap();
    assert_eq!(user.login, "alice");

    let id = state.authenticate("ALICE", "secret").await.unwrap();
    assert_eq!(id, user.id);
    assert_eq!(state.current_user().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_wrong_password_keeps_previous_session() {
    let (state, _events) = common::create_test_state();
    state.register("alice", "secret").await.unwrap();
    let bob = common::login_as(&state, "bob").await;

    let result = state.authenticate("alice", "wrong").await;

    assert!(matches!(result, Err(AppError::InvalidCredentials { .. })));
    assert_eq!(state.current_user().map(|u| u.id), Some(bob));
}

#[tokio::test]
async fn test_authenticate_unknown_login() {
    let (state, _events) = common::create_test_state();

    let result = state.authenticate("ghost", "secret").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert!(state.current_user().is_none());
}

#[tokio::test]
async fn test_register_duplicate_differs_only_in_case() {
    let (state, _events) = common::create_test_state();
    state.register("alice", "secret").await.unwrap();

    let result = state.register(" Alice ", "another").await;

    assert!(matches!(result, Err(AppError::AlreadyExists { .. })));
    assert!(state.authenticate("alice", "secret").await.is_ok());
}

#[tokio::test]
async fn test_register_validates_shape() {
    let (state, _events) = common::create_test_state();

    assert!(matches!(
        state.register("a!", "secret").await,
        Err(AppError::Validation { .. })
    ));
    assert!(matches!(
        state.register("alice", "abc").await,
        Err(AppError::Validation { .. })
    ));
    assert!(matches!(
        state.authenticate("alice", "abc").await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (state, _events) = common::create_test_state();
    let id = common::login_as(&state, "alice").await;

    assert_eq!(state.logout().map(|u| u.id), Some(id));
    assert!(state.current_user().is_none());
    assert!(state.logout().is_none());
}
