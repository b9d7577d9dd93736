mod common;

use borrowdesk::models::{AccountStatus, Role, UserPatch};
use borrowdesk::store::StoreError;
use borrowdesk::validation::{UserUpdate, Validated};
use common::mock_backend::MockBackend;
use common::{context, sign_in, user_json};
use serde_json::json;

/// Users can be listed but not fetched one at a time.
#[tokio::test]
async fn test_fetch_one_unsupported() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);

    let err = ctx.users.fetch_one("u1").await.unwrap_err();
    assert!(matches!(err, StoreError::Unsupported { .. }));
    assert_eq!(err.user_message(), "fetch_one is not supported for users");
    assert!(ctx.users.state().is_error);
    assert!(backend.captured_requests().await.is_empty());
}

/// Suspending a user replaces the listed copy.
#[tokio::test]
async fn test_suspend_user() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);

    backend
        .enqueue_json(json!([user_json("u1", "Student"), user_json("u2", "Staff")]))
        .await;
    ctx.users.fetch_all().await.unwrap();

    let mut suspended = user_json("u1", "Student");
    suspended["status"] = json!("Suspended");
    backend
        .enqueue_json(json!({ "message": "User updated", "user": suspended }))
        .await;
    let update = UserUpdate {
        status: Some(AccountStatus::Suspended),
        ..UserUpdate::default()
    };
    ctx.users
        .update("u1", Validated::new(update).unwrap())
        .await
        .unwrap();

    let state = ctx.users.state();
    assert_eq!(state.items[0].status, AccountStatus::Suspended);
    assert_eq!(state.items[1].status, AccountStatus::Active);
    assert_eq!(backend.last_request().await.path, "/updateUser");
}

/// Editing your own account also refreshes the signed-in identity.
#[tokio::test]
async fn test_self_update_refreshes_session() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);
    sign_in(&ctx, &backend, "u1", "Student").await;

    let update = UserUpdate {
        username: Some("renamed".to_string()),
        role: Some(Role::Staff),
        ..UserUpdate::default()
    };
    backend.enqueue_json(json!({ "message": "User updated" })).await;
    let applied = ctx
        .users
        .update("u1", Validated::new(update.clone()).unwrap())
        .await
        .unwrap();
    assert!(applied.is_none());

    ctx.session
        .update_local_identity(&UserPatch::from(&update))
        .unwrap();
    let me = ctx.session.current_user().unwrap();
    assert_eq!(me.username, "renamed");
    assert_eq!(me.role, Role::Staff);
    assert_eq!(me.email, "u1@example.com");
}
