mod common;

use borrowdesk::precondition::PreconditionError;
use borrowdesk::resources::ReactionError;
use borrowdesk::validation::{PostDraft, Validated};
use common::mock_backend::MockBackend;
use common::{context, post_json, sign_in};
use serde_json::json;

/// Reviews for one device are kept apart from the full list.
#[tokio::test]
async fn test_fetch_for_device() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);

    backend
        .enqueue_json(json!([post_json("p1", "d1", "u1"), post_json("p2", "d1", "u2")]))
        .await;
    let posts = ctx.posts.fetch_for_device("d1").await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(ctx.posts.state().scoped.len(), 2);
    assert_eq!(backend.last_request().await.path, "/showPostsByDevice/d1");
}

/// Liking sends the viewer's id and mirrors the server's reaction lists.
#[tokio::test]
async fn test_like_and_dislike() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);
    let viewer = sign_in(&ctx, &backend, "u2", "Student").await;

    backend.enqueue_json(json!([post_json("p1", "d1", "u1")])).await;
    ctx.posts.fetch_for_device("d1").await.unwrap();

    let mut liked = post_json("p1", "d1", "u1");
    liked["likes"] = json!(["u2"]);
    backend.enqueue_json(json!({ "post": liked })).await;
    ctx.posts.like("p1", Some(&viewer)).await.unwrap();

    let request = backend.last_request().await;
    assert_eq!(request.path, "/likePost/p1");
    assert_eq!(request.json(), json!({ "userId": "u2" }));
    assert!(ctx.posts.state().scoped[0].reaction_of("u2").liked);

    let mut disliked = post_json("p1", "d1", "u1");
    disliked["dislikes"] = json!(["u2"]);
    backend.enqueue_json(json!({ "post": disliked })).await;
    ctx.posts.dislike("p1", Some(&viewer)).await.unwrap();

    assert_eq!(backend.last_request().await.path, "/dislikePost/p1");
    let reaction = ctx.posts.state().scoped[0].reaction_of("u2");
    assert!(!reaction.liked);
    assert!(reaction.disliked);
}

/// Signed-out viewers are asked to log in and nothing is sent.
#[tokio::test]
async fn test_react_requires_login() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);

    let err = ctx.posts.like("p1", None).await.unwrap_err();
    assert!(matches!(
        err,
        ReactionError::Precondition(PreconditionError::NotSignedIn { .. })
    ));
    assert_eq!(err.user_message(), "Please login to react to reviews");
    assert!(backend.captured_requests().await.is_empty());
}

/// Writing a review posts the author and rating.
#[tokio::test]
async fn test_create_review() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);
    let author = sign_in(&ctx, &backend, "u1", "Staff").await;

    let mut draft = PostDraft::by(Some(&author), "d1").unwrap();
    draft.text = "Works well for lectures".to_string();
    draft.rating = 5;

    backend
        .enqueue_json(json!({ "message": "Post created", "post": post_json("p8", "d1", "u1") }))
        .await;
    let post = ctx
        .posts
        .create(Validated::new(draft).unwrap())
        .await
        .unwrap();
    assert!(post.is_authored_by("u1"));

    let body = backend.last_request().await.json();
    assert_eq!(body["deviceId"], "d1");
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["rating"], 5);
}

/// Posts are deleted through their own endpoint.
#[tokio::test]
async fn test_remove_post() {
    let backend = MockBackend::start().await;
    let (ctx, _) = context(&backend);

    backend.enqueue_json(json!([post_json("p1", "d1", "u1")])).await;
    ctx.posts.fetch_all().await.unwrap();

    backend.enqueue_json(json!({ "message": "Post deleted" })).await;
    ctx.posts.remove("p1").await.unwrap();

    assert!(ctx.posts.state().items.is_empty());
    assert_eq!(backend.last_request().await.path, "/delPost/p1");
}
