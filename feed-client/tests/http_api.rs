//! Integration tests for the HTTP API against a mock backend.
//!
//! These pin the wire contract: endpoint paths, bearer auth, request
//! body shapes, and the mapping from HTTP statuses and error payloads
//! to [`ApiError`].

use echo_feed_client::{ApiError, FeedApi, HttpApi};
use echo_feed_types::{AuthToken, CommentId, Credentials, PostId, VoteTarget};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_body(id: i64, author: &str) -> serde_json::Value {
    json!({
        "id": id,
        "author_username": author,
        "content": "hello world",
        "created_at": "2026-08-20T10:15:30Z",
        "likes_count": 3,
        "user_has_liked": false
    })
}

fn comment_body(id: i64, parent: Option<i64>) -> serde_json::Value {
    json!({
        "id": id,
        "author_username": "bob",
        "content": "a comment",
        "created_at": "2026-08-20T11:00:00Z",
        "likes_count": 0,
        "user_has_liked": false,
        "parent": parent,
        "replies": []
    })
}

#[tokio::test]
async fn login_posts_credentials_and_decodes_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .and(body_json(json!({"username": "ada", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "tok-123"})))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let grant = api
        .login(&Credentials::new("ada", "pw"))
        .await
        .expect("login failed");

    assert_eq!(grant.access.reveal(), "tok-123");
}

#[tokio::test]
async fn login_401_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "No active account found"})),
        )
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let result = api.login(&Credentials::new("ada", "wrong")).await;

    assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
}

#[tokio::test]
async fn register_surfaces_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Username already exists"})),
        )
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let result = api.register(&Credentials::new("ada", "pw")).await;

    assert_eq!(
        result.unwrap_err(),
        ApiError::Rejected("Username already exists".into())
    );
}

#[tokio::test]
async fn detail_payload_also_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "content too long"})),
        )
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let result = api.create_post(&AuthToken::new("tok"), "x".repeat(9999).as_str()).await;

    assert_eq!(
        result.unwrap_err(),
        ApiError::Rejected("content too long".into())
    );
}

#[tokio::test]
async fn list_posts_attaches_bearer_token() {
    let server = MockServer::start().await;
    // The mock only matches when the Authorization header is present,
    // so a missing header fails the test with a 404.
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .and(header("authorization", "Bearer secret-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_body(1, "ada")])))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let token = AuthToken::new("secret-tok");
    let posts = api.list_posts(Some(&token)).await.expect("list failed");

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, PostId::new(1));
    assert_eq!(posts[0].author, "ada");
    assert_eq!(posts[0].likes_count, 3);
}

#[tokio::test]
async fn anonymous_list_posts_sends_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    api.list_posts(None).await.expect("list failed");

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn create_comment_hits_nested_path_with_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/7/comments/"))
        .and(body_json(json!({"content": "nested reply", "parent": 10})))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_body(11, Some(10))))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let comment = api
        .create_comment(
            &AuthToken::new("tok"),
            PostId::new(7),
            Some(CommentId::new(10)),
            "nested reply",
        )
        .await
        .expect("create failed");

    assert_eq!(comment.id, CommentId::new(11));
    assert_eq!(comment.parent, Some(CommentId::new(10)));
}

#[tokio::test]
async fn top_level_comment_sends_null_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/7/comments/"))
        .and(body_json(json!({"content": "top level", "parent": null})))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_body(12, None)))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let comment = api
        .create_comment(&AuthToken::new("tok"), PostId::new(7), None, "top level")
        .await
        .expect("create failed");

    assert_eq!(comment.parent, None);
}

#[tokio::test]
async fn vote_sends_target_kind_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vote/3/"))
        .and(body_json(json!({"type": "post"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "liked"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vote/9/"))
        .and(body_json(json!({"type": "comment"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "unliked"})))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let token = AuthToken::new("tok");

    let receipt = api
        .toggle_vote(&token, VoteTarget::Post(PostId::new(3)))
        .await
        .expect("post vote failed");
    assert!(receipt.status.is_liked());

    let receipt = api
        .toggle_vote(&token, VoteTarget::Comment(CommentId::new(9)))
        .await
        .expect("comment vote failed");
    assert!(!receipt.status.is_liked());
}

#[tokio::test]
async fn leaderboard_decodes_projection_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leaderboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"voter__username": "ada", "score": 12},
            {"voter__username": "bob", "score": 7}
        ])))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let entries = api.leaderboard(None).await.expect("leaderboard failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].voter, "ada");
    assert_eq!(entries[0].score, 12);
}

#[tokio::test]
async fn bodyless_500_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leaderboard/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let result = api.leaderboard(None).await;

    assert_eq!(result.unwrap_err(), ApiError::Status(500));
}

#[tokio::test]
async fn malformed_success_body_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).expect("valid base url");
    let result = api.list_posts(None).await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_maps_to_network() {
    // Port 1 is reserved and closed; the connection is refused.
    let api = HttpApi::new("http://127.0.0.1:1/api/").expect("valid base url");
    let result = api.leaderboard(None).await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}
