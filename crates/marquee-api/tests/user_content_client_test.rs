#![allow(clippy::unwrap_used)]
// Integration tests for `UserContentClient` using wiremock.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marquee_api::{
    ContentId, CredentialSource, Error, MediaType, SharedToken, StaticToken, UserContentClient,
    UserList,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(credentials: Arc<dyn CredentialSource>) -> (MockServer, UserContentClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = UserContentClient::with_client(reqwest::Client::new(), base_url, credentials);
    (server, client)
}

async fn setup() -> (MockServer, UserContentClient) {
    setup_with(Arc::new(StaticToken::new("test-token"))).await
}

// ── List tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_watchlist() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/watchlist"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "watchlist": [
                { "id": 1, "media_type": "movie", "title": "A" },
                { "id": 1, "media_type": "tv", "title": "A (series)" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client.list(UserList::Watchlist).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ContentId::Numeric(1));
    assert_eq!(items[0].media_type, MediaType::Movie);
    assert_eq!(items[1].media_type, MediaType::Tv);
    assert_eq!(items[1].display_title(), Some("A (series)"));
}

#[tokio::test]
async fn test_list_likes_reads_likes_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "likes": [{ "id": 27205, "media_type": "movie", "title": "Inception", "rating": 8 }]
        })))
        .mount(&server)
        .await;

    let items = client.list(UserList::Likes).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].rating, Some(8.0));
}

#[tokio::test]
async fn test_list_missing_key_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let items = client.list(UserList::Likes).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/watchlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list(UserList::Watchlist).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Mutation tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_add_posts_media_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/user/watchlist/42"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({ "media_type": "movie" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add(UserList::Watchlist, &ContentId::Numeric(42), MediaType::Movie)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_sends_delete() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/user/likes/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .remove(UserList::Likes, &ContentId::Numeric(7))
        .await
        .unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_carries_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/likes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;

    let result = client.list(UserList::Likes).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("db down"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_message_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client
        .remove(UserList::Watchlist, &ContentId::Numeric(9))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.server_message().is_none());
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let (server, client) = setup_with(Arc::new(StaticToken::none())).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .add(UserList::Watchlist, &ContentId::Numeric(42), MediaType::Movie)
        .await;

    assert!(matches!(result, Err(Error::Unauthenticated)));
}

#[tokio::test]
async fn test_token_is_read_per_request() {
    let token = Arc::new(SharedToken::new());
    let (server, client) = setup_with(token.clone()).await;

    Mock::given(method("GET"))
        .and(path("/api/user/watchlist"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "watchlist": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(matches!(
        client.list(UserList::Watchlist).await,
        Err(Error::Unauthenticated)
    ));

    token.set("fresh".to_string().into());
    client.list(UserList::Watchlist).await.unwrap();
}
