mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tempfile::tempdir;
use traktshow::{
    cli::session::{self, TokenState},
    management::TokenManager,
    trakt::TraktClient,
    types::Token,
};

use common::{credentials, serve, token, token_json};

#[derive(Clone, Default)]
struct Oauth {
    refreshes: Arc<AtomicUsize>,
    device_polls: Arc<AtomicUsize>,
    refresh_status: Option<StatusCode>,
}

async fn refresh(State(oauth): State<Oauth>, Json(body): Json<Value>) -> Response {
    assert_eq!(body["grant_type"], "refresh_token");
    assert_eq!(body["refresh_token"], "refresh-token");
    oauth.refreshes.fetch_add(1, Ordering::SeqCst);

    match oauth.refresh_status {
        Some(status) => (status, r#"{"error":"invalid_grant"}"#).into_response(),
        None => Json(token_json()).into_response(),
    }
}

async fn device_code() -> Json<Value> {
    Json(json!({
        "device_code": "device-code",
        "user_code": "5055CC52",
        "verification_url": "https://trakt.tv/activate",
        "expires_in": 5,
        "interval": 1
    }))
}

async fn device_token(State(oauth): State<Oauth>) -> Json<Value> {
    oauth.device_polls.fetch_add(1, Ordering::SeqCst);
    Json(token_json())
}

// stats only accept the token handed out by the stub
async fn stats(headers: HeaderMap) -> Response {
    if headers["authorization"] != "Bearer fresh-access" {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }
    Json(json!({ "episodes": { "watched": 3 } })).into_response()
}

async fn oauth_stub(oauth: Oauth) -> String {
    let app = Router::new()
        .route("/oauth/token", post(refresh))
        .route("/oauth/device/code", post(device_code))
        .route("/oauth/device/token", post(device_token))
        .route("/users/{user}/stats", get(stats))
        .with_state(oauth);
    serve(app).await
}

fn expired_token(refresh_token: &str) -> Token {
    Token {
        created_at: Utc::now().timestamp() - 10_000,
        expires_in: 3600,
        refresh_token: refresh_token.to_string(),
        ..token()
    }
}

async fn store(path: &std::path::Path, token: Token) {
    TokenManager::at(path, token).persist().await.unwrap();
}

#[tokio::test]
async fn test_valid_stored_token_is_used_without_requests() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    store(&path, token()).await;

    let client = TraktClient::new(credentials(), None, base.as_str());
    let state = session::resolve_token(&client, &path).await.unwrap();

    match state {
        TokenState::Stored(stored) => assert_eq!(stored.access_token, "access-token"),
        other => panic!("expected Stored, got {:?}", other),
    }
    assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_token_requires_login() {
    let dir = tempdir().unwrap();
    let client = TraktClient::new(credentials(), None, "http://127.0.0.1:9");

    let state = session::resolve_token(&client, &dir.path().join("token.json"))
        .await
        .unwrap();

    assert_eq!(state, TokenState::LoginRequired);
}

#[tokio::test]
async fn test_malformed_token_requires_login() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "{ not json").unwrap();
    let client = TraktClient::new(credentials(), None, "http://127.0.0.1:9");

    let state = session::resolve_token(&client, &path).await.unwrap();

    assert_eq!(state, TokenState::LoginRequired);
}

#[tokio::test]
async fn test_expired_token_without_refresh_token_requires_login() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    store(&path, expired_token("")).await;

    let client = TraktClient::new(credentials(), None, base.as_str());
    let state = session::resolve_token(&client, &path).await.unwrap();

    assert_eq!(state, TokenState::LoginRequired);
    assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_saved() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    store(&path, expired_token("refresh-token")).await;

    let client = TraktClient::new(credentials(), None, base.as_str());
    let state = session::resolve_token(&client, &path).await.unwrap();

    match state {
        TokenState::Refreshed(fresh) => assert_eq!(fresh.access_token, "fresh-access"),
        other => panic!("expected Refreshed, got {:?}", other),
    }
    assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 1);

    let saved = TokenManager::load_from(&path).await.unwrap();
    assert!(!saved.is_expired());
    assert_eq!(saved.current_token().access_token, "fresh-access");
}

#[tokio::test]
async fn test_failed_refresh_requires_login_and_keeps_file() {
    let oauth = Oauth {
        refresh_status: Some(StatusCode::UNAUTHORIZED),
        ..Oauth::default()
    };
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    store(&path, expired_token("refresh-token")).await;

    let client = TraktClient::new(credentials(), None, base.as_str());
    let state = session::resolve_token(&client, &path).await.unwrap();

    assert_eq!(state, TokenState::LoginRequired);
    assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 1);
    let saved = TokenManager::load_from(&path).await.unwrap();
    assert_eq!(saved.current_token().access_token, "access-token");
}

#[tokio::test]
async fn test_ensure_token_runs_device_login_when_none_stored() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");

    let mut client = TraktClient::new(credentials(), None, base.as_str());
    session::ensure_token(&mut client, &path, false).await.unwrap();

    assert_eq!(client.token().unwrap().access_token, "fresh-access");
    assert_eq!(oauth.device_polls.load(Ordering::SeqCst), 1);

    let saved = TokenManager::load_from(&path).await.unwrap();
    assert_eq!(saved.current_token().access_token, "fresh-access");
}

#[tokio::test]
async fn test_ensure_token_keeps_valid_stored_token() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");
    store(&path, token()).await;

    let mut client = TraktClient::new(credentials(), None, base.as_str());
    session::ensure_token(&mut client, &path, false).await.unwrap();

    assert_eq!(client.token().unwrap().access_token, "access-token");
    assert_eq!(oauth.device_polls.load(Ordering::SeqCst), 0);
    assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_revoked_token_is_replaced_after_unauthorized() {
    let oauth = Oauth::default();
    let base = oauth_stub(oauth.clone()).await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token.json");

    // not expired locally, but refused by the server
    let mut client = TraktClient::new(credentials(), Some(token()), base.as_str());
    let err = client.get_stats("me").await.unwrap_err();
    assert!(err.needs_login());

    session::reauthorize(&mut client, &path, false).await.unwrap();
    let stats = client.get_stats("me").await.unwrap();

    assert_eq!(stats.episodes.watched, 3);
    assert_eq!(client.token().unwrap().access_token, "fresh-access");
    assert!(path.exists());
}
