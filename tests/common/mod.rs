#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use traktshow::{
    trakt::TraktClient,
    types::{Credentials, Token},
};

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: None,
    }
}

pub fn token() -> Token {
    Token {
        access_token: "access-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: 7_776_000,
        refresh_token: "refresh-token".to_string(),
        scope: "public".to_string(),
        created_at: chrono::Utc::now().timestamp(),
    }
}

pub fn client(base_url: &str) -> TraktClient {
    TraktClient::new(credentials(), Some(token()), base_url)
}

pub fn token_json() -> Value {
    json!({
        "access_token": "fresh-access",
        "token_type": "bearer",
        "expires_in": 7_776_000,
        "refresh_token": "fresh-refresh",
        "scope": "public",
        "created_at": 1
    })
}

/// An episode history entry with a sequential id.
pub fn history_entry(id: u64) -> Value {
    json!({
        "id": id,
        "watched_at": "2024-03-01T20:15:00.000Z",
        "action": "scrobble",
        "type": "episode",
        "episode": {
            "season": 1,
            "number": (id % 20) + 1,
            "title": format!("Episode {}", id),
            "ids": { "trakt": 9000 + id }
        },
        "show": {
            "title": "Severance",
            "year": 2022,
            "ids": { "trakt": 154997, "slug": "severance" }
        }
    })
}

pub fn watched_entry(trakt_id: u64, title: &str, plays: u32, aired: Option<u32>) -> Value {
    let mut show = json!({
        "title": title,
        "year": 2020,
        "ids": { "trakt": trakt_id, "slug": title.to_lowercase() }
    });
    if let Some(aired) = aired {
        show["aired_episodes"] = json!(aired);
    }
    json!({
        "plays": plays,
        "last_watched_at": "2024-03-01T20:15:00.000Z",
        "show": show
    })
}
