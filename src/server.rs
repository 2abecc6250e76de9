use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, TraktError, api, types::AuthorizationCallback};

pub fn router(state: Arc<Mutex<Option<AuthorizationCallback>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Socket address of an `http://` loopback redirect URI.
pub fn listen_addr(redirect_uri: &str) -> Res<SocketAddr> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| TraktError::Callback(format!("invalid redirect uri {redirect_uri}: {e}")))?;

    if url.scheme() != "http" {
        return Err(TraktError::Callback(format!(
            "redirect uri {redirect_uri} is not an http:// address"
        )));
    }

    let host = match url.host_str() {
        Some("localhost") => "127.0.0.1",
        Some(host) => host.trim_start_matches('[').trim_end_matches(']'),
        None => return Err(TraktError::Callback(format!("redirect uri {redirect_uri} has no host"))),
    };
    let port = url.port_or_known_default().unwrap_or(80);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .or_else(|_| format!("[{host}]:{port}").parse::<SocketAddr>())
        .map_err(|e| TraktError::Callback(format!("cannot listen on {host}:{port}: {e}")))?;

    if !addr.ip().is_loopback() {
        return Err(TraktError::Callback(format!(
            "redirect uri {redirect_uri} does not point at this machine"
        )));
    }
    Ok(addr)
}

/// Binds the redirect listener. The returned future serves until dropped.
pub async fn start_api_server(
    addr: SocketAddr,
    state: Arc<Mutex<Option<AuthorizationCallback>>>,
) -> Res<impl Future<Output = std::io::Result<()>>> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| TraktError::Callback(format!("cannot listen on {addr}: {e}")))?;
    tracing::debug!(%addr, "redirect listener started");

    Ok(axum::serve(listener, router(state)).into_future())
}
