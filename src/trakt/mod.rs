//! # Trakt Integration Module
//!
//! Typed access to the parts of the Trakt API that traktshow uses. A single
//! [`TraktClient`] carries the configuration (base URL, application
//! credentials, optional bearer token) and every endpoint is a method on it,
//! grouped by domain:
//!
//! - [`auth`] - device-code flow, manual code exchange and token refresh
//! - [`history`] - paged watch history
//! - [`watched`] - watched shows with aired-episode backfill
//! - [`stats`] - user statistics and profile
//!
//! ## Request model
//!
//! Requests always carry `Content-Type: application/json`,
//! `trakt-api-version: 2` and `trakt-api-key: <client id>`, plus
//! `Authorization: Bearer <token>` once a token is set. Each call is a single
//! attempt: transport failures become [`TraktError::Network`], any status
//! outside 200..300 becomes [`TraktError::Api`] with the raw body, and a
//! success body that does not decode becomes [`TraktError::Decode`].

pub mod auth;
pub mod history;
pub mod stats;
pub mod watched;

use reqwest::{
    Client, Method, RequestBuilder, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Res, TraktError,
    types::{Credentials, Token},
};

/// Value of the `trakt-api-version` header.
pub const API_VERSION: &str = "2";

/// Client for the Trakt API.
///
/// Holds the application credentials (the client id doubles as API key),
/// the base URL and, once logged in, the bearer token. The client never
/// reads configuration on its own; everything is passed to [`new`](Self::new).
pub struct TraktClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    token: Option<Token>,
}

impl TraktClient {
    /// Creates a client for `api_url`. A trailing `/` is dropped so paths
    /// can start with one.
    pub fn new(credentials: Credentials, token: Option<Token>, api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
            token,
        }
    }

    /// Sends `token` as bearer on every following request.
    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// Token currently sent as bearer, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Builds a request against `path` (relative to the API base) with the
    /// fixed Trakt headers and an optional JSON body.
    pub fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header("trakt-api-version", API_VERSION)
            .header("trakt-api-key", &self.credentials.client_id);

        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.access_token));
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder
    }

    /// `GET` request without a body.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request::<()>(Method::GET, path, None)
    }

    /// `POST` request with `body` encoded as JSON.
    pub fn post<B>(&self, path: &str, body: &B) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body))
    }

    /// Sends the request and decodes a 2xx body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Res<T> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(TraktError::Api { status, body });
        }
        decode(body)
    }

    /// Sends the request and returns status and raw body without judging
    /// the status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Res<(StatusCode, String)> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%method, %path, status = status.as_u16(), "trakt request");

        Ok((status, body))
    }
}

/// `/users/{user}{tail}` with the user slug percent-encoded, so a slug can
/// not add path segments or a query of its own.
pub(crate) fn user_path(user: &str, tail: &str) -> String {
    format!("/users/{}{}", urlencoding::encode(user), tail)
}

pub(crate) fn decode<T: DeserializeOwned>(body: String) -> Res<T> {
    serde_json::from_str(&body).map_err(|source| TraktError::Decode { source, body })
}
