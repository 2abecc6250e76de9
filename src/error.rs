//! Error taxonomy shared by every layer of traktshow.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraktError {
    #[error("credentials not found at {}, please run 'traktshow config'", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("could not parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no access token stored, please run 'traktshow login'")]
    TokenMissing,

    #[error("access token expired, please run 'traktshow login'")]
    TokenExpired,

    #[error("file error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("unexpected response body: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("authentication timed out")]
    AuthTimeout,

    #[error("authentication rejected ({status}): {reason}")]
    AuthRejected {
        status: StatusCode,
        reason: &'static str,
        body: String,
    },

    #[error("token exchange failed with status {status}: {body}")]
    AuthExchangeFailed { status: StatusCode, body: String },

    #[error("authorization callback failed: {0}")]
    Callback(String),
}

impl TraktError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TraktError::Io {
            path: path.into(),
            source,
        }
    }

    /// Status code of a rejected request, if the error came from the API.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TraktError::Api { status, .. }
            | TraktError::AuthRejected { status, .. }
            | TraktError::AuthExchangeFailed { status, .. } => Some(*status),
            TraktError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Errors that are resolved by authenticating again rather than aborting.
    pub fn needs_login(&self) -> bool {
        matches!(self, TraktError::TokenMissing | TraktError::TokenExpired)
            || self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
