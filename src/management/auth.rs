use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Res, TraktError, config, types::Token};

/// Owns the stored bearer token. Expiry is evaluated once, when the token is
/// loaded or replaced.
pub struct TokenManager {
    path: PathBuf,
    token: Token,
    expired: bool,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::at(Self::default_path(), token)
    }

    pub fn at(path: impl Into<PathBuf>, token: Token) -> Self {
        let expired = token.is_expired();
        TokenManager {
            path: path.into(),
            token,
            expired,
        }
    }

    pub async fn load() -> Res<Self> {
        Self::load_from(Self::default_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let Some(content) = super::read_file(&path).await? else {
            return Err(TraktError::TokenMissing);
        };

        let token: Token =
            serde_json::from_str(&content).map_err(|source| TraktError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        let expired = token.is_expired_at(Utc::now().timestamp());
        tracing::debug!(expires_at = token.expires_at(), expired, "token loaded");

        Ok(Self {
            path,
            token,
            expired,
        })
    }

    pub async fn persist(&self) -> Res<()> {
        let json = serde_json::to_string_pretty(&self.token).map_err(|source| {
            TraktError::ConfigParse {
                path: self.path.clone(),
                source,
            }
        })?;
        super::write_file(&self.path, json, true).await
    }

    /// Replaces the held token and writes it over any previous file.
    pub async fn replace(&mut self, token: Token) -> Res<()> {
        self.expired = token.is_expired();
        self.token = token;
        self.persist().await
    }

    /// Removes the stored token. Returns whether a file was there.
    pub async fn delete() -> Res<bool> {
        Self::delete_at(&Self::default_path()).await
    }

    pub async fn delete_at(path: &Path) -> Res<bool> {
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TraktError::io(path, e)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// The token, or `TokenExpired` when it can no longer be sent.
    pub fn valid_token(&self) -> Res<&Token> {
        if self.expired {
            return Err(TraktError::TokenExpired);
        }
        Ok(&self.token)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_path() -> PathBuf {
        config::config_dir().join("token.json")
    }
}
