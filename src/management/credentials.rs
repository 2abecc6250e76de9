use std::path::{Path, PathBuf};

use crate::{Res, TraktError, config, types::Credentials};

pub struct CredentialsManager {
    path: PathBuf,
    credentials: Credentials,
}

impl CredentialsManager {
    pub fn new(credentials: Credentials) -> Self {
        Self::at(Self::default_path(), credentials)
    }

    pub fn at(path: impl Into<PathBuf>, credentials: Credentials) -> Self {
        Self {
            path: path.into(),
            credentials,
        }
    }

    pub async fn load() -> Res<Self> {
        Self::load_from(Self::default_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let Some(content) = super::read_file(&path).await? else {
            return Err(TraktError::ConfigMissing { path });
        };

        let credentials: Credentials =
            serde_json::from_str(&content).map_err(|source| TraktError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "credentials loaded");

        Ok(Self { path, credentials })
    }

    pub async fn persist(&self) -> Res<()> {
        let json = serde_json::to_string_pretty(&self.credentials).map_err(|source| {
            TraktError::ConfigParse {
                path: self.path.clone(),
                source,
            }
        })?;
        super::write_file(&self.path, json, true).await
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn into_credentials(self) -> Credentials {
        self.credentials
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_path() -> PathBuf {
        config::config_dir().join("credentials.json")
    }
}
