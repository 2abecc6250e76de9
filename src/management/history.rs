use std::path::{Path, PathBuf};

use crate::{Res, TraktError, config, types::HistoryItem};

/// Full history export, stored verbatim as returned by the API.
pub struct HistoryExportManager {
    path: PathBuf,
    history: Vec<HistoryItem>,
}

impl HistoryExportManager {
    pub fn new(history: Vec<HistoryItem>) -> Self {
        Self::at(Self::cache_path(), history)
    }

    pub fn at(path: impl Into<PathBuf>, history: Vec<HistoryItem>) -> Self {
        Self {
            path: path.into(),
            history,
        }
    }

    pub async fn load() -> Res<Self> {
        Self::load_from(Self::cache_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| TraktError::io(&path, e))?;
        let history: Vec<HistoryItem> =
            serde_json::from_str(&content).map_err(|source| TraktError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, history })
    }

    pub async fn persist(&self) -> Res<()> {
        let json = serde_json::to_string_pretty(&self.history).map_err(|source| {
            TraktError::ConfigParse {
                path: self.path.clone(),
                source,
            }
        })?;
        super::write_file(&self.path, json, false).await
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn count(&self) -> usize {
        self.history.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cache_path() -> PathBuf {
        config::cache_dir().join("history.json")
    }
}
