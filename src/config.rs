//! Configuration management for traktshow.
//!
//! Settings are read from environment variables, optionally seeded from a
//! `.env` file inside the traktshow config directory. Every value has a
//! default, so a bare installation only needs the credentials written by
//! `traktshow config`.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the config directory
//! 3. Application defaults

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.trakt.tv";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://trakt.tv/oauth/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const DEFAULT_USER: &str = "me";
pub const SCOPE: &str = "public";

/// Loads environment variables from a `.env` file in the config directory.
///
/// The file is optional. Variables already present in the process
/// environment are never overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.config/traktshow/.env`
/// - macOS: `~/Library/Application Support/traktshow/.env`
/// - Windows: `%APPDATA%/traktshow/.env`
pub fn load_env() {
    let path = config_dir().join(".env");
    match dotenv::from_path(&path) {
        Ok(()) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring environment file"),
    }
}

/// Returns the Trakt API base URL (`TRAKT_API_URL`).
pub fn api_url() -> String {
    env_or("TRAKT_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the browser authorization page used by the manual flow
/// (`TRAKT_AUTHORIZE_URL`).
pub fn authorize_url() -> String {
    env_or("TRAKT_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL)
}

/// Returns the user slug data commands query by default (`TRAKT_USER`).
pub fn default_user() -> String {
    env_or("TRAKT_USER", DEFAULT_USER)
}

/// Directory holding `credentials.json`, `token.json` and the optional `.env`.
pub fn config_dir() -> PathBuf {
    match env::var_os("TRAKTSHOW_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("traktshow"),
    }
}

/// Directory holding the exported history.
pub fn cache_dir() -> PathBuf {
    match env::var_os("TRAKTSHOW_CACHE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("traktshow"),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
