//! How data commands get a usable token.
//!
//! A stored token that has not expired is used as is. An expired one is
//! refreshed once when it carries a refresh token. Anything else (no file,
//! unreadable file, no refresh token, failed refresh) ends in a device-code
//! login. When the API still answers 401 later on, the command logs in once
//! more and repeats the call.

use std::path::Path;

use crate::{
    Res, TraktError, config, error, info,
    management::{CredentialsManager, TokenManager},
    success,
    trakt::TraktClient,
    types::{Credentials, Token},
    warning,
};

use super::auth;

/// Outcome of looking at the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// The stored token has not expired.
    Stored(Token),
    /// The stored token expired and was refreshed; the new one is saved.
    Refreshed(Token),
    /// No usable token, a new OAuth login is needed.
    LoginRequired,
}

pub(super) async fn load_credentials() -> Credentials {
    match CredentialsManager::load().await {
        Ok(manager) => manager.into_credentials(),
        Err(e @ TraktError::ConfigMissing { .. }) => error!("{}", e),
        Err(e) => error!("Failed to load credentials: {}", e),
    }
}

/// A client carrying a usable token, logging in first when needed.
pub(super) async fn authorized_client() -> TraktClient {
    let credentials = load_credentials().await;
    let mut client = TraktClient::new(credentials, None, config::api_url());

    if let Err(e) = ensure_token(&mut client, &TokenManager::default_path(), true).await {
        error!("Authentication failed: {}", e);
    }
    client
}

/// Decides what to do with the token stored at `token_path`, refreshing it
/// through `client` when it expired.
///
/// Only a failure to save a refreshed token is an error; every other
/// problem with the stored token means [`TokenState::LoginRequired`].
pub async fn resolve_token(client: &TraktClient, token_path: &Path) -> Res<TokenState> {
    let mut manager = match TokenManager::load_from(token_path).await {
        Ok(manager) => manager,
        Err(TraktError::TokenMissing) => {
            info!("No access token stored yet.");
            return Ok(TokenState::LoginRequired);
        }
        Err(e) => {
            warning!("Stored access token unusable: {}", e);
            return Ok(TokenState::LoginRequired);
        }
    };

    if let Ok(token) = manager.valid_token() {
        return Ok(TokenState::Stored(token.clone()));
    }

    let refresh_token = manager.current_token().refresh_token.clone();
    if refresh_token.is_empty() {
        warning!("Stored access token expired.");
        return Ok(TokenState::LoginRequired);
    }

    warning!("Stored access token expired, refreshing...");
    match client.refresh_access_token(&refresh_token).await {
        Ok(token) => {
            manager.replace(token.clone()).await?;
            success!("Access token refreshed.");
            Ok(TokenState::Refreshed(token))
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            Ok(TokenState::LoginRequired)
        }
    }
}

/// Gives `client` a usable token: the stored or refreshed one, or a new
/// device-code login saved to `token_path`.
pub async fn ensure_token(
    client: &mut TraktClient,
    token_path: &Path,
    open_browser: bool,
) -> Res<()> {
    let token = match resolve_token(client, token_path).await? {
        TokenState::Stored(token) | TokenState::Refreshed(token) => token,
        TokenState::LoginRequired => auth::device_login(client, token_path, open_browser).await?,
    };
    client.set_token(token);
    Ok(())
}

/// Replaces a token the API refused with a fresh device-code login.
pub async fn reauthorize(
    client: &mut TraktClient,
    token_path: &Path,
    open_browser: bool,
) -> Res<()> {
    let token = auth::device_login(client, token_path, open_browser).await?;
    client.set_token(token);
    Ok(())
}

/// Logs in again after a call failed with `cause`, so the caller can repeat
/// it once. Returns `false` when `cause` has nothing to do with the token.
pub(super) async fn relogin_if_rejected(client: &mut TraktClient, cause: &TraktError) -> bool {
    if !cause.needs_login() {
        return false;
    }

    warning!("Trakt refused the access token, logging in again.");
    if let Err(e) = reauthorize(client, &TokenManager::default_path(), true).await {
        error!("Authentication failed: {}", e);
    }
    true
}
