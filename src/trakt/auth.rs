use std::time::Duration;

use chrono::Utc;
use reqwest::{StatusCode, Url};
use tokio::time::{Instant, sleep_until};

use super::{TraktClient, decode};
use crate::{
    Res, TraktError, config,
    types::{
        CodeExchangeRequest, DeviceCodeRequest, DeviceCodeResponse, DeviceTokenRequest,
        RefreshTokenRequest, Token,
    },
};

/// Result of a single device token poll.
#[derive(Debug)]
enum PollState {
    Authorized(Token),
    Pending,
    SlowDown,
}

impl TraktClient {
    /// Starts the device flow: asks Trakt for a user code the user confirms
    /// on another device.
    pub async fn request_device_code(&self) -> Res<DeviceCodeResponse> {
        let body = DeviceCodeRequest {
            client_id: &self.credentials.client_id,
        };
        self.execute(self.post("/oauth/device/code", &body)).await
    }

    /// Polls the device token endpoint until the user approves the code or
    /// the code expires.
    ///
    /// Polls happen on a fixed schedule of `interval` seconds counted from
    /// the start of polling. A poll is only issued while its scheduled tick
    /// is within `expires_in`; once the next tick would fall past it the
    /// call waits for the deadline and fails with [`TraktError::AuthTimeout`].
    ///
    /// Pending answers (400), rate limiting (429), server errors and
    /// transport failures keep polling. Terminal answers (invalid or used
    /// code, expiry, denial) and any other rejection are returned at once.
    pub async fn poll_device_token(&self, device: &DeviceCodeResponse) -> Res<Token> {
        let start = Instant::now();
        let interval = Duration::from_secs(device.interval.max(1));
        let deadline = start + Duration::from_secs(device.expires_in);
        let mut next_tick = start + interval;
        let mut attempt = 0u32;

        loop {
            if next_tick > deadline {
                sleep_until(deadline).await;
                tracing::debug!(attempt, "device code expired");
                return Err(TraktError::AuthTimeout);
            }

            sleep_until(next_tick).await;
            next_tick += interval;
            attempt += 1;

            match self.poll_device_token_once(&device.device_code).await? {
                PollState::Authorized(token) => {
                    tracing::debug!(attempt, "device code authorized");
                    return Ok(token.stamped(Utc::now().timestamp()));
                }
                PollState::Pending => tracing::debug!(attempt, "authorization pending"),
                PollState::SlowDown => {
                    tracing::debug!(attempt, "asked to slow down");
                    next_tick += interval;
                }
            }
        }
    }

    async fn poll_device_token_once(&self, device_code: &str) -> Res<PollState> {
        let body = DeviceTokenRequest {
            code: device_code,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
        };

        let (status, body) = match self.send(self.post("/oauth/device/token", &body)).await {
            Ok(response) => response,
            Err(TraktError::Network(e)) => {
                tracing::warn!(error = %e, "device token poll failed, retrying on next tick");
                return Ok(PollState::Pending);
            }
            Err(e) => return Err(e),
        };

        if status.is_success() {
            return decode(body).map(PollState::Authorized);
        }

        match status.as_u16() {
            400 => Ok(PollState::Pending),
            429 => Ok(PollState::SlowDown),
            404 => Err(rejected(status, "invalid device code", body)),
            409 => Err(rejected(status, "code already used", body)),
            410 => Err(rejected(status, "code expired", body)),
            418 => Err(rejected(status, "user denied the code", body)),
            _ if status.is_server_error() => {
                tracing::warn!(status = status.as_u16(), "device token poll failed, retrying on next tick");
                Ok(PollState::Pending)
            }
            _ => Err(TraktError::Api { status, body }),
        }
    }

    /// Browser URL for the authorization-code flow.
    pub fn authorize_url(&self, authorize_base: &str, state: &str) -> Res<Url> {
        Url::parse_with_params(
            authorize_base,
            &[
                ("response_type", "code"),
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.credentials.redirect_uri()),
                ("state", state),
                ("scope", config::SCOPE),
            ],
        )
        .map_err(|e| TraktError::Callback(format!("invalid authorize url {authorize_base}: {e}")))
    }

    /// Exchanges an authorization code pasted back by the user. Single
    /// attempt; any non-2xx answer is [`TraktError::AuthExchangeFailed`].
    pub async fn exchange_code(&self, code: &str) -> Res<Token> {
        let body = CodeExchangeRequest {
            code: code.trim(),
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            redirect_uri: self.credentials.redirect_uri(),
            grant_type: "authorization_code",
        };
        self.token_request(&body).await
    }

    /// Trades a refresh token for a new access token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Res<Token> {
        let body = RefreshTokenRequest {
            refresh_token,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            redirect_uri: self.credentials.redirect_uri(),
            grant_type: "refresh_token",
        };
        self.token_request(&body).await
    }

    async fn token_request<B: serde::Serialize>(&self, body: &B) -> Res<Token> {
        let (status, body) = self.send(self.post("/oauth/token", body)).await?;
        if !status.is_success() {
            return Err(TraktError::AuthExchangeFailed { status, body });
        }

        let token: Token = decode(body)?;
        Ok(token.stamped(Utc::now().timestamp()))
    }
}

fn rejected(status: StatusCode, reason: &'static str, body: String) -> TraktError {
    TraktError::AuthRejected {
        status,
        reason,
        body,
    }
}
