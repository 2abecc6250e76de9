use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::config;

/// Application credentials from `credentials.json`.
///
/// `client_id` is also sent as the `trakt-api-key` header on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

impl Credentials {
    /// Stored redirect URI, or the out-of-band default.
    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .unwrap_or(config::DEFAULT_REDIRECT_URI)
    }
}

/// OAuth token as stored in `token.json`.
///
/// `created_at` is the local time the token was received, in epoch seconds,
/// and `expires_in` its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub created_at: i64,
}

impl Token {
    /// Epoch second after which the token is expired.
    pub fn expires_at(&self) -> i64 {
        self.created_at.saturating_add(self.expires_in)
    }

    /// A token is still usable at the exact second it expires.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Sets the issue time to `now`.
    pub fn stamped(mut self, now: i64) -> Self {
        self.created_at = now;
        self
    }
}

/// Absent tokens are always expired.
pub fn is_expired(token: Option<&Token>, now: i64) -> bool {
    token.is_none_or(|t| t.is_expired_at(now))
}

/// Answer of `POST /oauth/device/code`. Lives for one login attempt only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCodeResponse {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    pub expires_in: u64,
    pub interval: u64,
}

/// Identifiers Trakt sends for shows, episodes and movies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ids {
    #[serde(default)]
    pub trakt: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub imdb: Option<String>,
    #[serde(default)]
    pub tmdb: Option<u64>,
    #[serde(default)]
    pub tvdb: Option<u64>,
}

/// Weekly broadcast slot of a show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airs {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Show object. Everything past `ids` is only sent with `extended=full`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: Ids,
    #[serde(default)]
    pub aired_episodes: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub first_aired: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub airs: Option<Airs>,
}

impl Show {
    pub fn trakt_id(&self) -> Option<u64> {
        self.ids.trakt
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ids: Ids,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub first_aired: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: Ids,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

/// One watch event from `/users/{user}/history`.
///
/// Episodes carry `show` and `episode`, movies carry `movie`. `action` is
/// `watch`, `scrobble` or `checkin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub watched_at: DateTime<Utc>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub show: Option<Show>,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(default)]
    pub movie: Option<Movie>,
}

/// One show from `/users/{user}/watched/shows`. `plays` counts episode
/// plays, rewatches included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub plays: u32,
    #[serde(default)]
    pub last_watched_at: Option<DateTime<Utc>>,
    pub show: Show,
}

impl WatchedItem {
    /// The aired count cannot be trusted when it is missing, zero, or lower
    /// than the number of plays.
    pub fn aired_episodes_suspect(&self) -> bool {
        match self.show.aired_episodes {
            None | Some(0) => true,
            Some(aired) => self.plays > aired,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedCount {
    #[serde(default)]
    pub watched: u64,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub minutes: u64,
}

/// Subset of `/users/{user}/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub movies: WatchedCount,
    #[serde(default)]
    pub shows: WatchedCount,
    #[serde(default)]
    pub episodes: WatchedCount,
}

/// Answer of `/users/{user}?extended=full`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub vip: Option<bool>,
    #[serde(default)]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of `POST /oauth/device/code`.
#[derive(Debug, Serialize)]
pub struct DeviceCodeRequest<'a> {
    pub client_id: &'a str,
}

/// Body of each `POST /oauth/device/token` poll.
#[derive(Debug, Serialize)]
pub struct DeviceTokenRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Body of `POST /oauth/token` for a pasted authorization code.
#[derive(Debug, Serialize)]
pub struct CodeExchangeRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'static str,
}

/// Body of `POST /oauth/token` for a refresh.
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'static str,
}

/// Shared between the manual login flow and the redirect listener.
#[derive(Debug, Clone)]
pub struct AuthorizationCallback {
    pub state: String,
    pub code: Option<String>,
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    #[tabled(rename = "Watched at")]
    pub watched_at: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Episode")]
    pub episode: String,
    #[tabled(rename = "Episode title")]
    pub episode_title: String,
}

#[derive(Tabled)]
pub struct StatsTableRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Watched")]
    pub watched: u64,
    #[tabled(rename = "Plays")]
    pub plays: u64,
}
