//! Trakt.tv command-line client library
//!
//! This library provides everything behind the `traktshow` binary: OAuth2
//! authentication against Trakt (device-code and manual code exchange), local
//! persistence of credentials and tokens, a typed client for the history,
//! watched-progress and statistics endpoints, and console rendering helpers.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth redirect listener
//! - `cli` - Command-line interface implementations
//! - `config` - Environment driven settings and default locations
//! - `error` - The `TraktError` taxonomy
//! - `logging` - Diagnostic tracing setup
//! - `management` - On-disk credentials, token and history export files
//! - `server` - Local HTTP server for OAuth redirects
//! - `trakt` - Trakt API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting helpers
//!
//! # Example
//!
//! ```
//! use traktshow::{config, management::CredentialsManager, trakt::TraktClient};
//!
//! #[tokio::main]
//! async fn main() -> traktshow::Res<()> {
//!     config::load_env();
//!     let credentials = CredentialsManager::load().await?.into_credentials();
//!     let client = TraktClient::new(credentials, None, config::api_url());
//!     let stats = client.get_stats("me").await?;
//!     println!("{} episodes", stats.episodes.watched);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod trakt;
pub mod types;
pub mod utils;

pub use error::TraktError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`TraktError`], so callers
/// can branch on the failure kind (missing configuration, expired token, API
/// rejection) instead of inspecting strings.
///
/// # Example
///
/// ```
/// use traktshow::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, TraktError>;

/// Prints a status line with a blue `o` bullet.
///
/// ```
/// info!("Fetched {} history items", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green checkmark once an operation completed.
///
/// ```
/// success!("Exported {} items", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` status line and exits with code 1.
///
/// Only for failures a command cannot continue from: missing credentials,
/// rejected login, failed API calls. Evaluates to `!`, so it can be used as
/// the error arm of a `match` that produces a value.
///
/// ```
/// let history = match history {
///     Ok(history) => history,
///     Err(e) => error!("Failed to fetch history: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` status line for problems the command works around.
///
/// ```
/// warning!("Token refresh failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
