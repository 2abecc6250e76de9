//! # CLI Module
//!
//! User-facing commands of traktshow. Each command resolves what it needs
//! (credentials, a usable token, a [`TraktClient`](crate::trakt::TraktClient)),
//! calls the API, and renders the result with the status macros, `tabled`
//! tables or `indicatif` bars.
//!
//! ## Commands
//!
//! - [`config`] - store the application's client id and secret
//! - [`login`] / [`logout`] - obtain or forget the access token
//! - [`history`] - recent history, extended details, export and offline view
//! - [`progress`] - shows with unwatched aired episodes
//! - [`stats`] / [`profile`] - account statistics and profile
//!
//! Token handling shared by the data commands lives in [`session`].
//!
//! ## Error Handling
//!
//! Expected failures (missing configuration, rejected login, API errors) are
//! printed with [`error!`](crate::error) and terminate with exit code 1.
//! Recoverable issues such as a failed token refresh are shown as warnings
//! and the command carries on. A data call answered with 401 triggers one
//! new login and is then repeated once.

mod auth;
mod config;
mod history;
mod progress;
pub mod session;
mod stats;

pub use auth::login;
pub use auth::logout;
pub use config::config;
pub use history::history;
pub use progress::progress;
pub use stats::profile;
pub use stats::stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
