//! Handlers of the local redirect listener used by `traktshow login --manual --listen`.
//!
//! - `GET /callback` - receives `code` and `state` from the Trakt redirect
//! - `GET /health` - liveness probe

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
