use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::Mutex;

use crate::{types::AuthorizationCallback, warning};

/// Receives the browser redirect after the user approved the application.
///
/// The `state` parameter must match the one the login flow put into the
/// authorization URL; only then is `code` handed back to the flow.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthorizationCallback>>>>,
) -> (StatusCode, Html<&'static str>) {
    if let Some(error) = params.get("error") {
        warning!("Authorization was not granted: {}", error);
        return (StatusCode::BAD_REQUEST, Html("<h4>Authorization denied.</h4>"));
    }

    let Some(code) = params.get("code") else {
        return (StatusCode::BAD_REQUEST, Html("<h4>Missing authorization code.</h4>"));
    };

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return (StatusCode::CONFLICT, Html("<h4>No login in progress.</h4>"));
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring redirect with unexpected state.");
        return (StatusCode::BAD_REQUEST, Html("<h4>State mismatch.</h4>"));
    }

    pending.code = Some(code.clone());
    (
        StatusCode::OK,
        Html("<h2>Authorization received.</h2><p>Close this browser window.</p>"),
    )
}
