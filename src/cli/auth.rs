use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    Res, TraktError, config, error, info,
    management::TokenManager,
    server, success,
    trakt::TraktClient,
    types::{AuthorizationCallback, Token},
    utils, warning,
};

use super::{session, spinner};

const CALLBACK_WAIT: Duration = Duration::from_secs(120);

/// Runs one of the OAuth flows and stores the resulting token.
///
/// The device-code flow is the default. With `manual` the user authorizes
/// in a browser and the code comes back either pasted on stdin or, with
/// `listen`, through the local redirect listener.
pub async fn login(manual: bool, listen: bool, no_browser: bool) {
    let credentials = session::load_credentials().await;
    let client = TraktClient::new(credentials, None, config::api_url());

    let token_path = TokenManager::default_path();
    let result = if manual {
        manual_login(&client, &token_path, listen, !no_browser).await
    } else {
        device_login(&client, &token_path, !no_browser).await
    };

    match result {
        Ok(token) => success!(
            "Authentication successful! Token valid until {}.",
            chrono::DateTime::from_timestamp(token.expires_at(), 0)
                .map(|at| at.format(utils::WATCHED_AT_FORMAT).to_string())
                .unwrap_or_else(|| token.expires_at().to_string())
        ),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

pub async fn logout() {
    match TokenManager::delete().await {
        Ok(true) => success!("Stored access token removed."),
        Ok(false) => info!("No access token stored."),
        Err(e) => error!("Failed to remove token: {}", e),
    }
}

/// Device-code login; the approved token is written to `token_path`.
pub(super) async fn device_login(
    client: &TraktClient,
    token_path: &Path,
    open_browser: bool,
) -> Res<Token> {
    let pb = spinner("Requesting device code...");
    let device = client.request_device_code().await;
    pb.finish_and_clear();
    let device = device?;

    info!(
        "Go to {} and enter the code: {}",
        device.verification_url.cyan(),
        device.user_code.green().bold()
    );
    if open_browser {
        open_in_browser(&device.verification_url);
    }

    let pb = spinner(format!(
        "Waiting for authorization (expires in {}s)...",
        device.expires_in
    ));
    let token = client.poll_device_token(&device).await;
    pb.finish_and_clear();

    persist_token(token?, token_path).await
}

async fn manual_login(
    client: &TraktClient,
    token_path: &Path,
    listen: bool,
    open_browser: bool,
) -> Res<Token> {
    let state = utils::generate_state();
    let url = client.authorize_url(&config::authorize_url(), &state)?;

    // listener has to be up before the browser redirects to it
    let listener = if listen {
        Some(start_listener(client.credentials().redirect_uri(), state).await?)
    } else {
        None
    };

    info!("Open the following URL in your browser and allow access:\n{}", url);
    if open_browser {
        open_in_browser(url.as_str());
    }

    let code = match listener {
        Some((shared_state, handle)) => {
            let pb = spinner("Waiting for the browser redirect...");
            let code = wait_for_code(shared_state).await;
            pb.finish_and_clear();
            handle.abort();
            code.ok_or_else(|| TraktError::Callback("no authorization code received".into()))?
        }
        None => read_code()?,
    };

    let pb = spinner("Exchanging authorization code...");
    let token = client.exchange_code(&code).await;
    pb.finish_and_clear();

    persist_token(token?, token_path).await
}

async fn start_listener(
    redirect_uri: &str,
    state: String,
) -> Res<(
    Arc<Mutex<Option<AuthorizationCallback>>>,
    tokio::task::JoinHandle<()>,
)> {
    let addr = server::listen_addr(redirect_uri)?;
    let shared_state = Arc::new(Mutex::new(Some(AuthorizationCallback { state, code: None })));

    let serve = server::start_api_server(addr, Arc::clone(&shared_state)).await?;
    let handle = tokio::spawn(async move {
        if let Err(e) = serve.await {
            warning!("Redirect listener stopped: {}", e);
        }
    });

    Ok((shared_state, handle))
}

async fn wait_for_code(shared_state: Arc<Mutex<Option<AuthorizationCallback>>>) -> Option<String> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_WAIT {
        let lock = shared_state.lock().await;
        if let Some(code) = lock.as_ref().and_then(|cb| cb.code.clone()) {
            return Some(code);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

fn read_code() -> Res<String> {
    print!("Paste the authorization code: ");
    io::stdout()
        .flush()
        .map_err(|e| TraktError::Callback(e.to_string()))?;

    let mut code = String::new();
    io::stdin()
        .read_line(&mut code)
        .map_err(|e| TraktError::Callback(e.to_string()))?;

    let code = code.trim().to_string();
    if code.is_empty() {
        return Err(TraktError::Callback("no authorization code entered".into()));
    }
    Ok(code)
}

async fn persist_token(token: Token, token_path: &Path) -> Res<Token> {
    let manager = TokenManager::at(token_path, token);
    manager.persist().await?;
    tracing::debug!(path = %manager.path().display(), "token saved");
    Ok(manager.current_token().clone())
}

fn open_in_browser(url: &str) {
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }
}
