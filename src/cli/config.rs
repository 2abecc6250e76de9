use std::io::{self, Write};

use crate::{error, info, management::CredentialsManager, success, types::Credentials};

/// Stores the application credentials, prompting for anything not passed as
/// a flag.
pub async fn config(
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
) {
    let client_id = value_or_prompt(client_id, "Trakt Client ID");
    let client_secret = value_or_prompt(client_secret, "Trakt Client Secret");

    if client_id.is_empty() || client_secret.is_empty() {
        error!("Both a client id and a client secret are required.");
    }

    let credentials = Credentials {
        client_id,
        client_secret,
        redirect_uri: redirect_uri.filter(|uri| !uri.trim().is_empty()),
    };

    let manager = CredentialsManager::new(credentials);
    if let Err(e) = manager.persist().await {
        error!("Failed to save credentials: {}", e);
    }

    success!("Credentials saved to {}", manager.path().display());
    info!("Run 'traktshow login' to authenticate.");
}

fn value_or_prompt(value: Option<String>, label: &str) -> String {
    if let Some(value) = value {
        return value.trim().to_string();
    }

    print!("{}: ", label);
    if let Err(e) = io::stdout().flush() {
        error!("Cannot write prompt: {}", e);
    }

    let mut input = String::new();
    if let Err(e) = io::stdin().read_line(&mut input) {
        error!("Failed to read {}: {}", label, e);
    }
    input.trim().to_string()
}
