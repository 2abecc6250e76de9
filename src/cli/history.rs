use std::io::IsTerminal;

use colored::Colorize;
use tabled::Table;

use crate::{
    Res, error, info,
    management::HistoryExportManager,
    success,
    trakt::TraktClient,
    types::HistoryItem,
    utils, warning,
};

use super::{session, spinner};

/// Recent history, the full export, or the last export read back from disk.
pub async fn history(
    user: String,
    limit: u32,
    page: u32,
    export: bool,
    extended: bool,
    cached: bool,
) {
    if cached {
        match HistoryExportManager::load().await {
            Ok(manager) => {
                info!(
                    "Showing {} exported items from {}",
                    manager.count(),
                    manager.path().display()
                );
                display(manager.history(), extended);
            }
            Err(e) => warning!(
                "Failed to load exported history. Run 'traktshow history --export' first.\n Error: {}",
                e
            ),
        }
        return;
    }

    let mut client = session::authorized_client().await;

    if export {
        let mut history = fetch_all(&client, &user).await;
        if let Err(e) = &history {
            if session::relogin_if_rejected(&mut client, e).await {
                history = fetch_all(&client, &user).await;
            }
        }

        let history = match history {
            Ok(history) => history,
            Err(e) => error!("Failed to fetch all history: {}", e),
        };

        let manager = HistoryExportManager::new(history);
        if let Err(e) = manager.persist().await {
            error!("Failed to save history: {}", e);
        }
        success!(
            "Exported {} history items to {}",
            manager.count(),
            manager.path().display()
        );
        return;
    }

    let mut history = fetch_page(&client, &user, limit, page, extended).await;
    if let Err(e) = &history {
        if session::relogin_if_rejected(&mut client, e).await {
            history = fetch_page(&client, &user, limit, page, extended).await;
        }
    }

    match history {
        Ok(history) => display(&history, extended),
        Err(e) => error!("Failed to fetch history: {}", e),
    }
}

async fn fetch_all(client: &TraktClient, user: &str) -> Res<Vec<HistoryItem>> {
    let pb = spinner("Fetching full history...");
    let history = client
        .get_all_history_with(user, |page, count| {
            pb.set_message(format!("Fetched {} items ({} pages)...", count, page))
        })
        .await;
    pb.finish_and_clear();
    history
}

async fn fetch_page(
    client: &TraktClient,
    user: &str,
    limit: u32,
    page: u32,
    extended: bool,
) -> Res<Vec<HistoryItem>> {
    let pb = spinner("Fetching history...");
    let history = if extended {
        client.get_history_extended(user, limit, page).await
    } else {
        client.get_history(user, limit, page).await
    };
    pb.finish_and_clear();
    history
}

fn display(history: &[HistoryItem], extended: bool) {
    if history.is_empty() {
        info!("No history found.");
        return;
    }

    if extended {
        for (i, item) in history.iter().enumerate() {
            println!("\n{}", format!("#{} {}", i + 1, utils::history_title(item)).bold());
            for line in utils::history_details(item) {
                println!("  {}", line);
            }
        }
        return;
    }

    // one line per item when piped
    if !std::io::stdout().is_terminal() {
        for item in history {
            println!("{}", utils::history_line(item));
        }
        return;
    }

    let table = Table::new(utils::history_rows(history));
    println!("{}", table);
}
