use colored::Colorize;
use tabled::Table;

use crate::{error, info, utils};

use super::{session, spinner};

pub async fn stats(user: String) {
    let mut client = session::authorized_client().await;

    let pb = spinner("Fetching stats...");
    let mut stats = client.get_stats(&user).await;
    pb.finish_and_clear();

    if let Err(e) = &stats {
        if session::relogin_if_rejected(&mut client, e).await {
            stats = client.get_stats(&user).await;
        }
    }

    match stats {
        Ok(stats) => {
            println!("{}", "Your Trakt.tv Statistics".bold());
            println!("{}", Table::new(utils::stats_rows(&stats)));
        }
        Err(e) => error!("Failed to fetch stats: {}", e),
    }
}

pub async fn profile(user: String) {
    let mut client = session::authorized_client().await;

    let pb = spinner("Fetching profile...");
    let mut profile = client.get_profile(&user).await;
    pb.finish_and_clear();

    if let Err(e) = &profile {
        if session::relogin_if_rejected(&mut client, e).await {
            profile = client.get_profile(&user).await;
        }
    }

    let profile = match profile {
        Ok(profile) => profile,
        Err(e) => error!("Failed to fetch profile: {}", e),
    };

    info!("Username: {}", profile.username.bold());
    if let Some(name) = profile.name.as_deref().filter(|n| !n.is_empty()) {
        info!("Name: {}", name);
    }
    if let Some(joined_at) = &profile.joined_at {
        info!("Joined: {}", joined_at);
    }
    if let Some(location) = profile.location.as_deref().filter(|l| !l.is_empty()) {
        info!("Location: {}", location);
    }
    if profile.vip == Some(true) {
        info!("VIP member");
    }
    if profile.private {
        info!("Profile is private");
    }
}
