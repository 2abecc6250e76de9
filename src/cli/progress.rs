use std::io::IsTerminal;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::{error, success, utils};

use super::{session, spinner};

const BAR_WIDTH: usize = 30;

/// One bar per show: plays out of aired episodes.
pub async fn progress(user: String, all: bool) {
    let mut client = session::authorized_client().await;

    let pb = spinner("Fetching watched shows...");
    let mut watched = client.get_watched(&user).await;
    pb.finish_and_clear();

    if let Err(e) = &watched {
        if session::relogin_if_rejected(&mut client, e).await {
            watched = client.get_watched(&user).await;
        }
    }

    let watched = match watched {
        Ok(watched) => watched,
        Err(e) => error!("Failed to fetch progress: {}", e),
    };

    let shows = utils::shows_in_progress(&watched, all);
    if shows.is_empty() {
        success!("All caught up, no show with unwatched episodes.");
        return;
    }

    println!("{}", "Your Trakt.tv Watch Progress".bold());

    if !std::io::stderr().is_terminal() {
        for item in shows {
            let aired = item.show.aired_episodes.unwrap_or(0);
            println!(
                "{}",
                utils::progress_line(&item.show.title, item.plays, aired, BAR_WIDTH)
            );
        }
        return;
    }

    let style = ProgressStyle::with_template("{msg:40} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    for item in shows {
        let aired = u64::from(item.show.aired_episodes.unwrap_or(0));
        let bar = ProgressBar::with_draw_target(Some(aired), ProgressDrawTarget::stderr());
        bar.set_style(style.clone());
        bar.set_message(item.show.title.clone());
        bar.set_position(u64::from(item.plays).min(aired));
        bar.abandon();
    }
}
