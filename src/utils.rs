use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{HistoryItem, HistoryTableRow, Stats, StatsTableRow, WatchedItem};

pub const WATCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Random `state` value for the authorization URL.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

pub fn format_watched_at(watched_at: &DateTime<Utc>) -> String {
    watched_at.format(WATCHED_AT_FORMAT).to_string()
}

pub fn action_label(action: &str) -> &str {
    match action {
        "watch" => "Watched",
        "scrobble" => "Scrobbled",
        "checkin" => "Checked in",
        other => other,
    }
}

pub fn kind_label(kind: &str) -> &str {
    match kind {
        "movie" => "Movie",
        "show" => "Show",
        "episode" => "Episode",
        other => other,
    }
}

fn is_movie(item: &HistoryItem) -> bool {
    item.kind.as_deref() == Some("movie") || (item.movie.is_some() && item.show.is_none())
}

/// Display title of a history entry: the show, the movie, or a placeholder.
pub fn history_title(item: &HistoryItem) -> String {
    if is_movie(item) {
        if let Some(movie) = item.movie.as_ref().filter(|m| !m.title.is_empty()) {
            return match movie.year {
                Some(year) => format!("{} ({})", movie.title, year),
                None => movie.title.clone(),
            };
        }
    }

    match &item.show {
        Some(show) if !show.title.is_empty() => show.title.clone(),
        _ => "Unknown item".to_string(),
    }
}

/// One-line rendering used by plain history output:
/// `[2024-01-01 20:00:00] Title   S01E02 - Episode`.
pub fn history_line(item: &HistoryItem) -> String {
    let watched_at = format_watched_at(&item.watched_at);
    let title = history_title(item);

    if is_movie(item) {
        return format!("[{}] {:<30} (Movie)", watched_at, title);
    }

    match (&item.show, &item.episode) {
        (Some(_), Some(episode)) => format!(
            "[{}] {:<30} {} - {}",
            watched_at,
            title,
            episode_code(episode.season, episode.number),
            episode.title.as_deref().unwrap_or("TBA")
        ),
        (Some(_), None) => format!("[{}] {:<30}", watched_at, title),
        _ => format!("[{}] Unknown item", watched_at),
    }
}

pub fn history_rows(history: &[HistoryItem]) -> Vec<HistoryTableRow> {
    history
        .iter()
        .map(|item| {
            let (episode, episode_title) = if is_movie(item) {
                ("Movie".to_string(), String::new())
            } else {
                match &item.episode {
                    Some(ep) => (
                        episode_code(ep.season, ep.number),
                        ep.title.clone().unwrap_or_default(),
                    ),
                    None => (String::new(), String::new()),
                }
            };

            HistoryTableRow {
                watched_at: format_watched_at(&item.watched_at),
                title: history_title(item),
                episode,
                episode_title,
            }
        })
        .collect()
}

/// Detailed block for `history --extended`. Only fields the API sent are
/// listed.
pub fn history_details(item: &HistoryItem) -> Vec<String> {
    let mut lines = vec![format!("Watched at: {}", format_watched_at(&item.watched_at))];
    if let Some(action) = &item.action {
        lines.push(format!("Action: {}", action_label(action)));
    }
    if let Some(kind) = &item.kind {
        lines.push(format!("Type: {}", kind_label(kind)));
    }

    if let Some(movie) = item.movie.as_ref().filter(|_| is_movie(item)) {
        lines.push(format!("Movie: {}", movie.title));
        push_opt(&mut lines, "Year", movie.year);
        push_opt(&mut lines, "Overview", movie.overview.as_ref());
        if let Some(rating) = movie.rating {
            lines.push(format!("Rating: {:.2}", rating));
        }
        push_opt(&mut lines, "Runtime (min)", movie.runtime);
        push_opt(&mut lines, "Trakt ID", movie.ids.trakt);
        push_opt(&mut lines, "IMDB ID", movie.ids.imdb.as_ref());
        return lines;
    }

    if let Some(show) = &item.show {
        lines.push(format!("Show: {}", show.title));
        push_opt(&mut lines, "Year", show.year);
        push_opt(&mut lines, "Overview", show.overview.as_ref());
        if !show.genres.is_empty() {
            lines.push(format!("Genres: {}", show.genres.join(", ")));
        }
        push_opt(&mut lines, "Status", show.status.as_ref());
        if let Some(rating) = show.rating {
            lines.push(format!("Rating: {:.2} ({} votes)", rating, show.votes.unwrap_or(0)));
        }
        push_opt(&mut lines, "Network", show.network.as_ref());
        push_opt(&mut lines, "Language", show.language.as_ref());
        push_opt(&mut lines, "Country", show.country.as_ref());
        push_opt(&mut lines, "First aired", show.first_aired.as_ref());
        push_opt(&mut lines, "Runtime (min)", show.runtime);
        push_opt(&mut lines, "Aired episodes", show.aired_episodes);
        if let Some(airs) = &show.airs {
            let parts: Vec<&str> = [&airs.day, &airs.time, &airs.timezone]
                .into_iter()
                .filter_map(|p| p.as_deref())
                .collect();
            if !parts.is_empty() {
                lines.push(format!("Airs: {}", parts.join(" ")));
            }
        }
        push_opt(&mut lines, "Homepage", show.homepage.as_ref());
        push_opt(&mut lines, "Certification", show.certification.as_ref());
        push_opt(&mut lines, "Trakt ID", show.ids.trakt);
        push_opt(&mut lines, "IMDB ID", show.ids.imdb.as_ref());
        push_opt(&mut lines, "TMDb ID", show.ids.tmdb);
    }

    if let Some(episode) = &item.episode {
        lines.push(format!(
            "Episode: {} {}",
            episode_code(episode.season, episode.number),
            episode.title.as_deref().unwrap_or("TBA")
        ));
        push_opt(&mut lines, "Episode overview", episode.overview.as_ref());
        if let Some(rating) = episode.rating {
            lines.push(format!(
                "Episode rating: {:.2} ({} votes)",
                rating,
                episode.votes.unwrap_or(0)
            ));
        }
        push_opt(&mut lines, "Episode runtime (min)", episode.runtime);
        push_opt(&mut lines, "Episode first aired", episode.first_aired.as_ref());
        push_opt(&mut lines, "Episode Trakt ID", episode.ids.trakt);
    }

    lines
}

fn push_opt<T: std::fmt::Display>(lines: &mut Vec<String>, label: &str, value: Option<T>) {
    if let Some(value) = value {
        lines.push(format!("{}: {}", label, value));
    }
}

pub fn stats_rows(stats: &Stats) -> Vec<StatsTableRow> {
    [
        ("Movies", stats.movies),
        ("Shows", stats.shows),
        ("Episodes", stats.episodes),
    ]
    .into_iter()
    .map(|(category, count)| StatsTableRow {
        category: category.to_string(),
        watched: count.watched,
        plays: count.plays,
    })
    .collect()
}

/// Shows with unwatched aired episodes, or every show with a known aired
/// count when `include_complete` is set.
pub fn shows_in_progress(watched: &[WatchedItem], include_complete: bool) -> Vec<&WatchedItem> {
    watched
        .iter()
        .filter(|item| match item.show.aired_episodes {
            Some(aired) if aired > 0 => include_complete || item.plays < aired,
            _ => false,
        })
        .collect()
}

/// Plain-text progress bar for output that is not a terminal:
/// `Title                [=====     ] 5/10`.
pub fn progress_line(title: &str, plays: u32, aired: u32, width: usize) -> String {
    let done = plays.min(aired);
    let filled = if aired == 0 {
        0
    } else {
        (done as usize * width) / aired as usize
    };

    format!(
        "{:<40} [{}{}] {}/{}",
        title,
        "=".repeat(filled),
        " ".repeat(width - filled),
        done,
        aired
    )
}
