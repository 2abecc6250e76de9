mod common;

use serde_json::json;
use traktshow::{
    types::{HistoryItem, Stats, WatchedCount, WatchedItem},
    utils,
};

use common::{history_entry, watched_entry};

fn item(value: serde_json::Value) -> HistoryItem {
    serde_json::from_value(value).unwrap()
}

fn watched(plays: u32, aired: Option<u32>) -> WatchedItem {
    serde_json::from_value(watched_entry(1, "Dark", plays, aired)).unwrap()
}

#[test]
fn test_episode_code() {
    assert_eq!(utils::episode_code(1, 2), "S01E02");
    assert_eq!(utils::episode_code(12, 105), "S12E105");
}

#[test]
fn test_action_label() {
    assert_eq!(utils::action_label("watch"), "Watched");
    assert_eq!(utils::action_label("scrobble"), "Scrobbled");
    assert_eq!(utils::action_label("checkin"), "Checked in");
    assert_eq!(utils::action_label("rewatch"), "rewatch");
}

#[test]
fn test_history_item_decodes_trakt_payload() {
    let entry = item(history_entry(4));

    assert_eq!(entry.id, Some(4));
    assert_eq!(entry.kind.as_deref(), Some("episode"));
    assert_eq!(entry.action.as_deref(), Some("scrobble"));
    assert_eq!(entry.episode.as_ref().unwrap().number, 5);
    assert_eq!(
        utils::format_watched_at(&entry.watched_at),
        "2024-03-01 20:15:00"
    );
}

#[test]
fn test_history_line_for_episode() {
    let entry = item(history_entry(1));

    assert_eq!(
        utils::history_line(&entry),
        format!("[2024-03-01 20:15:00] {:<30} S01E02 - Episode 1", "Severance")
    );
}

#[test]
fn test_history_line_for_episode_without_title() {
    let entry = item(json!({
        "watched_at": "2024-03-01T20:15:00Z",
        "show": { "title": "Severance" },
        "episode": { "season": 2, "number": 10 }
    }));

    assert!(utils::history_line(&entry).ends_with("S02E10 - TBA"));
}

#[test]
fn test_history_line_for_movie() {
    let entry = item(json!({
        "watched_at": "2024-03-01T20:15:00Z",
        "type": "movie",
        "movie": { "title": "Arrival", "year": 2016 }
    }));

    assert_eq!(utils::history_title(&entry), "Arrival (2016)");
    assert_eq!(
        utils::history_line(&entry),
        format!("[2024-03-01 20:15:00] {:<30} (Movie)", "Arrival (2016)")
    );
}

#[test]
fn test_history_line_for_unknown_item() {
    let entry = item(json!({ "watched_at": "2024-03-01T20:15:00Z" }));

    assert_eq!(utils::history_title(&entry), "Unknown item");
    assert_eq!(
        utils::history_line(&entry),
        "[2024-03-01 20:15:00] Unknown item"
    );
}

#[test]
fn test_history_rows() {
    let history = vec![
        item(history_entry(0)),
        item(json!({
            "watched_at": "2024-02-01T10:00:00Z",
            "type": "movie",
            "movie": { "title": "Dune" }
        })),
    ];

    let rows = utils::history_rows(&history);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Severance");
    assert_eq!(rows[0].episode, "S01E01");
    assert_eq!(rows[0].episode_title, "Episode 0");
    assert_eq!(rows[1].title, "Dune");
    assert_eq!(rows[1].episode, "Movie");
    assert_eq!(rows[1].watched_at, "2024-02-01 10:00:00");
}

#[test]
fn test_history_details_only_lists_present_fields() {
    let entry = item(json!({
        "watched_at": "2024-03-01T20:15:00Z",
        "action": "checkin",
        "type": "episode",
        "show": {
            "title": "Severance",
            "genres": ["drama", "mystery"],
            "network": "Apple TV+",
            "ids": { "trakt": 154997 }
        },
        "episode": { "season": 1, "number": 1, "title": "Good News About Hell" }
    }));

    let lines = utils::history_details(&entry);

    assert!(lines.contains(&"Action: Checked in".to_string()));
    assert!(lines.contains(&"Type: Episode".to_string()));
    assert!(lines.contains(&"Genres: drama, mystery".to_string()));
    assert!(lines.contains(&"Network: Apple TV+".to_string()));
    assert!(lines.contains(&"Trakt ID: 154997".to_string()));
    assert!(lines.contains(&"Episode: S01E01 Good News About Hell".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("Rating")));
    assert!(!lines.iter().any(|l| l.starts_with("Status")));
}

#[test]
fn test_aired_episodes_suspect() {
    assert!(watched(3, None).aired_episodes_suspect());
    assert!(watched(3, Some(0)).aired_episodes_suspect());
    assert!(watched(11, Some(10)).aired_episodes_suspect());
    assert!(!watched(10, Some(10)).aired_episodes_suspect());
    assert!(!watched(2, Some(10)).aired_episodes_suspect());
}

#[test]
fn test_shows_in_progress() {
    let items = vec![
        watched(2, Some(10)),
        watched(10, Some(10)),
        watched(4, None),
        watched(1, Some(0)),
    ];

    let open = utils::shows_in_progress(&items, false);
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].plays, 2);

    let all = utils::shows_in_progress(&items, true);
    assert_eq!(all.len(), 2);
}

#[test]
fn test_progress_line() {
    assert_eq!(
        utils::progress_line("Dark", 5, 10, 10),
        format!("{:<40} [=====     ] 5/10", "Dark")
    );
    assert_eq!(
        utils::progress_line("Dark", 12, 10, 4),
        format!("{:<40} [====] 10/10", "Dark")
    );
    assert_eq!(
        utils::progress_line("Dark", 0, 0, 4),
        format!("{:<40} [    ] 0/0", "Dark")
    );
}

#[test]
fn test_stats_rows() {
    let stats = Stats {
        movies: WatchedCount {
            watched: 114,
            plays: 155,
            minutes: 15650,
        },
        shows: WatchedCount {
            watched: 16,
            ..Default::default()
        },
        episodes: WatchedCount {
            watched: 534,
            plays: 552,
            minutes: 17330,
        },
    };

    let rows = utils::stats_rows(&stats);

    let summary: Vec<(&str, u64, u64)> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.watched, r.plays))
        .collect();
    assert_eq!(
        summary,
        vec![("Movies", 114, 155), ("Shows", 16, 0), ("Episodes", 534, 552)]
    );
}

#[test]
fn test_generate_state() {
    let a = utils::generate_state();
    let b = utils::generate_state();

    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(a, b);
}
