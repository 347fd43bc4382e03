//! Playback filters that leave matching tracks out of a play queue.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::Row;

/// A user-defined expression; tracks whose title matches it are left out when
/// a play queue is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackFilter {
    /// A regular expression, matched case-insensitively against track titles
    pub filter: String,
    /// Whether the filter is applied
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}
fn default_enabled() -> bool {
    true
}
impl PlaybackFilter {
    /// An enabled filter.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            enabled: true,
        }
    }
}

/// The result of [`filter_entries`].
#[derive(Debug, Clone, Default)]
pub struct FilteredEntries {
    /// The tracks that passed every filter
    pub entries: Vec<Row>,
    /// How many tracks there were before filtering
    pub original: usize,
    /// How many tracks were filtered out
    pub filtered: usize,
}

/// Compile the enabled filters. Expressions that fail to compile are skipped.
pub fn compile_filters(filters: &[PlaybackFilter]) -> Vec<Regex> {
    filters
        .iter()
        .filter(|f| f.enabled && !f.filter.is_empty())
        .filter_map(|f| {
            RegexBuilder::new(&f.filter)
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect()
}

/// Whether `row` is a track whose title matches one of `compiled`.
pub fn is_filtered(compiled: &[Regex], row: &Row) -> bool {
    row.as_track()
        .is_some_and(|t| compiled.iter().any(|re| re.is_match(&t.title)))
}

/// Keep the tracks of `rows` that no enabled filter matches. Rows that are not
/// tracks cannot be played and are dropped without being counted.
pub fn filter_entries(filters: &[PlaybackFilter], rows: &[Row]) -> FilteredEntries {
    let compiled = compile_filters(filters);
    let tracks: Vec<&Row> = rows.iter().filter(|r| r.as_track().is_some()).collect();
    let original = tracks.len();
    let entries: Vec<Row> = tracks
        .into_iter()
        .filter(|r| !is_filtered(&compiled, r))
        .cloned()
        .collect();
    FilteredEntries {
        filtered: original - entries.len(),
        original,
        entries,
    }
}

/// Whether tracks were started or queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayedKind {
    /// The queue was replaced
    Play,
    /// Tracks were appended to the queue
    Add,
}

/// The message shown after tracks are played or queued.
pub fn played_rows_notification(kind: PlayedKind, count: &FilteredEntries) -> String {
    let verb = match kind {
        PlayedKind::Play => "Playing",
        PlayedKind::Add => "Added",
    };
    let played = count.entries.len();
    let noun = if played == 1 { "song" } else { "songs" };
    let mut message = format!("{verb} {played} {noun}");
    if count.filtered > 0 {
        message.push_str(&format!(" [{} filtered]", count.filtered));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Album, RowKind, Track};

    fn tracks(titles: &[&str]) -> Vec<Row> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Row::track(Track::new(format!("t{i}"), *t)))
            .collect()
    }

    #[test]
    fn test_filter_entries_matches_case_insensitively() {
        let rows = tracks(&["Intro", "Song (Live)", "Outro", "another LIVE take"]);
        let result = filter_entries(&[PlaybackFilter::new(r"\blive\b")], &rows);
        let titles: Vec<_> = result.entries.iter().map(Row::title).collect();
        assert_eq!(titles, ["Intro", "Outro"]);
        assert_eq!(result.original, 4);
        assert_eq!(result.filtered, 2);
    }

    #[test]
    fn test_disabled_and_invalid_filters_are_ignored() {
        let rows = tracks(&["Intro", "Live"]);
        let filters = [
            PlaybackFilter {
                filter: "live".into(),
                enabled: false,
            },
            PlaybackFilter::new("(unclosed"),
        ];
        let result = filter_entries(&filters, &rows);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.filtered, 0);
    }

    #[test]
    fn test_non_tracks_are_dropped_uncounted() {
        let mut rows = tracks(&["A"]);
        rows.push(Row::new(RowKind::Album(Album::new("al", "Album"))));
        let result = filter_entries(&[], &rows);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.original, 1);
    }

    #[test]
    fn test_played_rows_notification() {
        let rows = tracks(&["A", "B", "skip me"]);
        let result = filter_entries(&[PlaybackFilter::new("skip")], &rows);
        assert_eq!(
            played_rows_notification(PlayedKind::Play, &result),
            "Playing 2 songs [1 filtered]"
        );
        let result = filter_entries(&[], &tracks(&["A"]));
        assert_eq!(played_rows_notification(PlayedKind::Add, &result), "Added 1 song");
    }
}
