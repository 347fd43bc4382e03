use starling_state::{Row, RowKind};

/// Whether `row` matches a free-text search. Matching is case-insensitive
/// on the fields shown for the row's kind; an empty query matches everything.
pub fn row_matches(row: &Row, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let contains = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase().contains(&query));

    match &row.kind {
        RowKind::Track(t) => {
            contains(Some(&t.title))
                || contains(t.artist.as_deref())
                || contains(t.album.as_deref())
                || contains(t.year.map(|y| y.to_string()).as_deref())
                || contains(t.genre.as_deref())
                || contains(t.path.as_deref())
        }
        RowKind::Album(a) => {
            contains(Some(&a.title))
                || contains(a.artist.as_deref())
                || contains(a.year.map(|y| y.to_string()).as_deref())
                || contains(a.genre.as_deref())
        }
        RowKind::Artist(a) => contains(Some(&a.title)),
        RowKind::Playlist(p) => {
            contains(Some(&p.title)) || contains(p.comment.as_deref()) || contains(p.owner.as_deref())
        }
    }
}

pub fn filter_rows(rows: &[Row], query: &str) -> Vec<Row> {
    rows.iter()
        .filter(|r| row_matches(r, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::{Playlist, Track};

    #[test]
    fn test_track_search_covers_year_and_path() {
        let row = Row::track(Track {
            year: Some(1998),
            path: Some("Music/Boards/Roygbiv.flac".into()),
            ..Track::new("1", "Roygbiv")
        });
        assert!(row_matches(&row, "1998"));
        assert!(row_matches(&row, "boards/"));
        assert!(row_matches(&row, "  "));
        assert!(!row_matches(&row, "jazz"));
    }

    #[test]
    fn test_playlist_search_covers_owner() {
        let row = Row::new(RowKind::Playlist(Playlist {
            owner: Some("Alice".into()),
            ..Playlist::default()
        }));
        assert!(row_matches(&row, "alice"));
        assert!(!row_matches(&row, "bob"));
    }
}
