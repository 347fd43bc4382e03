use crate::{Album, Artist, ItemId, Playlist, Track, UniqueId, sort::SortField};

/// One renderable record in a list or grid.
///
/// The same item can back several rows, so rows are identified by their
/// [`UniqueId`] and refer to the item by its [`ItemId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The identity of this row within its list
    pub unique_id: UniqueId,
    /// The record the row displays
    pub kind: RowKind,
}

/// The record behind a [`Row`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// A track
    Track(Track),
    /// An album
    Album(Album),
    /// An artist
    Artist(Artist),
    /// A playlist
    Playlist(Playlist),
}

/// The kind of a [`Row`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKindTag {
    /// A track
    Track,
    /// An album
    Album,
    /// An artist
    Artist,
    /// A playlist
    Playlist,
}

/// A value rows are ordered by. Missing values sort first, then numbers, then text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    /// No value
    Empty,
    /// A numeric value
    Number(i64),
    /// A lowercased string
    Text(String),
}
impl SortValue {
    fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => SortValue::Text(v.to_lowercase()),
            _ => SortValue::Empty,
        }
    }

    fn number(value: Option<impl Into<i64>>) -> Self {
        value.map_or(SortValue::Empty, |v| SortValue::Number(v.into()))
    }

    fn flag(value: bool) -> Self {
        if value {
            SortValue::Number(1)
        } else {
            SortValue::Empty
        }
    }
}

impl Row {
    /// Create a row with a freshly generated unique ID.
    pub fn new(kind: RowKind) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            kind,
        }
    }

    /// Create a row with the given unique ID.
    pub fn with_unique_id(unique_id: UniqueId, kind: RowKind) -> Self {
        Self { unique_id, kind }
    }

    /// Create a track row with a freshly generated unique ID.
    pub fn track(track: Track) -> Self {
        Self::new(RowKind::Track(track))
    }

    /// The ID of the item on the server.
    pub fn id(&self) -> &ItemId {
        match &self.kind {
            RowKind::Track(t) => &t.id,
            RowKind::Album(a) => &a.id,
            RowKind::Artist(a) => &a.id,
            RowKind::Playlist(p) => &p.id,
        }
    }

    /// The title of the row.
    pub fn title(&self) -> &str {
        match &self.kind {
            RowKind::Track(t) => &t.title,
            RowKind::Album(a) => &a.title,
            RowKind::Artist(a) => &a.title,
            RowKind::Playlist(p) => &p.title,
        }
    }

    /// The kind of the row.
    pub fn tag(&self) -> RowKindTag {
        match &self.kind {
            RowKind::Track(_) => RowKindTag::Track,
            RowKind::Album(_) => RowKindTag::Album,
            RowKind::Artist(_) => RowKindTag::Artist,
            RowKind::Playlist(_) => RowKindTag::Playlist,
        }
    }

    /// The track behind this row, if it is one.
    pub fn as_track(&self) -> Option<&Track> {
        match &self.kind {
            RowKind::Track(t) => Some(t),
            _ => None,
        }
    }

    /// Whether the row is starred. Playlists cannot be starred.
    pub fn starred(&self) -> bool {
        match &self.kind {
            RowKind::Track(t) => t.starred,
            RowKind::Album(a) => a.starred,
            RowKind::Artist(a) => a.starred,
            RowKind::Playlist(_) => false,
        }
    }

    /// Set the starred flag. Does nothing for playlists.
    pub fn set_starred(&mut self, starred: bool) {
        match &mut self.kind {
            RowKind::Track(t) => t.starred = starred,
            RowKind::Album(a) => a.starred = starred,
            RowKind::Artist(a) => a.starred = starred,
            RowKind::Playlist(_) => {}
        }
    }

    /// The user's rating of the row.
    pub fn user_rating(&self) -> Option<u8> {
        match &self.kind {
            RowKind::Track(t) => t.user_rating,
            RowKind::Album(a) => a.user_rating,
            RowKind::Artist(a) => a.user_rating,
            RowKind::Playlist(_) => None,
        }
    }

    /// Set the user's rating; a rating of 0 clears it. Does nothing for playlists.
    pub fn set_user_rating(&mut self, rating: u8) {
        let rating = (rating > 0).then_some(rating.min(5));
        match &mut self.kind {
            RowKind::Track(t) => t.user_rating = rating,
            RowKind::Album(a) => a.user_rating = rating,
            RowKind::Artist(a) => a.user_rating = rating,
            RowKind::Playlist(_) => {}
        }
    }

    /// The cover art ID of the row.
    pub fn cover_art(&self) -> Option<&str> {
        match &self.kind {
            RowKind::Track(t) => t.cover_art.as_deref(),
            RowKind::Album(a) => a.cover_art.as_deref(),
            RowKind::Artist(a) => a.cover_art.as_deref(),
            RowKind::Playlist(p) => p.cover_art.as_deref(),
        }
    }

    /// The value this row is ordered by for the given field.
    pub fn sort_value(&self, field: SortField) -> SortValue {
        use SortField as F;
        match &self.kind {
            RowKind::Track(t) => match field {
                F::Title => SortValue::text(Some(&t.title)),
                F::AlbumArtist => SortValue::text(t.album_artist.as_deref()),
                F::Album => SortValue::text(t.album.as_deref()),
                F::AlbumGenre => SortValue::text(t.album_genre.as_deref()),
                F::Duration => SortValue::number(t.duration),
                F::Year => SortValue::number(t.year),
                F::Track => SortValue::number(t.track),
                F::Disc => SortValue::number(t.disc_number),
                F::BitRate => SortValue::number(t.bit_rate),
                F::Size => SortValue::number(t.size.map(|s| s as i64)),
                F::Starred => SortValue::flag(t.starred),
                F::UserRating => SortValue::number(t.user_rating),
                F::PlayCount => SortValue::number(t.play_count.map(|c| c as i64)),
                F::Created => SortValue::text(t.created.as_deref()),
                F::Path => SortValue::text(t.path.as_deref()),
                F::Changed | F::SongCount | F::AlbumCount | F::Owner | F::Public | F::Comment => {
                    SortValue::Empty
                }
            },
            RowKind::Album(a) => match field {
                F::Title => SortValue::text(Some(&a.title)),
                F::AlbumArtist => SortValue::text(a.artist.as_deref()),
                F::Album => SortValue::text(Some(&a.title)),
                F::AlbumGenre => SortValue::text(a.genre.as_deref()),
                F::Duration => SortValue::number(Some(a.duration)),
                F::Year => SortValue::number(a.year),
                F::SongCount => SortValue::number(Some(a.song_count)),
                F::Starred => SortValue::flag(a.starred),
                F::UserRating => SortValue::number(a.user_rating),
                F::PlayCount => SortValue::number(a.play_count.map(|c| c as i64)),
                F::Created => SortValue::text(a.created.as_deref()),
                F::Track
                | F::Disc
                | F::BitRate
                | F::Size
                | F::Changed
                | F::AlbumCount
                | F::Owner
                | F::Public
                | F::Comment
                | F::Path => SortValue::Empty,
            },
            RowKind::Artist(a) => match field {
                F::Title | F::AlbumArtist => SortValue::text(Some(&a.title)),
                F::AlbumCount => SortValue::number(Some(a.album_count)),
                F::Starred => SortValue::flag(a.starred),
                F::UserRating => SortValue::number(a.user_rating),
                _ => SortValue::Empty,
            },
            RowKind::Playlist(p) => match field {
                F::Title => SortValue::text(Some(&p.title)),
                F::Duration => SortValue::number(Some(p.duration)),
                F::SongCount => SortValue::number(Some(p.song_count)),
                F::Created => SortValue::text(p.created.as_deref()),
                F::Changed => SortValue::text(p.changed.as_deref()),
                F::Owner => SortValue::text(p.owner.as_deref()),
                F::Public => SortValue::flag(p.public),
                F::Comment => SortValue::text(p.comment.as_deref()),
                _ => SortValue::Empty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_values_are_lowercased_and_ordered() {
        let row = Row::track(Track {
            album_artist: Some("Boards Of Canada".into()),
            ..Track::new("1", "Roygbiv")
        });
        assert_eq!(
            row.sort_value(SortField::AlbumArtist),
            SortValue::Text("boards of canada".into())
        );
        assert_eq!(row.sort_value(SortField::Year), SortValue::Empty);
        assert!(SortValue::Empty < SortValue::Number(-1));
        assert!(SortValue::Number(i64::MAX) < SortValue::Text(String::new()));
    }

    #[test]
    fn test_set_user_rating_zero_clears() {
        let mut row = Row::track(Track::new("1", "A"));
        row.set_user_rating(4);
        assert_eq!(row.user_rating(), Some(4));
        row.set_user_rating(0);
        assert_eq!(row.user_rating(), None);
    }

    #[test]
    fn test_playlists_ignore_star() {
        let mut row = Row::new(RowKind::Playlist(Playlist::default()));
        row.set_starred(true);
        assert!(!row.starred());
    }
}
