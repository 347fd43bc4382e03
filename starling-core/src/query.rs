use std::collections::HashMap;

use starling_state::{ItemId, Row};

use crate::route::AlbumListFilter;

/// Identifies one cached server response: the entity kind, its ID and any
/// filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AlbumList { filter: AlbumListFilter, page: usize },
    Album(ItemId),
    Playlists,
    Playlist(ItemId),
    Artist(ItemId),
    SimilarSongs { artist: ItemId, count: usize },
}
impl QueryKey {
    pub const ALBUM_LIST_PAGE_SIZE: usize = 50;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumDetail {
    /// The album itself, as an album row
    pub album: Row,
    pub tracks: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDetail {
    /// The playlist itself, as a playlist row
    pub playlist: Row,
    pub entries: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetail {
    /// The artist itself, as an artist row
    pub artist: Row,
    pub albums: Vec<Row>,
    pub biography: Option<String>,
}

/// A cached response.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Albums(Vec<Row>),
    Album(AlbumDetail),
    Playlists(Vec<Row>),
    Playlist(PlaylistDetail),
    Artist(ArtistDetail),
    SimilarSongs(Vec<Row>),
}
impl QueryData {
    /// Every row in the response, including the header row of detail responses.
    fn rows_mut(&mut self) -> Box<dyn Iterator<Item = &mut Row> + '_> {
        match self {
            QueryData::Albums(rows) | QueryData::Playlists(rows) | QueryData::SimilarSongs(rows) => {
                Box::new(rows.iter_mut())
            }
            QueryData::Album(d) => Box::new(std::iter::once(&mut d.album).chain(d.tracks.iter_mut())),
            QueryData::Playlist(d) => {
                Box::new(std::iter::once(&mut d.playlist).chain(d.entries.iter_mut()))
            }
            QueryData::Artist(d) => {
                Box::new(std::iter::once(&mut d.artist).chain(d.albums.iter_mut()))
            }
        }
    }
}

/// What a view sees when it looks up a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryStatus<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a QueryData),
}

#[derive(Debug, Default)]
struct Entry {
    data: Option<QueryData>,
    error: Option<String>,
    in_flight: bool,
    stale: bool,
}

/// Server responses keyed by [`QueryKey`].
///
/// At most one request per key is in flight. Stale data stays visible while
/// it is refetched.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}
impl QueryCache {
    /// Mark `key` as being fetched. Returns false if it is already in flight or
    /// holds fresh data, in which case no request should be made.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> bool {
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.in_flight || (entry.data.is_some() && !entry.stale) {
            return false;
        }
        entry.in_flight = true;
        entry.error = None;
        true
    }

    /// Store the outcome of a fetch. A failure keeps any earlier data.
    pub fn resolve(&mut self, key: &QueryKey, result: Result<QueryData, String>) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.in_flight = false;
        entry.stale = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
            }
            Err(error) => {
                tracing::warn!("fetch of {key:?} failed: {error}");
                entry.error = Some(error);
            }
        }
    }

    /// Mark `key` for refetching.
    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    pub fn get(&self, key: &QueryKey) -> QueryStatus<'_> {
        match self.entries.get(key) {
            Some(Entry {
                data: Some(data), ..
            }) => QueryStatus::Ready(data),
            Some(Entry {
                error: Some(error), ..
            }) => QueryStatus::Failed(error),
            _ => QueryStatus::Loading,
        }
    }

    pub fn data(&self, key: &QueryKey) -> Option<&QueryData> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight)
    }

    /// Apply `f` to every cached row with item ID `id`, in every response.
    /// Returns how many rows were updated.
    pub fn update_rows(&mut self, id: &ItemId, mut f: impl FnMut(&mut Row)) -> usize {
        let mut updated = 0;
        for data in self.entries.values_mut().filter_map(|e| e.data.as_mut()) {
            for row in data.rows_mut().filter(|r| r.id() == id) {
                f(row);
                updated += 1;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::{Album, RowKind, Track};

    fn album_detail(id: &str, track_ids: &[&str]) -> QueryData {
        QueryData::Album(AlbumDetail {
            album: Row::new(RowKind::Album(Album::new(id, "Album"))),
            tracks: track_ids
                .iter()
                .map(|t| Row::track(Track::new(*t, format!("Track {t}"))))
                .collect(),
        })
    }

    #[test]
    fn test_concurrent_fetches_are_deduplicated() {
        let mut cache = QueryCache::default();
        let key = QueryKey::Album(ItemId::from("al1"));
        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        assert_eq!(cache.get(&key), QueryStatus::Loading);

        cache.resolve(&key, Ok(album_detail("al1", &["t1"])));
        assert!(matches!(cache.get(&key), QueryStatus::Ready(_)));
        assert!(!cache.begin_fetch(&key));

        cache.invalidate(&key);
        assert!(cache.begin_fetch(&key));
        assert!(matches!(cache.get(&key), QueryStatus::Ready(_)));
    }

    #[test]
    fn test_failed_fetch_reports_error() {
        let mut cache = QueryCache::default();
        let key = QueryKey::Playlists;
        cache.begin_fetch(&key);
        cache.resolve(&key, Err("boom".to_string()));
        assert_eq!(cache.get(&key), QueryStatus::Failed("boom"));
        assert!(cache.begin_fetch(&key));
    }

    #[test]
    fn test_update_rows_touches_every_snapshot() {
        let mut cache = QueryCache::default();
        let album = QueryKey::Album(ItemId::from("al1"));
        let similar = QueryKey::SimilarSongs {
            artist: ItemId::from("ar1"),
            count: 50,
        };
        cache.begin_fetch(&album);
        cache.resolve(&album, Ok(album_detail("al1", &["42", "7", "42"])));
        cache.begin_fetch(&similar);
        cache.resolve(
            &similar,
            Ok(QueryData::SimilarSongs(vec![Row::track(Track::new("42", "x"))])),
        );

        let updated = cache.update_rows(&ItemId::from("42"), |r| r.set_starred(true));
        assert_eq!(updated, 3);

        let Some(QueryData::Album(detail)) = cache.data(&album) else {
            panic!("album missing");
        };
        let starred: Vec<bool> = detail.tracks.iter().map(Row::starred).collect();
        assert_eq!(starred, [true, false, true]);
    }
}
