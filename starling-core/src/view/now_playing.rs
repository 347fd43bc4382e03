use std::sync::LazyLock;

use regex::Regex;
use starling_state::{
    ColumnKey, ItemId, ListType, PlayFromHere, Row, RowKind, SortContext, SortDirection,
    SortSpec, Track, sort::sort_rows,
};

use crate::{
    app_state::AppState,
    command::Command,
    query::{ArtistDetail, QueryData, QueryKey, QueryStatus},
    route::{AlbumListFilter, Route},
    view::{
        actions, album_list::ALBUM_LIST_PAGE, scrolling_menu::ScrollingMenu,
        table::{ContextMenuItem, ListViewTable},
    },
};

const SIMILAR_SONGS: usize = 50;
const LATEST_ALBUMS: usize = 10;

/// Details about the artist of the track being played: biography, similar
/// songs and their latest albums.
#[derive(Debug, Clone)]
pub struct NowPlayingView {
    /// The artist being shown, once resolved from the current track.
    artist_id: Option<ItemId>,
    pub similar: ListViewTable,
    pub latest_albums: ScrollingMenu,
    /// Whether the whole biography is shown.
    pub expanded_biography: bool,
}
impl Default for NowPlayingView {
    fn default() -> Self {
        Self {
            artist_id: None,
            similar: ListViewTable::new(ListType::Music, SortContext::page("nowPlaying"))
                .unsortable()
                .with_disabled_items([ContextMenuItem::SelectAll]),
            latest_albums: ScrollingMenu::default(),
            expanded_biography: false,
        }
    }
}
impl NowPlayingView {
    pub fn artist_id(&self) -> Option<&ItemId> {
        self.artist_id.as_ref()
    }

    /// The artist of the current track: its album artist, or failing that the
    /// artist of its album once the album is loaded.
    pub fn resolve_artist(state: &AppState) -> Option<ItemId> {
        let track = state.play_queue.current()?.as_track()?;
        if let Some(id) = &track.album_artist_id {
            return Some(id.clone());
        }
        let album_id = track.album_id.as_ref()?;
        match state.query_cache.data(&QueryKey::Album(album_id.clone())) {
            Some(QueryData::Album(detail)) => match &detail.album.kind {
                RowKind::Album(album) => album.artist_id.clone(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Follow the current track. Returns the fetches needed when the artist
    /// changes, or the album fetch needed to find the artist.
    pub fn sync(&mut self, state: &AppState) -> Vec<Command> {
        let Some(artist_id) = Self::resolve_artist(state) else {
            return state
                .play_queue
                .current()
                .and_then(Row::as_track)
                .and_then(|t| t.album_id.clone())
                .map(|album_id| {
                    let key = QueryKey::Album(album_id);
                    if state.query_cache.data(&key).is_some() || state.query_cache.is_in_flight(&key) {
                        vec![]
                    } else {
                        vec![Command::Fetch(key)]
                    }
                })
                .unwrap_or_default();
        };
        if self.artist_id.as_ref() == Some(&artist_id) {
            self.refresh_latest_albums(state);
            return vec![];
        }
        tracing::debug!("now playing artist is {artist_id}");
        self.similar.unmount();
        self.expanded_biography = false;
        self.artist_id = Some(artist_id.clone());
        self.refresh_latest_albums(state);
        vec![
            Command::Fetch(QueryKey::Artist(artist_id.clone())),
            Command::Fetch(Self::similar_key(artist_id)),
        ]
    }

    fn similar_key(artist: ItemId) -> QueryKey {
        QueryKey::SimilarSongs {
            artist,
            count: SIMILAR_SONGS,
        }
    }

    pub fn current_track(state: &AppState) -> Option<&Track> {
        state.play_queue.current()?.as_track()
    }

    pub fn artist_status<'a>(&self, state: &'a AppState) -> Option<QueryStatus<'a>> {
        let id = self.artist_id.clone()?;
        Some(state.query_cache.get(&QueryKey::Artist(id)))
    }

    pub fn artist<'a>(&self, state: &'a AppState) -> Option<&'a ArtistDetail> {
        let id = self.artist_id.clone()?;
        match state.query_cache.data(&QueryKey::Artist(id)) {
            Some(QueryData::Artist(detail)) => Some(detail),
            _ => None,
        }
    }

    pub fn biography(&self, state: &AppState) -> Option<String> {
        self.artist(state)
            .and_then(|a| a.biography.as_deref())
            .map(clean_biography)
            .filter(|b| !b.is_empty())
    }

    pub fn similar_rows(&self, state: &AppState) -> Vec<Row> {
        let Some(id) = self.artist_id.clone() else {
            return vec![];
        };
        match state.query_cache.data(&Self::similar_key(id)) {
            Some(QueryData::SimilarSongs(rows)) => self.similar.display_rows(state, rows),
            _ => vec![],
        }
    }

    /// The artist's ten most recent albums, newest first.
    pub fn latest_albums(&self, state: &AppState) -> Vec<Row> {
        let Some(artist) = self.artist(state) else {
            return vec![];
        };
        let spec = SortSpec::by(ColumnKey::Year, SortDirection::Descending);
        let mut albums = sort_rows(&artist.albums, &spec);
        albums.truncate(LATEST_ALBUMS);
        albums
    }

    fn refresh_latest_albums(&mut self, state: &AppState) {
        let albums = self.latest_albums(state);
        let unchanged = albums.len() == self.latest_albums.cards.len()
            && albums
                .iter()
                .zip(&self.latest_albums.cards)
                .all(|(row, card)| row.id() == &card.id && row.starred() == card.starred);
        if !unchanged {
            self.latest_albums = ScrollingMenu::new("Latest albums", &albums);
        }
    }

    pub fn play_from_here(&self, state: &mut AppState, play: &PlayFromHere) {
        actions::play_from_here(state, play);
    }

    /// Star or unstar a similar song, refetching the list once the server
    /// has accepted the change.
    pub fn row_favorite(&self, state: &mut AppState, row: &Row) -> Vec<Command> {
        let on_success = self
            .artist_id
            .clone()
            .map(|id| vec![Command::Refetch(Self::similar_key(id))])
            .unwrap_or_default();
        actions::set_favorite_then(state, std::slice::from_ref(row), !row.starred(), on_success)
    }

    /// Star or unstar an album in the latest albums strip.
    pub fn album_favorite(&self, state: &mut AppState, row: &Row) -> Vec<Command> {
        let on_success = self
            .artist_id
            .clone()
            .map(|id| vec![Command::Refetch(QueryKey::Artist(id))])
            .unwrap_or_default();
        actions::set_favorite_then(state, std::slice::from_ref(row), !row.starred(), on_success)
    }

    pub fn row_rating(&self, state: &mut AppState, row: &Row, rating: u8) -> Vec<Command> {
        actions::set_rating(state, std::slice::from_ref(row), rating)
    }

    pub fn genre_link(&self, state: &mut AppState, genre: &str) -> Vec<Command> {
        state.scroll.reset_page(ALBUM_LIST_PAGE);
        vec![Command::Navigate(Route::AlbumList(AlbumListFilter::Genre(
            genre.to_string(),
        )))]
    }

    pub fn album_link(state: &AppState) -> Vec<Command> {
        Self::current_track(state)
            .and_then(|t| t.album_id.clone())
            .map(|id| vec![Command::Navigate(Route::Album(id))])
            .unwrap_or_default()
    }
}

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Strip markup and the Last.fm link from a biography.
pub fn clean_biography(biography: &str) -> String {
    let text = match HTML_TAG.as_ref() {
        Some(re) => re.replace_all(biography, "").into_owned(),
        None => biography.to_string(),
    };
    text.replace("Read more on Last.fm", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ServerType, query::AlbumDetail};
    use starling_state::{Album, Artist};

    fn resolve(state: &mut AppState, key: QueryKey, data: QueryData) {
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(&key, Ok(data));
    }

    #[test]
    fn test_artist_resolves_through_album() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut track = Track::new("t1", "One");
        track.album_id = Some(ItemId::from("al1"));
        state.play_queue.set(vec![Row::track(track)]);

        let mut view = NowPlayingView::default();
        assert_eq!(
            view.sync(&state),
            [Command::Fetch(QueryKey::Album(ItemId::from("al1")))]
        );

        let mut album = Album::new("al1", "Album");
        album.artist_id = Some(ItemId::from("ar1"));
        resolve(
            &mut state,
            QueryKey::Album(ItemId::from("al1")),
            QueryData::Album(AlbumDetail {
                album: Row::new(RowKind::Album(album)),
                tracks: vec![],
            }),
        );
        let commands = view.sync(&state);
        assert_eq!(
            commands,
            [
                Command::Fetch(QueryKey::Artist(ItemId::from("ar1"))),
                Command::Fetch(QueryKey::SimilarSongs {
                    artist: ItemId::from("ar1"),
                    count: 50
                }),
            ]
        );
        assert!(view.sync(&state).is_empty());
    }

    #[test]
    fn test_latest_albums_newest_first() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut track = Track::new("t1", "One");
        track.album_artist_id = Some(ItemId::from("ar1"));
        state.play_queue.set(vec![Row::track(track)]);

        let albums = [(2001, "Old"), (2020, "New"), (2010, "Mid")]
            .into_iter()
            .map(|(year, title)| {
                let mut album = Album::new(title, title);
                album.year = Some(year);
                Row::new(RowKind::Album(album))
            })
            .collect();
        resolve(
            &mut state,
            QueryKey::Artist(ItemId::from("ar1")),
            QueryData::Artist(ArtistDetail {
                artist: Row::new(RowKind::Artist(Artist::new("ar1", "Artist"))),
                albums,
                biography: Some("<a href=\"x\">Bio</a> text. Read more on Last.fm".into()),
            }),
        );

        let mut view = NowPlayingView::default();
        view.sync(&state);
        let titles: Vec<_> = view
            .latest_albums
            .cards
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["New", "Mid", "Old"]);
        assert_eq!(view.biography(&state).as_deref(), Some("Bio text."));
    }

    #[test]
    fn test_row_favorite_refetches_similar_songs() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut track = Track::new("t1", "One");
        track.album_artist_id = Some(ItemId::from("ar1"));
        state.play_queue.set(vec![Row::track(track)]);
        let mut view = NowPlayingView::default();
        view.sync(&state);

        let similar = Row::track(Track::new("s1", "Similar"));
        let commands = view.row_favorite(&mut state, &similar);
        let [Command::Mutate { on_success, .. }] = commands.as_slice() else {
            panic!("expected one mutation");
        };
        assert_eq!(
            on_success,
            &[Command::Refetch(QueryKey::SimilarSongs {
                artist: ItemId::from("ar1"),
                count: 50
            })]
        );
    }
}
