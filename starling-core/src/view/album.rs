use starling_state::{
    ItemId, ListType, PlayFromHere, Row, RowKind, SortContext, play_queue::AppendPosition,
};

use crate::{
    app_state::AppState,
    command::{Command, DownloadAction},
    query::{AlbumDetail, QueryData, QueryKey, QueryStatus},
    route::{AlbumListFilter, Route},
    view::{actions, album_list::ALBUM_LIST_PAGE, table::ListViewTable},
};

/// An album's header and track list.
#[derive(Debug, Clone)]
pub struct AlbumView {
    pub id: ItemId,
    pub table: ListViewTable,
}
impl AlbumView {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            table: ListViewTable::new(ListType::Music, SortContext::page("albumPage")),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::Album(self.id.clone())
    }

    pub fn mount(&self) -> Vec<Command> {
        vec![Command::Fetch(self.key())]
    }

    pub fn status<'a>(&self, state: &'a AppState) -> QueryStatus<'a> {
        state.query_cache.get(&self.key())
    }

    pub fn detail<'a>(&self, state: &'a AppState) -> Option<&'a AlbumDetail> {
        match state.query_cache.data(&self.key()) {
            Some(QueryData::Album(detail)) => Some(detail),
            _ => None,
        }
    }

    /// The tracks in their displayed order.
    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        self.detail(state)
            .map(|d| self.table.display_rows(state, &d.tracks))
            .unwrap_or_default()
    }

    fn tracks(&self, state: &AppState) -> Vec<Row> {
        self.detail(state)
            .map(|d| d.tracks.clone())
            .unwrap_or_default()
    }

    pub fn play(&self, state: &mut AppState) {
        let tracks = self.tracks(state);
        actions::play(state, &tracks);
    }

    pub fn play_append(&self, state: &mut AppState, position: AppendPosition) {
        let tracks = self.tracks(state);
        actions::append(state, &tracks, position);
    }

    pub fn play_from_here(&self, state: &mut AppState, play: &PlayFromHere) {
        actions::play_from_here(state, play);
    }

    /// Star or unstar the album itself.
    pub fn toggle_favorite(&self, state: &mut AppState) -> Vec<Command> {
        let Some(album) = self.detail(state).map(|d| d.album.clone()) else {
            return vec![];
        };
        actions::toggle_favorite(state, &album)
    }

    pub fn row_favorite(&self, state: &mut AppState, row: &Row) -> Vec<Command> {
        actions::toggle_favorite(state, row)
    }

    pub fn row_rating(&self, state: &mut AppState, row: &Row, rating: u8) -> Vec<Command> {
        actions::set_rating(state, std::slice::from_ref(row), rating)
    }

    pub fn download(&self, state: &mut AppState, action: DownloadAction) -> Vec<Command> {
        let tracks = self.tracks(state);
        actions::download_album(state, &self.id, &tracks, action)
    }

    /// Browse albums of `genre`, starting from the top of the list.
    pub fn genre_link(&self, state: &mut AppState, genre: &str) -> Vec<Command> {
        state.scroll.reset_page(ALBUM_LIST_PAGE);
        vec![Command::Navigate(Route::AlbumList(AlbumListFilter::Genre(
            genre.to_string(),
        )))]
    }

    pub fn artist_link(&self, state: &AppState) -> Vec<Command> {
        let artist_id = self.detail(state).and_then(|d| match &d.album.kind {
            RowKind::Album(album) => album.artist_id.clone(),
            _ => None,
        });
        artist_id
            .map(|id| vec![Command::Navigate(Route::Artist(id))])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ServerType, settings::{ScrollStore, ViewType}};
    use starling_state::{Album, PlaybackFilter, PlayerStatus, Track};

    fn loaded(state: &mut AppState) -> AlbumView {
        let view = AlbumView::new(ItemId::from("al1"));
        let mut album = Album::new("al1", "Album");
        album.artist_id = Some(ItemId::from("ar1"));
        album.genre = Some("Jazz".into());
        let key = view.key();
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(
            &key,
            Ok(QueryData::Album(AlbumDetail {
                album: Row::new(RowKind::Album(album)),
                tracks: vec![
                    Row::track(Track::new("1", "Intro")),
                    Row::track(Track::new("2", "Live at Home")),
                    Row::track(Track::new("3", "Outro")),
                ],
            })),
        );
        view
    }

    #[test]
    fn test_mount_fetches_album() {
        let view = AlbumView::new(ItemId::from("al1"));
        let state = AppState::in_memory(ServerType::Subsonic);
        assert_eq!(view.mount(), [Command::Fetch(QueryKey::Album(ItemId::from("al1")))]);
        assert_eq!(view.status(&state), QueryStatus::Loading);
    }

    #[test]
    fn test_play_filters_and_notifies() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        state.filters = vec![PlaybackFilter::new("live")];
        let view = loaded(&mut state);

        view.play(&mut state);
        assert_eq!(state.play_queue.len(), 2);
        assert_eq!(state.play_queue.status(), PlayerStatus::Playing);
        assert_eq!(
            state.notifications.visible().last().map(|n| n.message.as_str()),
            Some("Playing 2 songs [1 filtered]")
        );

        view.play_append(&mut state, AppendPosition::Later);
        assert_eq!(state.play_queue.len(), 4);
    }

    #[test]
    fn test_album_favorite_is_optimistic() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let view = loaded(&mut state);
        let commands = view.toggle_favorite(&mut state);
        assert_eq!(commands.len(), 1);
        assert!(view.detail(&state).unwrap().album.starred());
    }

    #[test]
    fn test_genre_link_resets_album_list_scroll() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let view = loaded(&mut state);
        let key = ScrollStore::key(ViewType::Grid, ALBUM_LIST_PAGE);
        state.scroll.set(key.clone(), 30);

        let commands = view.genre_link(&mut state, "Jazz");
        assert_eq!(
            commands,
            [Command::Navigate(Route::AlbumList(AlbumListFilter::Genre(
                "Jazz".into()
            )))]
        );
        assert_eq!(state.scroll.get(&key), 0);
        assert_eq!(
            view.artist_link(&state),
            [Command::Navigate(Route::Artist(ItemId::from("ar1")))]
        );
    }
}
