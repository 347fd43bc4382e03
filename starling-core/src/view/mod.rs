//! View models. Each binds cached data to a table and returns the
//! [`Command`]s its actions need.
use starling_state::{PlayFromHere, Row};

use crate::{
    app_state::AppState, command::Command, query::QueryStatus, route::Route, settings::ViewType,
};

pub mod actions;
mod album;
pub mod album_list;
mod artist;
pub mod now_playing;
mod playlist;
pub mod playlist_list;
pub mod scrolling_menu;
pub mod table;

pub use album::AlbumView;
pub use album_list::AlbumListView;
pub use artist::ArtistView;
pub use now_playing::NowPlayingView;
pub use playlist::PlaylistView;
pub use playlist_list::PlaylistListView;
pub use scrolling_menu::ScrollingMenu;
pub use table::ListViewTable;

/// The view for the current route.
#[derive(Debug, Clone)]
pub enum Page {
    AlbumList(AlbumListView),
    Album(AlbumView),
    Artist(ArtistView),
    PlaylistList(PlaylistListView),
    Playlist(PlaylistView),
    NowPlaying(NowPlayingView),
}
impl Page {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::AlbumList(filter) => Page::AlbumList(AlbumListView::new(filter.clone())),
            Route::Album(id) => Page::Album(AlbumView::new(id.clone())),
            Route::Artist(id) => Page::Artist(ArtistView::new(id.clone())),
            Route::PlaylistList => Page::PlaylistList(PlaylistListView::default()),
            Route::Playlist(id) => Page::Playlist(PlaylistView::new(id.clone())),
            Route::NowPlaying => Page::NowPlaying(NowPlayingView::default()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::AlbumList(v) => format!("Albums: {}", v.filter),
            Page::Album(_) => "Album".to_string(),
            Page::Artist(_) => "Artist".to_string(),
            Page::PlaylistList(_) => "Playlists".to_string(),
            Page::Playlist(_) => "Playlist".to_string(),
            Page::NowPlaying(_) => "Now playing".to_string(),
        }
    }

    pub fn mount(&mut self, state: &AppState) -> Vec<Command> {
        match self {
            Page::AlbumList(v) => v.mount(),
            Page::Album(v) => v.mount(),
            Page::Artist(v) => v.mount(),
            Page::PlaylistList(v) => v.mount(),
            Page::Playlist(v) => v.mount(),
            Page::NowPlaying(v) => v.sync(state),
        }
    }

    /// Called every tick, for views that follow changing state.
    pub fn sync(&mut self, state: &AppState) -> Vec<Command> {
        match self {
            Page::NowPlaying(v) => v.sync(state),
            _ => vec![],
        }
    }

    /// The state of the page's main query.
    pub fn status<'a>(&self, state: &'a AppState) -> Option<QueryStatus<'a>> {
        match self {
            Page::AlbumList(v) => Some(v.status(state)),
            Page::Album(v) => Some(v.status(state)),
            Page::Artist(v) => Some(v.status(state)),
            Page::PlaylistList(v) => Some(v.status(state)),
            Page::Playlist(v) => Some(v.status(state)),
            Page::NowPlaying(v) => v.artist_status(state),
        }
    }

    /// Album and playlist lists can be shown as a grid of cards.
    pub fn view_type(&self, state: &AppState) -> ViewType {
        match self {
            Page::AlbumList(v) => v.view_type(state),
            Page::PlaylistList(v) => v.view_type(state),
            _ => ViewType::List,
        }
    }

    /// Where the page's scroll offset is saved, for pages that keep one.
    pub fn scroll_key(&self, state: &AppState) -> Option<String> {
        match self {
            Page::AlbumList(v) => Some(v.scroll_key(state)),
            Page::PlaylistList(v) => Some(v.scroll_key(state)),
            _ => None,
        }
    }

    pub fn table(&self) -> &ListViewTable {
        match self {
            Page::AlbumList(v) => &v.table,
            Page::Album(v) => &v.table,
            Page::Artist(v) => &v.table,
            Page::PlaylistList(v) => &v.table,
            Page::Playlist(v) => &v.table,
            Page::NowPlaying(v) => &v.similar,
        }
    }

    pub fn table_mut(&mut self) -> &mut ListViewTable {
        match self {
            Page::AlbumList(v) => &mut v.table,
            Page::Album(v) => &mut v.table,
            Page::Artist(v) => &mut v.table,
            Page::PlaylistList(v) => &mut v.table,
            Page::Playlist(v) => &mut v.table,
            Page::NowPlaying(v) => &mut v.similar,
        }
    }

    /// The rows of the main table, as displayed.
    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        match self {
            Page::AlbumList(v) => v.rows(state),
            Page::Album(v) => v.rows(state),
            Page::Artist(v) => v.rows(state),
            Page::PlaylistList(v) => v.rows(state),
            Page::Playlist(v) => v.rows(state),
            Page::NowPlaying(v) => v.similar_rows(state),
        }
    }

    /// A double-clicked row: track lists play from it, other lists open it.
    pub fn activate(&mut self, state: &mut AppState, play: &PlayFromHere) -> Vec<Command> {
        let Some(row) = play.rows.get(play.index) else {
            return vec![];
        };
        match self {
            Page::AlbumList(v) => v.open(row),
            Page::Artist(v) => v.open(row),
            Page::PlaylistList(v) => {
                let row = row.clone();
                v.open(state, &row)
            }
            Page::Album(v) => {
                v.play_from_here(state, play);
                vec![]
            }
            Page::Playlist(v) => {
                v.play_from_here(state, play);
                vec![]
            }
            Page::NowPlaying(v) => {
                v.play_from_here(state, play);
                vec![]
            }
        }
    }

    /// Toggle the favorite flag of a row in the main table.
    pub fn row_favorite(&mut self, state: &mut AppState, row: &Row) -> Vec<Command> {
        match self {
            Page::Album(v) => v.row_favorite(state, row),
            Page::Playlist(v) => v.row_favorite(state, row),
            Page::NowPlaying(v) => v.row_favorite(state, row),
            Page::AlbumList(_) | Page::Artist(_) => actions::toggle_favorite(state, row),
            Page::PlaylistList(_) => vec![],
        }
    }

    pub fn row_rating(&mut self, state: &mut AppState, row: &Row, rating: u8) -> Vec<Command> {
        match self {
            Page::Album(v) => v.row_rating(state, row, rating),
            Page::Playlist(v) => v.row_rating(state, row, rating),
            Page::NowPlaying(v) => v.row_rating(state, row, rating),
            _ => vec![],
        }
    }

    pub fn unmount(&mut self) {
        self.table_mut().unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ServerType, query::{AlbumDetail, QueryData, QueryKey}};
    use starling_state::{Album, ItemId, RowKind, Track};

    #[test]
    fn test_album_page_double_click_plays() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let route = Route::Album(ItemId::from("al1"));
        let mut page = Page::for_route(&route);
        assert_eq!(
            page.mount(&state),
            [Command::Fetch(QueryKey::Album(ItemId::from("al1")))]
        );
        state.query_cache.begin_fetch(&QueryKey::Album(ItemId::from("al1")));
        state.finish_fetch(
            &QueryKey::Album(ItemId::from("al1")),
            Ok(QueryData::Album(AlbumDetail {
                album: Row::new(RowKind::Album(Album::new("al1", "Album"))),
                tracks: vec![
                    Row::track(Track::new("1", "One")),
                    Row::track(Track::new("2", "Two")),
                ],
            })),
        );

        let rows = page.rows(&state);
        let play = page
            .table_mut()
            .activate(&mut state, &rows, 1)
            .unwrap();
        assert!(page.activate(&mut state, &play).is_empty());
        assert_eq!(state.play_queue.current().map(Row::title), Some("Two"));
    }
}
