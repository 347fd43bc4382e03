use starling_state::{ListType, Row, RowKind, SortContext};

use crate::{
    app_state::AppState,
    command::Command,
    query::{QueryData, QueryKey, QueryStatus},
    route::{AlbumListFilter, Route},
    settings::{ScrollStore, ViewType},
    view::table::{ContextMenuItem, ListViewTable},
};

/// The page name album list settings and scroll offsets are stored under.
pub const ALBUM_LIST_PAGE: &str = "albumList";

/// One page of albums, browsed by filter.
#[derive(Debug, Clone)]
pub struct AlbumListView {
    pub filter: AlbumListFilter,
    pub page: usize,
    pub table: ListViewTable,
}
impl AlbumListView {
    pub fn new(filter: AlbumListFilter) -> Self {
        Self {
            filter,
            page: 0,
            table: ListViewTable::new(ListType::Album, SortContext::page("albumListPage"))
                .with_disabled_items([ContextMenuItem::SetRating]),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::AlbumList {
            filter: self.filter.clone(),
            page: self.page,
        }
    }

    pub fn mount(&self) -> Vec<Command> {
        vec![Command::Fetch(self.key())]
    }

    pub fn status<'a>(&self, state: &'a AppState) -> QueryStatus<'a> {
        state.query_cache.get(&self.key())
    }

    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        match state.query_cache.data(&self.key()) {
            Some(QueryData::Albums(albums)) => self.table.display_rows(state, albums),
            _ => vec![],
        }
    }

    pub fn view_type(&self, state: &AppState) -> ViewType {
        state.settings.view_type(ALBUM_LIST_PAGE)
    }

    pub fn toggle_view_type(&self, state: &mut AppState) {
        let view_type = self.view_type(state).toggled();
        state.settings.set_view_type(ALBUM_LIST_PAGE, view_type);
    }

    pub fn scroll_key(&self, state: &AppState) -> String {
        ScrollStore::key(self.view_type(state), ALBUM_LIST_PAGE)
    }

    /// Move `delta` pages, never before the first. A short page is the last.
    pub fn turn_page(&mut self, state: &mut AppState, delta: isize) -> Vec<Command> {
        let loaded = self.rows(state).len();
        if delta > 0 && loaded < QueryKey::ALBUM_LIST_PAGE_SIZE {
            return vec![];
        }
        let Some(page) = self.page.checked_add_signed(delta) else {
            return vec![];
        };
        if page == self.page {
            return vec![];
        }
        self.page = page;
        let key = self.scroll_key(state);
        state.scroll.set(key, 0);
        self.mount()
    }

    pub fn refresh(&self) -> Vec<Command> {
        vec![Command::Refetch(self.key())]
    }

    /// Double-clicking an album opens it.
    pub fn open(&self, row: &Row) -> Vec<Command> {
        match &row.kind {
            RowKind::Album(album) => vec![Command::Navigate(Route::Album(album.id.clone()))],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerType;
    use starling_state::{Album, ItemId};

    fn albums(n: usize) -> QueryData {
        QueryData::Albums(
            (0..n)
                .map(|i| Row::new(RowKind::Album(Album::new(format!("al{i}"), format!("Album {i}")))))
                .collect(),
        )
    }

    #[test]
    fn test_turn_page_stops_at_short_page() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut view = AlbumListView::new(AlbumListFilter::Newest);
        assert!(view.turn_page(&mut state, -1).is_empty());

        let key = view.key();
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(&key, Ok(albums(QueryKey::ALBUM_LIST_PAGE_SIZE)));
        assert_eq!(
            view.turn_page(&mut state, 1),
            [Command::Fetch(QueryKey::AlbumList {
                filter: AlbumListFilter::Newest,
                page: 1
            })]
        );

        let key = view.key();
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(&key, Ok(albums(3)));
        assert!(view.turn_page(&mut state, 1).is_empty());
        assert_eq!(view.rows(&state).len(), 3);
    }

    #[test]
    fn test_open_navigates_to_album() {
        let view = AlbumListView::new(AlbumListFilter::Random);
        let row = Row::new(RowKind::Album(Album::new("al9", "Nine")));
        assert_eq!(
            view.open(&row),
            [Command::Navigate(Route::Album(ItemId::from("al9")))]
        );
    }
}
