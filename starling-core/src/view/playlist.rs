use starling_state::{ItemId, ListType, PlayFromHere, Row, SortContext, play_queue::AppendPosition};

use crate::{
    app_state::AppState,
    command::Command,
    query::{PlaylistDetail, QueryData, QueryKey, QueryStatus},
    view::{actions, table::ListViewTable},
};

#[derive(Debug, Clone)]
pub struct PlaylistView {
    pub id: ItemId,
    pub table: ListViewTable,
}
impl PlaylistView {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            table: ListViewTable::new(ListType::Playlist, SortContext::Playlist),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::Playlist(self.id.clone())
    }

    pub fn mount(&self) -> Vec<Command> {
        vec![Command::Fetch(self.key())]
    }

    pub fn status<'a>(&self, state: &'a AppState) -> QueryStatus<'a> {
        state.query_cache.get(&self.key())
    }

    pub fn detail<'a>(&self, state: &'a AppState) -> Option<&'a PlaylistDetail> {
        match state.query_cache.data(&self.key()) {
            Some(QueryData::Playlist(detail)) => Some(detail),
            _ => None,
        }
    }

    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        self.detail(state)
            .map(|d| self.table.display_rows(state, &d.entries))
            .unwrap_or_default()
    }

    /// Play the entries in the order they are displayed.
    pub fn play(&self, state: &mut AppState) {
        let rows = self.rows(state);
        actions::play(state, &rows);
    }

    pub fn play_append(&self, state: &mut AppState, position: AppendPosition) {
        let rows = self.rows(state);
        actions::append(state, &rows, position);
    }

    pub fn play_from_here(&self, state: &mut AppState, play: &PlayFromHere) {
        actions::play_from_here(state, play);
    }

    pub fn row_favorite(&self, state: &mut AppState, row: &Row) -> Vec<Command> {
        actions::toggle_favorite(state, row)
    }

    pub fn row_rating(&self, state: &mut AppState, row: &Row, rating: u8) -> Vec<Command> {
        actions::set_rating(state, std::slice::from_ref(row), rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerType;
    use starling_state::{ColumnKey, Playlist, RowKind, Track};

    #[test]
    fn test_playlist_sort_is_independent_and_plays_displayed_order() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut view = PlaylistView::new(ItemId::from("p1"));
        let key = view.key();
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(
            &key,
            Ok(QueryData::Playlist(PlaylistDetail {
                playlist: Row::new(RowKind::Playlist(Playlist::new("p1", "Mix"))),
                entries: vec![
                    Row::track(Track::new("1", "b")),
                    Row::track(Track::new("2", "a")),
                ],
            })),
        );

        view.table.header_click(&mut state, ColumnKey::CombinedTitle);
        assert!(state.sorts.get(&SortContext::page("albumPage")).is_natural());
        view.play(&mut state);
        let queued: Vec<_> = state.play_queue.entries().iter().map(Row::title).collect();
        assert_eq!(queued, ["a", "b"]);
    }
}
