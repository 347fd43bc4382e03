use starling_state::{
    ColumnKey, ListType, Row, RowKind, SortContext, SortDirection, SortSpec,
};

use crate::{
    api::Mutation,
    app_state::AppState,
    command::Command,
    config::ServerType,
    notification::Notification,
    query::{QueryData, QueryKey, QueryStatus},
    route::Route,
    settings::{ScrollStore, ViewType},
    view::table::{ContextMenuItem, ListViewTable},
};

pub const PLAYLIST_LIST_PAGE: &str = "playlistList";

/// Columns offered by the sort popover, in display order.
const SORT_COLUMNS: [ColumnKey; 6] = [
    ColumnKey::Title,
    ColumnKey::SongCount,
    ColumnKey::Duration,
    ColumnKey::Owner,
    ColumnKey::Public,
    ColumnKey::Changed,
];

/// Every playlist on the server, as a table or a grid of cards.
#[derive(Debug, Clone)]
pub struct PlaylistListView {
    pub table: ListViewTable,
    /// The name typed into the new playlist box.
    pub new_playlist_name: String,
}
impl Default for PlaylistListView {
    fn default() -> Self {
        Self {
            table: ListViewTable::new(ListType::PlaylistList, SortContext::page(PLAYLIST_LIST_PAGE))
                .with_disabled_items([
                    ContextMenuItem::AddToFavorites,
                    ContextMenuItem::RemoveFromFavorites,
                    ContextMenuItem::SetRating,
                ]),
            new_playlist_name: String::new(),
        }
    }
}
impl PlaylistListView {
    pub fn key(&self) -> QueryKey {
        QueryKey::Playlists
    }

    pub fn mount(&self) -> Vec<Command> {
        vec![Command::Fetch(self.key())]
    }

    pub fn status<'a>(&self, state: &'a AppState) -> QueryStatus<'a> {
        state.query_cache.get(&self.key())
    }

    /// Playlists matching the search box, sorted.
    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        match state.query_cache.data(&self.key()) {
            Some(QueryData::Playlists(playlists)) => self.table.display_rows(state, playlists),
            _ => vec![],
        }
    }

    pub fn view_type(&self, state: &AppState) -> ViewType {
        state.settings.view_type(PLAYLIST_LIST_PAGE)
    }

    pub fn set_view_type(&self, state: &mut AppState, view_type: ViewType) {
        state.settings.set_view_type(PLAYLIST_LIST_PAGE, view_type);
    }

    /// `scroll_list_playlistList` or `scroll_grid_playlistList`.
    pub fn scroll_key(&self, state: &AppState) -> String {
        ScrollStore::key(self.view_type(state), PLAYLIST_LIST_PAGE)
    }

    pub fn scroll_offset(&self, state: &AppState) -> usize {
        state.scroll.get(&self.scroll_key(state))
    }

    pub fn set_scroll_offset(&self, state: &mut AppState, offset: usize) {
        let key = self.scroll_key(state);
        state.scroll.set(key, offset);
    }

    /// The popover's columns, with whether each can be chosen on this server.
    pub fn sort_columns(&self, state: &AppState) -> Vec<(ColumnKey, bool)> {
        SORT_COLUMNS
            .into_iter()
            .map(|key| {
                let enabled =
                    state.server_type != ServerType::Jellyfin || !key.unsupported_on_jellyfin();
                (key, enabled)
            })
            .collect()
    }

    pub fn set_sort_column(&self, state: &mut AppState, column: ColumnKey) {
        let enabled = self
            .sort_columns(state)
            .iter()
            .any(|(key, enabled)| *key == column && *enabled);
        if !enabled {
            return;
        }
        let spec = state.sorts.get_mut(&self.table.sort_context);
        *spec = SortSpec::by(column, spec.direction);
    }

    pub fn set_sort_direction(&self, state: &mut AppState, direction: SortDirection) {
        let spec = state.sorts.get_mut(&self.table.sort_context);
        match spec.column {
            Some(column) => *spec = SortSpec::by(column, direction),
            None => spec.direction = direction,
        }
    }

    pub fn clear_sort(&self, state: &mut AppState) {
        state.sorts.get_mut(&self.table.sort_context).column = None;
    }

    /// Create a playlist named by the new playlist box. On success the list is
    /// refetched and a notification shown.
    pub fn create_playlist(&mut self, state: &mut AppState) -> Vec<Command> {
        let name = self.new_playlist_name.trim().to_string();
        if name.is_empty() {
            state.notify(Notification::warning("Enter a name for the playlist"));
            return vec![];
        }
        self.new_playlist_name.clear();
        vec![Command::Mutate {
            on_success: vec![
                Command::Refetch(self.key()),
                Command::Notify(Notification::success(format!(
                    "Playlist \"{name}\" created!"
                ))),
            ],
            mutation: Mutation::CreatePlaylist { name },
        }]
    }

    /// Double-clicking a playlist opens it.
    pub fn open(&self, state: &mut AppState, row: &Row) -> Vec<Command> {
        state.selection.clear();
        match &row.kind {
            RowKind::Playlist(playlist) => {
                vec![Command::Navigate(Route::Playlist(playlist.id.clone()))]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use starling_state::{ItemId, Playlist};

    fn playlists(state: &mut AppState) -> PlaylistListView {
        let view = PlaylistListView::default();
        let rows = [("p1", "Road trip", "alice"), ("p2", "Focus", "bob")]
            .into_iter()
            .map(|(id, name, owner)| {
                let mut playlist = Playlist::new(id, name);
                playlist.owner = Some(owner.into());
                Row::new(RowKind::Playlist(playlist))
            })
            .collect();
        state.query_cache.begin_fetch(&QueryKey::Playlists);
        state.finish_fetch(&QueryKey::Playlists, Ok(QueryData::Playlists(rows)));
        view
    }

    #[test]
    fn test_search_matches_owner() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let view = playlists(&mut state);
        state.search_query = "BOB".into();
        let rows = view.rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title(), "Focus");
    }

    #[test]
    fn test_sort_popover() {
        let mut state = AppState::in_memory(ServerType::Jellyfin);
        let view = playlists(&mut state);
        assert!(
            view.sort_columns(&state)
                .contains(&(ColumnKey::Owner, false))
        );
        view.set_sort_column(&mut state, ColumnKey::Owner);
        assert!(state.sorts.get(&view.table.sort_context).is_natural());

        view.set_sort_column(&mut state, ColumnKey::Title);
        assert_eq!(view.rows(&state)[0].title(), "Focus");
        view.set_sort_direction(&mut state, SortDirection::Descending);
        assert_eq!(view.rows(&state)[0].title(), "Road trip");
        view.clear_sort(&mut state);
        assert_eq!(view.rows(&state)[0].title(), "Road trip");
        assert!(state.sorts.get(&SortContext::PlayQueue).is_natural());
    }

    #[test]
    fn test_view_type_and_scroll_keys() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let view = PlaylistListView::default();
        assert_eq!(view.scroll_key(&state), "scroll_list_playlistList");
        view.set_scroll_offset(&mut state, 12);
        view.set_view_type(&mut state, ViewType::Grid);
        assert_eq!(view.scroll_key(&state), "scroll_grid_playlistList");
        assert_eq!(view.scroll_offset(&state), 0);
        view.set_view_type(&mut state, ViewType::List);
        assert_eq!(view.scroll_offset(&state), 12);
    }

    #[test]
    fn test_create_playlist_commands() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut view = PlaylistListView::default();
        assert!(view.create_playlist(&mut state).is_empty());

        view.new_playlist_name = "  Chill ".into();
        let commands = view.create_playlist(&mut state);
        let [
            Command::Mutate {
                mutation,
                on_success,
            },
        ] = commands.as_slice()
        else {
            panic!("expected one mutation, got {commands:?}");
        };
        assert_eq!(
            mutation,
            &Mutation::CreatePlaylist {
                name: "Chill".into()
            }
        );
        assert!(view.new_playlist_name.is_empty());

        let follow_up = state.finish_mutation(mutation, Ok(()), on_success.clone());
        assert_eq!(follow_up[0], Command::Refetch(QueryKey::Playlists));
        assert_eq!(
            follow_up[1],
            Command::Notify(Notification::success("Playlist \"Chill\" created!"))
        );

        let failed = state.finish_mutation(
            mutation,
            Err(ApiError::Subsonic(starling_state::bs::ClientError::InvalidUrl(
                "bad".into(),
            ))),
            on_success.clone(),
        );
        assert!(failed.is_empty());
    }

    #[test]
    fn test_open_navigates_to_playlist() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let view = PlaylistListView::default();
        let row = Row::new(RowKind::Playlist(Playlist::new("p1", "One")));
        state.selection.toggle(&row);
        assert_eq!(
            view.open(&mut state, &row),
            [Command::Navigate(Route::Playlist(ItemId::from("p1")))]
        );
        assert!(state.selection.is_empty());
    }
}
