use std::time::Instant;

use starling_state::{
    ItemId, PlayQueue, PlaybackFilter, Row, SelectionState, SortRegistry,
};

use crate::{
    api::{ApiError, Mutation},
    command::Command,
    config::ServerType,
    notification::{Notification, Notifications},
    query::{QueryCache, QueryData, QueryKey},
    route::{Route, Router},
    settings::{ScrollStore, SettingsStore},
};

/// Everything the views read and write. Owned by the UI thread; background
/// tasks report back through [`crate::Logic`] instead of touching it.
pub struct AppState {
    pub server_type: ServerType,
    pub query_cache: QueryCache,
    pub selection: SelectionState,
    pub sorts: SortRegistry,
    pub play_queue: PlayQueue,
    pub settings: SettingsStore,
    pub scroll: ScrollStore,
    pub notifications: Notifications,
    pub router: Router,
    pub filters: Vec<PlaybackFilter>,
    /// The search box of the current page.
    pub search_query: String,
}
impl AppState {
    pub fn new(
        server_type: ServerType,
        settings: SettingsStore,
        scroll: ScrollStore,
        filters: Vec<PlaybackFilter>,
    ) -> Self {
        Self {
            server_type,
            query_cache: QueryCache::default(),
            selection: SelectionState::default(),
            sorts: SortRegistry::default(),
            play_queue: PlayQueue::default(),
            settings,
            scroll,
            notifications: Notifications::default(),
            router: Router::default(),
            filters,
            search_query: String::new(),
        }
    }

    /// State that never touches the disk.
    pub fn in_memory(server_type: ServerType) -> Self {
        Self::new(
            server_type,
            SettingsStore::in_memory(),
            ScrollStore::in_memory(),
            vec![],
        )
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification, Instant::now());
    }

    /// Go to `route`. Selections and searches do not carry across pages.
    pub fn navigate(&mut self, route: Route) -> bool {
        let changed = self.router.navigate(route);
        if changed {
            self.selection.clear();
            self.search_query.clear();
        }
        changed
    }

    pub fn back(&mut self) -> bool {
        let changed = self.router.back();
        if changed {
            self.selection.clear();
            self.search_query.clear();
        }
        changed
    }

    pub fn finish_fetch(&mut self, key: &QueryKey, result: Result<QueryData, ApiError>) {
        self.query_cache
            .resolve(key, result.map_err(|e| e.to_string()));
    }

    /// Record the outcome of a mutation, returning the follow-up commands to
    /// run. Optimistic updates made before the request are kept either way.
    pub fn finish_mutation(
        &mut self,
        mutation: &Mutation,
        result: Result<(), ApiError>,
        on_success: Vec<Command>,
    ) -> Vec<Command> {
        match result {
            Ok(()) => {
                tracing::debug!("{} succeeded", mutation.describe());
                on_success
            }
            Err(ApiError::Unsupported {
                server_type,
                endpoint,
            }) => {
                self.notify(Notification::warning(format!(
                    "{server_type} does not support {endpoint}"
                )));
                vec![]
            }
            Err(e) => {
                tracing::warn!("failed to {}: {e}", mutation.describe());
                self.notify(Notification::error(format!(
                    "Failed to {}: {e}",
                    mutation.describe()
                )));
                vec![]
            }
        }
    }

    /// Apply `f` to every copy of the items `ids` that the client holds: every
    /// cached response, the play queue and the selection.
    pub fn update_rows(&mut self, ids: &[ItemId], mut f: impl FnMut(&mut Row)) -> usize {
        let mut updated = 0;
        for id in ids {
            updated += self.query_cache.update_rows(id, &mut f);
            self.selection.update_rows(id, &mut f);
        }
        self.play_queue.update_rows(ids, &mut f);
        updated
    }

    pub fn set_star(&mut self, ids: &[ItemId], starred: bool) -> usize {
        self.update_rows(ids, |r| r.set_starred(starred))
    }

    pub fn set_rating(&mut self, ids: &[ItemId], rating: u8) -> usize {
        self.update_rows(ids, |r| r.set_user_rating(rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::{RowKindTag, Track};

    #[test]
    fn test_navigate_clears_selection() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let row = Row::track(Track::new("t1", "One"));
        state.selection.toggle(&row);
        state.search_query = "one".into();

        assert!(state.navigate(Route::PlaylistList));
        assert!(state.selection.is_empty());
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn test_failed_mutation_keeps_optimistic_state() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let key = QueryKey::SimilarSongs {
            artist: ItemId::from("ar"),
            count: 50,
        };
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(
            &key,
            Ok(QueryData::SimilarSongs(vec![Row::track(Track::new("t1", "One"))])),
        );

        let ids = vec![ItemId::from("t1")];
        assert_eq!(state.set_star(&ids, true), 1);
        let mutation = Mutation::Star {
            ids,
            kind: RowKindTag::Track,
        };
        let follow_up = state.finish_mutation(
            &mutation,
            Err(ApiError::Unsupported {
                server_type: ServerType::Subsonic,
                endpoint: "test",
            }),
            vec![Command::Refetch(key.clone())],
        );
        assert!(follow_up.is_empty());
        assert!(!state.notifications.is_empty());

        let Some(QueryData::SimilarSongs(rows)) = state.query_cache.data(&key) else {
            panic!("missing");
        };
        assert!(rows[0].starred());
    }
}
