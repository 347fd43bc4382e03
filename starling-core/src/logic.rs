use std::{
    sync::{Arc, mpsc},
    time::Instant,
};

use starling_state::{ItemId, PlaybackFilter};

use crate::{
    api::{ApiController, ApiError, Mutation},
    app_state::AppState,
    command::{Command, DownloadAction},
    config::Server,
    notification::Notification,
    query::{QueryData, QueryKey},
    settings::{ScrollStore, SettingsStore},
    shell,
    tokio_thread::{TokioHandle, TokioThread},
};

/// A finished background request, waiting to be applied to the state.
#[derive(Debug)]
pub enum LogicEvent {
    Connected(Result<(), ApiError>),
    Fetched {
        key: QueryKey,
        result: Result<QueryData, ApiError>,
    },
    Mutated {
        mutation: Mutation,
        result: Result<(), ApiError>,
        on_success: Vec<Command>,
    },
    DownloadLinks {
        result: Result<Vec<String>, ApiError>,
        action: DownloadAction,
    },
}

pub struct Logic {
    // Kept alive for as long as the logic is.
    _tokio_thread: Option<TokioThread>,
    tokio: Option<TokioHandle>,
    api: Arc<ApiController>,
    state: AppState,
    event_tx: mpsc::Sender<LogicEvent>,
    event_rx: mpsc::Receiver<LogicEvent>,
}
impl Logic {
    /// Connect to `server`, loading settings and scroll offsets from disk.
    pub fn new(server: &Server, filters: Vec<PlaybackFilter>) -> std::io::Result<Self> {
        let tokio_thread = TokioThread::new()?;
        let state = AppState::new(
            server.server_type,
            SettingsStore::load(),
            ScrollStore::load(),
            filters,
        );
        let mut logic = Self::with_state(server, state, Some(tokio_thread));
        logic.connect();
        Ok(logic)
    }

    /// Logic that never leaves the UI thread. Commands that need the server
    /// are dropped.
    pub fn offline(server: &Server, state: AppState) -> Self {
        Self::with_state(server, state, None)
    }

    fn with_state(server: &Server, state: AppState, tokio_thread: Option<TokioThread>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            tokio: tokio_thread.as_ref().map(TokioThread::handle),
            _tokio_thread: tokio_thread,
            api: Arc::new(ApiController::new(server)),
            state,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Carry out the commands returned by a view.
    pub fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.run_one(command);
        }
    }

    fn run_one(&mut self, command: Command) {
        match command {
            Command::Fetch(key) => self.fetch(key),
            Command::Refetch(key) => {
                self.state.query_cache.invalidate(&key);
                self.fetch(key);
            }
            Command::Mutate {
                mutation,
                on_success,
            } => self.mutate(mutation, on_success),
            Command::Navigate(route) => {
                self.state.navigate(route);
            }
            Command::Back => {
                self.state.back();
            }
            Command::Download { ids, action } => self.download(ids, action),
            Command::Notify(notification) => self.state.notify(notification),
        }
    }

    /// Apply every event that has arrived since the last call, then expire old
    /// notifications. Called once per frame.
    pub fn update(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply(event);
        }
        self.state.notifications.expire(Instant::now());
    }

    fn apply(&mut self, event: LogicEvent) {
        match event {
            LogicEvent::Connected(Ok(())) => tracing::info!("connected to server"),
            LogicEvent::Connected(Err(e)) => {
                self.state
                    .notify(Notification::error(format!("Failed to connect: {e}")));
            }
            LogicEvent::Fetched { key, result } => {
                tracing::debug!("fetched {key:?}");
                self.state.finish_fetch(&key, result);
            }
            LogicEvent::Mutated {
                mutation,
                result,
                on_success,
            } => {
                let follow_up = self.state.finish_mutation(&mutation, result, on_success);
                self.run(follow_up);
            }
            LogicEvent::DownloadLinks { result, action } => match result {
                Ok(urls) => self.hand_off_links(&urls, action),
                Err(e) => self
                    .state
                    .notify(Notification::error(format!("Failed to get download links: {e}"))),
            },
        }
    }

    /// Save the scroll offsets. Settings are saved as they change.
    pub fn shutdown(&self) {
        self.state.scroll.save();
    }
}
impl Logic {
    fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        match &self.tokio {
            Some(tokio) => tokio.spawn(task),
            None => tracing::debug!("offline, dropping background task"),
        }
    }

    fn connect(&mut self) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        self.spawn(async move {
            let _ = tx.send(LogicEvent::Connected(api.ping().await));
        });
    }

    fn fetch(&mut self, key: QueryKey) {
        if !self.state.query_cache.begin_fetch(&key) {
            return;
        }
        tracing::debug!("fetching {key:?}");
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        self.spawn(async move {
            let result = api.fetch(&key).await;
            let _ = tx.send(LogicEvent::Fetched { key, result });
        });
    }

    fn mutate(&mut self, mutation: Mutation, on_success: Vec<Command>) {
        tracing::debug!("starting {}", mutation.describe());
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        self.spawn(async move {
            let result = api.mutate(&mutation).await;
            let _ = tx.send(LogicEvent::Mutated {
                mutation,
                result,
                on_success,
            });
        });
    }

    fn download(&mut self, ids: Vec<ItemId>, action: DownloadAction) {
        if ids.is_empty() {
            return;
        }
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        self.spawn(async move {
            let mut urls = Vec::with_capacity(ids.len());
            let mut result = Ok(());
            for id in &ids {
                match api.download_url(id).await {
                    Ok(url) => urls.push(url),
                    Err(e) => {
                        result = Err(e);
                        break;
                    }
                }
            }
            let _ = tx.send(LogicEvent::DownloadLinks {
                result: result.map(|()| urls),
                action,
            });
        });
    }

    fn hand_off_links(&mut self, urls: &[String], action: DownloadAction) {
        match action {
            DownloadAction::Open => {
                for url in urls {
                    if let Err(e) = shell::open_external(url) {
                        self.state.notify(Notification::error(e.to_string()));
                        return;
                    }
                }
            }
            DownloadAction::Copy => match shell::copy_to_clipboard(&urls.join("\n")) {
                Ok(()) => self
                    .state
                    .notify(Notification::success("Download links copied!")),
                Err(e) => self.state.notify(Notification::error(e.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ServerType, route::Route};
    use starling_state::RowKindTag;

    fn offline() -> Logic {
        Logic::offline(
            &Server::default(),
            AppState::in_memory(ServerType::Subsonic),
        )
    }

    #[test]
    fn test_navigation_commands() {
        let mut logic = offline();
        logic.run(vec![Command::Navigate(Route::PlaylistList)]);
        assert_eq!(logic.state().router.current(), &Route::PlaylistList);
        logic.run(vec![Command::Back]);
        assert!(matches!(logic.state().router.current(), Route::AlbumList(_)));
    }

    #[test]
    fn test_fetch_marks_in_flight_once() {
        let mut logic = offline();
        logic.run(vec![
            Command::Fetch(QueryKey::Playlists),
            Command::Fetch(QueryKey::Playlists),
        ]);
        assert!(logic.state().query_cache.is_in_flight(&QueryKey::Playlists));
    }

    #[test]
    fn test_fetch_result_is_applied_on_update() {
        let mut logic = offline();
        logic.run(vec![Command::Fetch(QueryKey::Playlists)]);
        logic
            .event_tx
            .send(LogicEvent::Fetched {
                key: QueryKey::Playlists,
                result: Ok(QueryData::Playlists(vec![])),
            })
            .unwrap();
        logic.update();
        assert!(!logic.state().query_cache.is_in_flight(&QueryKey::Playlists));
        assert!(logic.state().query_cache.data(&QueryKey::Playlists).is_some());
    }

    #[test]
    fn test_successful_mutation_runs_follow_ups() {
        let mut logic = offline();
        logic
            .event_tx
            .send(LogicEvent::Mutated {
                mutation: Mutation::Star {
                    ids: vec![ItemId::from("42")],
                    kind: RowKindTag::Track,
                },
                result: Ok(()),
                on_success: vec![Command::Notify(Notification::success("done"))],
            })
            .unwrap();
        logic.update();
        let messages: Vec<_> = logic
            .state()
            .notifications
            .visible()
            .map(|n| n.message.clone())
            .collect();
        assert_eq!(messages, ["done"]);
    }

    #[test]
    fn test_unsupported_mutation_warns() {
        let mut logic = offline();
        logic
            .event_tx
            .send(LogicEvent::Mutated {
                mutation: Mutation::SetRating {
                    ids: vec![ItemId::from("1")],
                    rating: 3,
                },
                result: Err(ApiError::Unsupported {
                    server_type: ServerType::Jellyfin,
                    endpoint: "ratings",
                }),
                on_success: vec![Command::Back],
            })
            .unwrap();
        logic.update();
        let messages: Vec<_> = logic
            .state()
            .notifications
            .visible()
            .map(|n| n.message.clone())
            .collect();
        assert_eq!(messages, ["Jellyfin does not support ratings"]);
    }
}
