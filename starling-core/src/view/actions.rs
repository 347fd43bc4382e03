//! Row actions shared by every view.
use starling_state::{
    ItemId, PlayFromHere, PlayerStatus, Row, RowKindTag,
    filter::{PlayedKind, filter_entries, played_rows_notification},
    play_queue::AppendPosition,
};

use crate::{
    api::Mutation,
    app_state::AppState,
    command::{Command, DownloadAction},
    config::ServerType,
    notification::Notification,
};

/// Replace the queue with the playable tracks of `rows`. If every track is
/// filtered out the queue is cleared and playback paused.
pub fn play(state: &mut AppState, rows: &[Row]) {
    let songs = filter_entries(&state.filters, rows);
    if songs.entries.is_empty() {
        state.play_queue.clear();
        state.play_queue.set_status(PlayerStatus::Paused);
    } else {
        state.play_queue.set(songs.entries.clone());
        state.play_queue.set_status(PlayerStatus::Playing);
    }
    state.notify(Notification::info(played_rows_notification(
        PlayedKind::Play,
        &songs,
    )));
}

/// Queue the playable tracks of `rows` next or at the end.
pub fn append(state: &mut AppState, rows: &[Row], position: AppendPosition) {
    let songs = filter_entries(&state.filters, rows);
    if !songs.entries.is_empty() {
        state.play_queue.append(songs.entries.clone(), position);
    }
    state.notify(Notification::info(played_rows_notification(
        PlayedKind::Add,
        &songs,
    )));
}

pub fn play_from_here(state: &mut AppState, play: &PlayFromHere) {
    let result = state.play_queue.set_by_row_click(play);
    tracing::debug!(
        "playing {} of {} tracks from {}",
        result.entries.len(),
        result.original,
        play.id
    );
}

/// Star or unstar `rows`. Every copy of each item is updated before the
/// request is made; a failed request is reported but not rolled back.
pub fn set_favorite(state: &mut AppState, rows: &[Row], starred: bool) -> Vec<Command> {
    set_favorite_then(state, rows, starred, vec![])
}

/// [`set_favorite`], running `on_success` once the server accepts the change.
pub fn set_favorite_then(
    state: &mut AppState,
    rows: &[Row],
    starred: bool,
    on_success: Vec<Command>,
) -> Vec<Command> {
    let mut commands = vec![];
    for kind in [
        RowKindTag::Track,
        RowKindTag::Album,
        RowKindTag::Artist,
        RowKindTag::Playlist,
    ] {
        let ids = unique_ids(rows.iter().filter(|r| r.tag() == kind));
        if ids.is_empty() {
            continue;
        }
        state.set_star(&ids, starred);
        let mutation = if starred {
            Mutation::Star { ids, kind }
        } else {
            Mutation::Unstar { ids, kind }
        };
        commands.push(Command::Mutate {
            mutation,
            on_success: on_success.clone(),
        });
    }
    commands
}

pub fn toggle_favorite(state: &mut AppState, row: &Row) -> Vec<Command> {
    set_favorite(state, std::slice::from_ref(row), !row.starred())
}

/// Rate `rows`, where 0 clears the rating. Jellyfin has no ratings, so
/// nothing is changed there.
pub fn set_rating(state: &mut AppState, rows: &[Row], rating: u8) -> Vec<Command> {
    if state.server_type == ServerType::Jellyfin {
        state.notify(Notification::warning("Jellyfin does not support ratings"));
        return vec![];
    }
    let ids = unique_ids(rows.iter().filter(|r| r.tag() != RowKindTag::Playlist));
    if ids.is_empty() {
        return vec![];
    }
    let rating = rating.min(5);
    state.set_rating(&ids, rating);
    vec![Command::mutate(Mutation::SetRating { ids, rating })]
}

/// Download or copy the links for an album's tracks. Jellyfin serves each
/// track; Subsonic servers serve the album folder, found through the first
/// track's parent.
pub fn download_album(
    state: &mut AppState,
    album_id: &ItemId,
    tracks: &[Row],
    action: DownloadAction,
) -> Vec<Command> {
    let ids = match state.server_type {
        ServerType::Jellyfin => tracks.iter().map(|r| r.id().clone()).collect(),
        ServerType::Subsonic => {
            let parent = tracks
                .first()
                .and_then(Row::as_track)
                .and_then(|t| t.parent.clone());
            match parent {
                Some(parent) => vec![parent],
                None => {
                    tracing::debug!("album {album_id} has no parent folder");
                    state.notify(Notification::warning("No parent album found"));
                    return vec![];
                }
            }
        }
    };
    vec![Command::Download { ids, action }]
}

fn unique_ids<'a>(rows: impl Iterator<Item = &'a Row>) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = vec![];
    for row in rows {
        if !ids.contains(row.id()) {
            ids.push(row.id().clone());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{AlbumDetail, QueryData, QueryKey};
    use starling_state::{Album, PlaybackFilter, RowKind, Track};

    fn album_state(server_type: ServerType, tracks: Vec<Row>) -> (AppState, QueryKey) {
        let mut state = AppState::in_memory(server_type);
        let key = QueryKey::Album(ItemId::from("al1"));
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(
            &key,
            Ok(QueryData::Album(AlbumDetail {
                album: Row::new(RowKind::Album(Album::new("al1", "Album"))),
                tracks,
            })),
        );
        (state, key)
    }

    fn cached_tracks<'a>(state: &'a AppState, key: &QueryKey) -> &'a [Row] {
        match state.query_cache.data(key) {
            Some(QueryData::Album(detail)) => &detail.tracks,
            _ => &[],
        }
    }

    #[test]
    fn test_favorite_updates_every_copy_before_response() {
        let tracks = vec![
            Row::track(Track::new("42", "Answer")),
            Row::track(Track::new("7", "Seven")),
            Row::track(Track::new("42", "Answer")),
        ];
        let (mut state, key) = album_state(ServerType::Subsonic, tracks.clone());
        state.play_queue.set(tracks.clone());

        let commands = toggle_favorite(&mut state, &tracks[0]);

        let starred: Vec<bool> = cached_tracks(&state, &key).iter().map(Row::starred).collect();
        assert_eq!(starred, [true, false, true]);
        assert_eq!(
            state.play_queue.entries().iter().filter(|r| r.starred()).count(),
            2
        );
        assert_eq!(
            commands,
            [Command::mutate(Mutation::Star {
                ids: vec![ItemId::from("42")],
                kind: RowKindTag::Track,
            })]
        );
    }

    #[test]
    fn test_rating_is_unsupported_on_jellyfin() {
        let tracks = vec![Row::track(Track::new("1", "One"))];
        let (mut state, key) = album_state(ServerType::Jellyfin, tracks.clone());
        assert!(set_rating(&mut state, &tracks, 4).is_empty());
        assert_eq!(cached_tracks(&state, &key)[0].user_rating(), None);
        assert!(!state.notifications.is_empty());

        let (mut state, key) = album_state(ServerType::Subsonic, tracks.clone());
        assert_eq!(set_rating(&mut state, &tracks, 4).len(), 1);
        assert_eq!(cached_tracks(&state, &key)[0].user_rating(), Some(4));
    }

    #[test]
    fn test_play_with_everything_filtered_clears_queue() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        state.play_queue.set(vec![Row::track(Track::new("0", "Old"))]);
        state.filters = vec![PlaybackFilter::new(".*")];
        play(&mut state, &[Row::track(Track::new("1", "One"))]);
        assert!(state.play_queue.is_empty());
        assert_eq!(state.play_queue.status(), PlayerStatus::Paused);
    }

    #[test]
    fn test_download_album_targets() {
        let mut with_parent = Track::new("1", "One");
        with_parent.parent = Some(ItemId::from("dir1"));
        let tracks = vec![Row::track(with_parent), Row::track(Track::new("2", "Two"))];
        let album = ItemId::from("al1");

        let mut state = AppState::in_memory(ServerType::Subsonic);
        assert_eq!(
            download_album(&mut state, &album, &tracks, DownloadAction::Copy),
            [Command::Download {
                ids: vec![ItemId::from("dir1")],
                action: DownloadAction::Copy
            }]
        );

        let mut state = AppState::in_memory(ServerType::Jellyfin);
        let commands = download_album(&mut state, &album, &tracks, DownloadAction::Open);
        assert_eq!(
            commands,
            [Command::Download {
                ids: vec![ItemId::from("1"), ItemId::from("2")],
                action: DownloadAction::Open
            }]
        );

        let mut state = AppState::in_memory(ServerType::Subsonic);
        assert!(download_album(&mut state, &album, &tracks[1..], DownloadAction::Open).is_empty());
        assert_eq!(
            state.notifications.visible().next().map(|n| n.message.as_str()),
            Some("No parent album found")
        );
    }
}
