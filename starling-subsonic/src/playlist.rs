use serde::{Deserialize, Serialize};

use crate::{Child, Client, ClientResult};

/// A playlist, without its entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// The playlist ID
    pub id: String,
    /// The playlist name
    pub name: String,
    /// The playlist comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The owner of the playlist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Whether the playlist is visible to other users
    #[serde(default)]
    pub public: bool,
    /// The number of songs in the playlist
    #[serde(default)]
    pub song_count: u32,
    /// The total duration of the playlist in seconds
    #[serde(default)]
    pub duration: u32,
    /// The creation date of the playlist
    #[serde(default)]
    pub created: String,
    /// The date the playlist was last changed
    #[serde(default)]
    pub changed: String,
    /// The cover art ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
}

/// A playlist with its entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistWithSongs {
    /// The playlist metadata
    #[serde(flatten)]
    pub playlist: Playlist,
    /// The entries of the playlist, in playlist order
    #[serde(default)]
    pub entry: Vec<Child>,
}

/// Playlist-related endpoints.
impl Client {
    /// Get all playlists the user is allowed to play.
    pub async fn get_playlists(&self) -> ClientResult<Vec<Playlist>> {
        #[derive(Default, Serialize, Deserialize)]
        struct Playlists {
            #[serde(default)]
            playlist: Vec<Playlist>,
        }

        #[derive(Serialize, Deserialize)]
        struct PlaylistsResponse {
            #[serde(default)]
            playlists: Playlists,
        }

        Ok(self
            .request::<PlaylistsResponse>("getPlaylists", &[])
            .await?
            .playlists
            .playlist)
    }

    /// Get a playlist and its entries.
    pub async fn get_playlist(&self, id: impl Into<String>) -> ClientResult<PlaylistWithSongs> {
        #[derive(Serialize, Deserialize)]
        struct PlaylistResponse {
            playlist: PlaylistWithSongs,
        }

        Ok(self
            .request::<PlaylistResponse>("getPlaylist", &[("id", id.into())])
            .await?
            .playlist)
    }

    /// Create a new playlist with the given name, optionally seeded with songs.
    ///
    /// Servers implementing API 1.14.0 or later return the created playlist;
    /// older servers return an empty body, in which case `None` is returned.
    pub async fn create_playlist(
        &self,
        name: impl Into<String>,
        song_ids: impl IntoIterator<Item = String>,
    ) -> ClientResult<Option<PlaylistWithSongs>> {
        let mut parameters = vec![("name", name.into())];
        for song_id in song_ids {
            parameters.push(("songId", song_id));
        }

        #[derive(Serialize, Deserialize)]
        struct CreatePlaylistResponse {
            #[serde(default)]
            playlist: Option<PlaylistWithSongs>,
        }

        Ok(self
            .request::<CreatePlaylistResponse>("createPlaylist", &parameters)
            .await?
            .playlist)
    }
}
