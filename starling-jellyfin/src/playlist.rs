use serde::{Deserialize, Serialize};

use crate::{BaseItem, Client, ClientResult, ItemsResult, item::TICKS_PER_SECOND};

/// Playlist endpoints.
impl Client {
    /// Get every playlist visible to the user.
    pub async fn get_playlists(&self) -> ClientResult<Vec<BaseItem>> {
        let parameters = [
            ("IncludeItemTypes", "Playlist".to_string()),
            ("Recursive", "true".to_string()),
            ("SortBy", "SortName".to_string()),
            ("Fields", "ChildCount,DateCreated,Genres,Overview".to_string()),
        ];
        Ok(self
            .get::<ItemsResult>(&format!("/Users/{}/Items", self.user_id), &parameters)
            .await?
            .items)
    }

    /// Get the entries of a playlist, in playlist order.
    pub async fn get_playlist_items(&self, playlist_id: &str) -> ClientResult<Vec<BaseItem>> {
        let parameters = [
            ("UserId", self.user_id.clone()),
            ("Fields", "Genres,DateCreated,MediaSources,ParentId,Path".to_string()),
        ];
        Ok(self
            .get::<ItemsResult>(&format!("/Playlists/{playlist_id}/Items"), &parameters)
            .await?
            .items)
    }

    /// Create an audio playlist, returning the ID of the new playlist.
    pub async fn create_playlist(
        &self,
        name: impl Into<String>,
        item_ids: impl IntoIterator<Item = String>,
    ) -> ClientResult<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct CreatePlaylistRequest {
            name: String,
            ids: Vec<String>,
            user_id: String,
            media_type: &'static str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct PlaylistCreationResult {
            id: String,
        }

        let body = CreatePlaylistRequest {
            name: name.into(),
            ids: item_ids.into_iter().collect(),
            user_id: self.user_id.clone(),
            media_type: "Audio",
        };
        let bytes = self.post("/Playlists", &[], Some(&body)).await?;
        let result: PlaylistCreationResult = serde_json::from_slice(&bytes)?;
        Ok(result.id)
    }
}

/// The total duration of a list of items, in seconds.
pub fn total_duration_seconds(items: &[BaseItem]) -> u32 {
    let ticks: u64 = items.iter().filter_map(|i| i.run_time_ticks).sum();
    (ticks / TICKS_PER_SECOND) as u32
}
