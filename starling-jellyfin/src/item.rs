use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// Jellyfin stores durations in ticks of 100 nanoseconds.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// A reference to another item by name and ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NameIdPair {
    /// The name of the item.
    #[serde(default)]
    pub name: String,
    /// The ID of the item.
    pub id: String,
}

/// Per-user data attached to an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserItemData {
    /// Whether the user has marked the item as a favorite.
    #[serde(default)]
    pub is_favorite: bool,
    /// How many times the user has played the item.
    #[serde(default)]
    pub play_count: u64,
}

/// A media source of an item; only the fields used for display are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaSource {
    /// The size of the file in bytes.
    pub size: Option<u64>,
    /// The bitrate in bits per second.
    pub bitrate: Option<u64>,
    /// The path of the file on the server.
    pub path: Option<String>,
}

/// A library item: an audio track, album, artist or playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItem {
    /// The item ID.
    pub id: String,
    /// The item name.
    #[serde(default)]
    pub name: String,
    /// The item type, such as `Audio`, `MusicAlbum`, `MusicArtist` or `Playlist`.
    #[serde(rename = "Type")]
    pub item_type: Option<String>,
    /// The ID of the parent item.
    pub parent_id: Option<String>,
    /// The album name.
    pub album: Option<String>,
    /// The album ID.
    pub album_id: Option<String>,
    /// The album artist name.
    pub album_artist: Option<String>,
    /// The album artists.
    #[serde(default)]
    pub album_artists: Vec<NameIdPair>,
    /// The track artists.
    #[serde(default)]
    pub artist_items: Vec<NameIdPair>,
    /// The genres of the item.
    #[serde(default)]
    pub genres: Vec<String>,
    /// The duration of the item in ticks.
    pub run_time_ticks: Option<u64>,
    /// The release year.
    pub production_year: Option<i32>,
    /// The track number.
    pub index_number: Option<u32>,
    /// The disc number.
    pub parent_index_number: Option<u32>,
    /// When the item was added to the library.
    pub date_created: Option<String>,
    /// The number of children (tracks in an album or playlist).
    pub child_count: Option<u32>,
    /// The path of the item on the server.
    pub path: Option<String>,
    /// A free-form description.
    pub overview: Option<String>,
    /// Per-user data.
    #[serde(default)]
    pub user_data: UserItemData,
    /// The media sources.
    #[serde(default)]
    pub media_sources: Vec<MediaSource>,
}
impl BaseItem {
    /// The duration in whole seconds.
    pub fn duration_seconds(&self) -> Option<u32> {
        self.run_time_ticks
            .map(|ticks| (ticks / TICKS_PER_SECOND) as u32)
    }
}

/// The envelope of every item query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    /// The items in this page.
    #[serde(default)]
    pub items: Vec<BaseItem>,
    /// The total number of items matching the query.
    #[serde(default)]
    pub total_record_count: u32,
}

/// How [`Client::get_albums`] orders and filters albums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumQuery {
    /// The sort order, such as `Random`, `DateCreated` or `SortName`
    pub sort_by: Option<String>,
    /// Whether to sort descending
    pub descending: bool,
    /// Only return favorites
    pub favorites_only: bool,
    /// Only return albums in this genre
    pub genre: Option<String>,
    /// The maximum number of albums to return
    pub limit: Option<usize>,
    /// The index of the first album to return
    pub start_index: Option<usize>,
}

const ITEM_FIELDS: &str = "Genres,DateCreated,MediaSources,ParentId,Path,ChildCount,Overview";

/// Item endpoints.
impl Client {
    /// Get a single item.
    pub async fn get_item(&self, id: &str) -> ClientResult<BaseItem> {
        self.get(&format!("/Users/{}/Items/{id}", self.user_id), &[])
            .await
    }

    /// Get the tracks of an album, in disc and track order.
    pub async fn get_album_tracks(&self, album_id: &str) -> ClientResult<Vec<BaseItem>> {
        let parameters = [
            ("ParentId", album_id.to_string()),
            ("IncludeItemTypes", "Audio".to_string()),
            ("SortBy", "ParentIndexNumber,IndexNumber,SortName".to_string()),
            ("Fields", ITEM_FIELDS.to_string()),
        ];
        Ok(self
            .get::<ItemsResult>(&format!("/Users/{}/Items", self.user_id), &parameters)
            .await?
            .items)
    }

    /// Get the albums of an artist, newest first.
    pub async fn get_artist_albums(&self, artist_id: &str) -> ClientResult<Vec<BaseItem>> {
        let parameters = [
            ("ArtistIds", artist_id.to_string()),
            ("IncludeItemTypes", "MusicAlbum".to_string()),
            ("Recursive", "true".to_string()),
            ("SortBy", "ProductionYear,SortName".to_string()),
            ("SortOrder", "Descending".to_string()),
            ("Fields", ITEM_FIELDS.to_string()),
        ];
        Ok(self
            .get::<ItemsResult>(&format!("/Users/{}/Items", self.user_id), &parameters)
            .await?
            .items)
    }

    /// Get a page of albums.
    pub async fn get_albums(&self, query: &AlbumQuery) -> ClientResult<Vec<BaseItem>> {
        let mut parameters = vec![
            ("IncludeItemTypes", "MusicAlbum".to_string()),
            ("Recursive", "true".to_string()),
            ("Fields", ITEM_FIELDS.to_string()),
        ];
        if let Some(sort_by) = &query.sort_by {
            parameters.push(("SortBy", sort_by.clone()));
        }
        if query.descending {
            parameters.push(("SortOrder", "Descending".to_string()));
        }
        if query.favorites_only {
            parameters.push(("Filters", "IsFavorite".to_string()));
        }
        if let Some(genre) = &query.genre {
            parameters.push(("Genres", genre.clone()));
        }
        if let Some(limit) = query.limit {
            parameters.push(("Limit", limit.to_string()));
        }
        if let Some(start_index) = query.start_index {
            parameters.push(("StartIndex", start_index.to_string()));
        }
        Ok(self
            .get::<ItemsResult>(&format!("/Users/{}/Items", self.user_id), &parameters)
            .await?
            .items)
    }

    /// Get a mix of tracks related to the given item, such as an artist.
    pub async fn get_instant_mix(&self, id: &str, limit: usize) -> ClientResult<Vec<BaseItem>> {
        let parameters = [
            ("UserId", self.user_id.clone()),
            ("Limit", limit.to_string()),
            ("Fields", ITEM_FIELDS.to_string()),
        ];
        Ok(self
            .get::<ItemsResult>(&format!("/Items/{id}/InstantMix"), &parameters)
            .await?
            .items)
    }

    /// The URL that downloads the original file of an item.
    pub fn download_url(&self, id: &str) -> ClientResult<String> {
        self.url_with_token(&format!("/Items/{id}/Download"), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_audio_item() {
        let json = r#"{
            "Id": "t1",
            "Name": "Song",
            "Type": "Audio",
            "AlbumId": "al1",
            "AlbumArtists": [{"Name": "Band", "Id": "ar1"}],
            "RunTimeTicks": 1850000000,
            "UserData": {"IsFavorite": true, "PlayCount": 3}
        }"#;
        let item: BaseItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type.as_deref(), Some("Audio"));
        assert_eq!(item.duration_seconds(), Some(185));
        assert!(item.user_data.is_favorite);
        assert_eq!(item.album_artists[0].id, "ar1");
        assert!(item.genres.is_empty());
    }

    #[test]
    fn test_download_url_carries_token() {
        let client = Client::with_token("https://jf.local", "u1", "tok", "d1");
        assert_eq!(
            client.download_url("t1").unwrap(),
            "https://jf.local/Items/t1/Download?api_key=tok"
        );
    }
}
