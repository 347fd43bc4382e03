use serde::{Deserialize, Serialize};

/// Represents a child item (file or directory) in the Subsonic API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    /// The unique identifier
    pub id: String,
    /// The ID of the parent directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Whether this is a directory
    #[serde(default)]
    pub is_dir: bool,
    /// The title of the item
    pub title: String,
    /// The album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// The artist name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// The track number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<u32>,
    /// The release year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// The genre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// The cover art ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    /// The file size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// The file suffix (extension)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// The duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// The bitrate in kbps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
    /// The path of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The user's rating (1-5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u32>,
    /// The number of times the item has been played
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u64>,
    /// The disc number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
    /// The creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// When the item was starred by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<String>,
    /// The album ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    /// The artist ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    /// The album artist name, as reported by OpenSubsonic servers
    #[cfg(feature = "opensubsonic")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_album_artist: Option<String>,
}
impl Child {
    /// The album artist of the item, falling back to the track artist on servers
    /// that do not report one.
    pub fn album_artist(&self) -> Option<&str> {
        #[cfg(feature = "opensubsonic")]
        if let Some(artist) = self.display_album_artist.as_deref() {
            return Some(artist);
        }
        self.artist.as_deref()
    }
}
