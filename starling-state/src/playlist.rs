use crate::{ItemId, bs, jf};

/// A playlist, as the list views care about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    /// The playlist ID
    pub id: ItemId,
    /// The playlist name
    pub title: String,
    /// The playlist comment
    pub comment: Option<String>,
    /// The owner of the playlist
    pub owner: Option<String>,
    /// Whether the playlist is visible to other users
    pub public: bool,
    /// The number of entries
    pub song_count: u32,
    /// The total duration in seconds
    pub duration: u32,
    /// When the playlist was created
    pub created: Option<String>,
    /// When the playlist was last changed
    pub changed: Option<String>,
    /// The cover art ID
    pub cover_art: Option<String>,
}
impl Playlist {
    /// Create a playlist with only an ID and name.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}
impl From<bs::Playlist> for Playlist {
    fn from(playlist: bs::Playlist) -> Self {
        Playlist {
            id: ItemId(playlist.id),
            title: playlist.name,
            comment: playlist.comment,
            owner: playlist.owner,
            public: playlist.public,
            song_count: playlist.song_count,
            duration: playlist.duration,
            created: Some(playlist.created).filter(|c| !c.is_empty()),
            changed: Some(playlist.changed).filter(|c| !c.is_empty()),
            cover_art: playlist.cover_art,
        }
    }
}
impl From<jf::BaseItem> for Playlist {
    fn from(item: jf::BaseItem) -> Self {
        let duration = item.duration_seconds().unwrap_or_default();
        Playlist {
            title: item.name,
            comment: item.overview,
            owner: None,
            public: false,
            song_count: item.child_count.unwrap_or_default(),
            duration,
            created: item.date_created,
            changed: None,
            cover_art: Some(item.id.clone()),
            id: ItemId(item.id),
        }
    }
}
