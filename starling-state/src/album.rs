use crate::{ItemId, bs, jf};

/// An album, as the list views care about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Album {
    /// The album ID
    pub id: ItemId,
    /// The album name
    pub title: String,
    /// The album artist
    pub artist: Option<String>,
    /// The album artist ID
    pub artist_id: Option<ItemId>,
    /// The album genre
    pub genre: Option<String>,
    /// The release year
    pub year: Option<i32>,
    /// The total duration in seconds
    pub duration: u32,
    /// The number of tracks
    pub song_count: u32,
    /// The number of times this album has been played
    pub play_count: Option<u64>,
    /// When the album was added to the library
    pub created: Option<String>,
    /// Whether the album is starred
    pub starred: bool,
    /// The user's rating, 1-5
    pub user_rating: Option<u8>,
    /// The cover art ID
    pub cover_art: Option<String>,
}
impl Album {
    /// Create an album with only an ID and title.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}
impl From<bs::AlbumID3> for Album {
    fn from(album: bs::AlbumID3) -> Self {
        Album {
            id: ItemId(album.id),
            title: album.name,
            artist: album.artist,
            artist_id: album.artist_id.map(ItemId),
            genre: album.genre,
            year: album.year,
            duration: album.duration,
            song_count: album.song_count,
            play_count: album.play_count,
            created: Some(album.created).filter(|c| !c.is_empty()),
            starred: album.starred.is_some(),
            user_rating: None,
            cover_art: album.cover_art,
        }
    }
}
impl From<jf::BaseItem> for Album {
    fn from(item: jf::BaseItem) -> Self {
        let duration = item.duration_seconds().unwrap_or_default();
        let album_artist = item.album_artists.first();
        Album {
            title: item.name,
            artist: item
                .album_artist
                .or_else(|| album_artist.map(|a| a.name.clone())),
            artist_id: album_artist.map(|a| ItemId(a.id.clone())),
            genre: item.genres.first().cloned(),
            year: item.production_year,
            duration,
            song_count: item.child_count.unwrap_or_default(),
            play_count: Some(item.user_data.play_count),
            created: item.date_created,
            starred: item.user_data.is_favorite,
            user_rating: None,
            cover_art: Some(item.id.clone()),
            id: ItemId(item.id),
        }
    }
}
