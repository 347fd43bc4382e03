use crate::{ItemId, bs, jf};

const UNKNOWN_ARTIST: &str = "[Unknown Artist]";

/// A track, as the list views care about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// The track ID
    pub id: ItemId,
    /// The track title
    pub title: String,
    /// The track artist
    pub artist: Option<String>,
    /// The track artist ID
    pub artist_id: Option<ItemId>,
    /// The album name
    pub album: Option<String>,
    /// The album ID
    pub album_id: Option<ItemId>,
    /// The album artist, falling back to the track artist
    pub album_artist: Option<String>,
    /// The album artist ID
    pub album_artist_id: Option<ItemId>,
    /// The track genre
    pub genre: Option<String>,
    /// The genre of the album the track belongs to
    pub album_genre: Option<String>,
    /// The duration in seconds
    pub duration: Option<u32>,
    /// The release year
    pub year: Option<i32>,
    /// The track number
    pub track: Option<u32>,
    /// The disc number
    pub disc_number: Option<u32>,
    /// The bitrate in kbps
    pub bit_rate: Option<u32>,
    /// The file size in bytes
    pub size: Option<u64>,
    /// Whether the track is starred
    pub starred: bool,
    /// The user's rating, 1-5
    pub user_rating: Option<u8>,
    /// The number of times this track has been played
    pub play_count: Option<u64>,
    /// When the track was added to the library
    pub created: Option<String>,
    /// The path of the file on the server
    pub path: Option<String>,
    /// The parent directory of the track, used for folder downloads
    pub parent: Option<ItemId>,
    /// The cover art ID
    pub cover_art: Option<String>,
}
impl Track {
    /// Create a track with only an ID and title.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}
impl From<bs::Child> for Track {
    fn from(child: bs::Child) -> Self {
        let album_artist = child
            .album_artist()
            .filter(|a| *a != UNKNOWN_ARTIST)
            .map(str::to_string);
        let artist = child.artist.filter(|a| a != UNKNOWN_ARTIST);

        Track {
            id: ItemId(child.id),
            title: child.title,
            artist,
            artist_id: child.artist_id.clone().map(ItemId),
            album: child.album,
            album_id: child.album_id.map(ItemId),
            album_artist,
            album_artist_id: child.artist_id.map(ItemId),
            album_genre: child.genre.clone(),
            genre: child.genre,
            duration: child.duration,
            year: child.year,
            track: child.track,
            disc_number: child.disc_number,
            bit_rate: child.bit_rate,
            size: child.size,
            starred: child.starred.is_some(),
            user_rating: child.user_rating.map(|r| r.min(5) as u8),
            play_count: child.play_count,
            created: child.created,
            path: child.path,
            parent: child.parent.map(ItemId),
            cover_art: child.cover_art,
        }
    }
}
impl From<jf::BaseItem> for Track {
    fn from(item: jf::BaseItem) -> Self {
        let duration = item.duration_seconds();
        let source = item.media_sources.first();
        let artist = item.artist_items.first();
        let album_artist = item.album_artists.first();
        let genre = item.genres.first().cloned();

        Track {
            title: item.name,
            artist: artist.map(|a| a.name.clone()),
            artist_id: artist.map(|a| ItemId(a.id.clone())),
            album: item.album,
            album_id: item.album_id.clone().map(ItemId),
            album_artist: item
                .album_artist
                .or_else(|| album_artist.map(|a| a.name.clone())),
            album_artist_id: album_artist.map(|a| ItemId(a.id.clone())),
            album_genre: genre.clone(),
            genre,
            duration,
            year: item.production_year,
            track: item.index_number,
            disc_number: item.parent_index_number,
            bit_rate: source.and_then(|s| s.bitrate).map(|b| (b / 1000) as u32),
            size: source.and_then(|s| s.size),
            starred: item.user_data.is_favorite,
            user_rating: None,
            play_count: Some(item.user_data.play_count),
            created: item.date_created,
            path: item.path.or_else(|| source.and_then(|s| s.path.clone())),
            parent: item.parent_id.or(item.album_id).map(ItemId),
            cover_art: Some(item.id.clone()),
            id: ItemId(item.id),
        }
    }
}
