use crate::{ItemId, bs, jf};

/// An artist, as the list views care about it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artist {
    /// The artist ID
    pub id: ItemId,
    /// The artist name
    pub title: String,
    /// The number of albums by the artist
    pub album_count: u32,
    /// Whether the artist is starred
    pub starred: bool,
    /// The user's rating, 1-5
    pub user_rating: Option<u8>,
    /// The cover art ID
    pub cover_art: Option<String>,
}
impl Artist {
    /// Create an artist with only an ID and name.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}
impl From<bs::ArtistID3> for Artist {
    fn from(artist: bs::ArtistID3) -> Self {
        Artist {
            id: ItemId(artist.id),
            title: artist.name,
            album_count: artist.album_count,
            starred: artist.starred.is_some(),
            user_rating: None,
            cover_art: artist.cover_art,
        }
    }
}
impl From<jf::BaseItem> for Artist {
    fn from(item: jf::BaseItem) -> Self {
        Artist {
            title: item.name,
            album_count: item.child_count.unwrap_or_default(),
            starred: item.user_data.is_favorite,
            user_rating: None,
            cover_art: Some(item.id.clone()),
            id: ItemId(item.id),
        }
    }
}
