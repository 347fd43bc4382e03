use serde::{Deserialize, Serialize};

use crate::{AlbumID3, Child, Client, ClientResult};

/// An artist with ID3 metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistID3 {
    /// The id of the artist.
    pub id: String,
    /// The name of the artist.
    pub name: String,
    /// The cover art of the artist.
    pub cover_art: Option<String>,
    /// The artist image url.
    pub artist_image_url: Option<String>,
    /// The album count of the artist.
    #[serde(default)]
    pub album_count: u32,
    /// The date the artist was starred. [ISO 8601]
    pub starred: Option<String>,
}

/// An artist together with all of their albums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistWithAlbumsID3 {
    /// The artist metadata.
    #[serde(flatten)]
    pub artist: ArtistID3,
    /// The albums credited to the artist.
    #[serde(default)]
    pub album: Vec<AlbumID3>,
}

/// Biographical information about an artist, usually sourced from last.fm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo2 {
    /// The artist biography. May contain HTML.
    pub biography: Option<String>,
    /// The MusicBrainz ID of the artist.
    pub music_brainz_id: Option<String>,
    /// The last.fm page of the artist.
    pub last_fm_url: Option<String>,
    /// A large image of the artist.
    pub large_image_url: Option<String>,
    /// Artists similar to this one that exist in the library.
    #[serde(default)]
    pub similar_artist: Vec<ArtistID3>,
}

/// Artist-related endpoints.
impl Client {
    /// Get an artist and their albums.
    pub async fn get_artist(&self, id: impl Into<String>) -> ClientResult<ArtistWithAlbumsID3> {
        #[derive(Serialize, Deserialize)]
        struct ArtistResponse {
            artist: ArtistWithAlbumsID3,
        }

        Ok(self
            .request::<ArtistResponse>("getArtist", &[("id", id.into())])
            .await?
            .artist)
    }

    /// Get biographical information about an artist.
    pub async fn get_artist_info_2(
        &self,
        id: impl Into<String>,
        count: Option<usize>,
    ) -> ClientResult<ArtistInfo2> {
        let mut parameters = vec![("id", id.into())];
        if let Some(count) = count {
            parameters.push(("count", count.to_string()));
        }

        #[derive(Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ArtistInfo2Response {
            #[serde(default)]
            artist_info_2: ArtistInfo2,
        }

        Ok(self
            .request::<ArtistInfo2Response>("getArtistInfo2", &parameters)
            .await?
            .artist_info_2)
    }

    /// Get songs similar to the given artist, album or song, organised by ID3 tags.
    pub async fn get_similar_songs_2(
        &self,
        id: impl Into<String>,
        count: Option<usize>,
    ) -> ClientResult<Vec<Child>> {
        let mut parameters = vec![("id", id.into())];
        if let Some(count) = count {
            parameters.push(("count", count.to_string()));
        }

        #[derive(Default, Serialize, Deserialize)]
        struct SimilarSongs2 {
            #[serde(default)]
            song: Vec<Child>,
        }

        #[derive(Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SimilarSongs2Response {
            #[serde(default)]
            similar_songs_2: SimilarSongs2,
        }

        Ok(self
            .request::<SimilarSongs2Response>("getSimilarSongs2", &parameters)
            .await?
            .similar_songs_2
            .song)
    }
}
