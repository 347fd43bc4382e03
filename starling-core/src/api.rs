use starling_state::{
    Album, Artist, ItemId, Playlist, Row, RowKind, RowKindTag, Track, bs, jf,
};

use crate::{
    config::{Server, ServerType},
    query::{AlbumDetail, ArtistDetail, PlaylistDetail, QueryData, QueryKey},
    route::AlbumListFilter,
};

#[derive(Debug)]
pub enum ApiError {
    Subsonic(bs::ClientError),
    Jellyfin(jf::ClientError),
    /// The server type has no equivalent of the endpoint.
    Unsupported {
        server_type: ServerType,
        endpoint: &'static str,
    },
}
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Subsonic(e) => write!(f, "{e}"),
            ApiError::Jellyfin(e) => write!(f, "{e}"),
            ApiError::Unsupported {
                server_type,
                endpoint,
            } => write!(f, "{server_type} does not support {endpoint}"),
        }
    }
}
impl std::error::Error for ApiError {}
impl From<bs::ClientError> for ApiError {
    fn from(e: bs::ClientError) -> Self {
        ApiError::Subsonic(e)
    }
}
impl From<jf::ClientError> for ApiError {
    fn from(e: jf::ClientError) -> Self {
        ApiError::Jellyfin(e)
    }
}
pub type ApiResult<T> = Result<T, ApiError>;

/// A write to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Star { ids: Vec<ItemId>, kind: RowKindTag },
    Unstar { ids: Vec<ItemId>, kind: RowKindTag },
    SetRating { ids: Vec<ItemId>, rating: u8 },
    CreatePlaylist { name: String },
}
impl Mutation {
    pub fn describe(&self) -> String {
        match self {
            Mutation::Star { ids, .. } => format!("star {} item(s)", ids.len()),
            Mutation::Unstar { ids, .. } => format!("unstar {} item(s)", ids.len()),
            Mutation::SetRating { ids, rating } => {
                format!("rate {} item(s) {rating}", ids.len())
            }
            Mutation::CreatePlaylist { name } => format!("create playlist \"{name}\""),
        }
    }
}

/// A Jellyfin connection that authenticates on first use.
pub struct JellyfinSession {
    server: Server,
    client: tokio::sync::OnceCell<jf::Client>,
}
impl JellyfinSession {
    async fn client(&self) -> ApiResult<&jf::Client> {
        let server = &self.server;
        Ok(self
            .client
            .get_or_try_init(|| {
                tracing::debug!("authenticating with Jellyfin at {}", server.base_url);
                jf::Client::authenticate(
                    server.base_url.clone(),
                    server.username.clone(),
                    server.password.clone(),
                    server.device_id.clone(),
                )
            })
            .await?)
    }
}

/// Routes every endpoint to the client for the configured server type and
/// converts the response into rows.
pub enum ApiController {
    Subsonic(bs::Client),
    Jellyfin(JellyfinSession),
}
impl ApiController {
    pub fn new(server: &Server) -> Self {
        match server.server_type {
            ServerType::Subsonic => ApiController::Subsonic(bs::Client::new(
                server.base_url.clone(),
                server.username.clone(),
                server.password.clone(),
                "starling",
            )),
            ServerType::Jellyfin => ApiController::Jellyfin(JellyfinSession {
                server: server.clone(),
                client: tokio::sync::OnceCell::new(),
            }),
        }
    }

    pub fn server_type(&self) -> ServerType {
        match self {
            ApiController::Subsonic(_) => ServerType::Subsonic,
            ApiController::Jellyfin(_) => ServerType::Jellyfin,
        }
    }

    pub async fn ping(&self) -> ApiResult<()> {
        match self {
            ApiController::Subsonic(c) => Ok(c.ping().await?),
            ApiController::Jellyfin(s) => s.client().await.map(|_| ()),
        }
    }

    pub async fn fetch(&self, key: &QueryKey) -> ApiResult<QueryData> {
        Ok(match key {
            QueryKey::AlbumList { filter, page } => {
                QueryData::Albums(self.get_album_list(filter, *page).await?)
            }
            QueryKey::Album(id) => QueryData::Album(self.get_album(id).await?),
            QueryKey::Playlists => QueryData::Playlists(self.get_playlists().await?),
            QueryKey::Playlist(id) => QueryData::Playlist(self.get_playlist(id).await?),
            QueryKey::Artist(id) => QueryData::Artist(self.get_artist(id).await?),
            QueryKey::SimilarSongs { artist, count } => {
                QueryData::SimilarSongs(self.get_similar_songs(artist, *count).await?)
            }
        })
    }

    pub async fn mutate(&self, mutation: &Mutation) -> ApiResult<()> {
        match mutation {
            Mutation::Star { ids, kind } => self.star(ids, *kind, true).await,
            Mutation::Unstar { ids, kind } => self.star(ids, *kind, false).await,
            Mutation::SetRating { ids, rating } => self.set_rating(ids, *rating).await,
            Mutation::CreatePlaylist { name } => self.create_playlist(name).await,
        }
    }

    pub async fn get_album_list(
        &self,
        filter: &AlbumListFilter,
        page: usize,
    ) -> ApiResult<Vec<Row>> {
        let size = QueryKey::ALBUM_LIST_PAGE_SIZE;
        let offset = page * size;
        let albums: Vec<Album> = match self {
            ApiController::Subsonic(c) => {
                let ty = match filter {
                    AlbumListFilter::Random => bs::AlbumListType::Random,
                    AlbumListFilter::Newest => bs::AlbumListType::Newest,
                    AlbumListFilter::Starred => bs::AlbumListType::Starred,
                    AlbumListFilter::Genre(genre) => bs::AlbumListType::ByGenre(genre.clone()),
                };
                c.get_album_list_2(&ty, Some(size), Some(offset))
                    .await?
                    .into_iter()
                    .map(Album::from)
                    .collect()
            }
            ApiController::Jellyfin(s) => {
                let mut query = jf::AlbumQuery {
                    limit: Some(size),
                    start_index: Some(offset),
                    ..Default::default()
                };
                match filter {
                    AlbumListFilter::Random => query.sort_by = Some("Random".into()),
                    AlbumListFilter::Newest => {
                        query.sort_by = Some("DateCreated".into());
                        query.descending = true;
                    }
                    AlbumListFilter::Starred => query.favorites_only = true,
                    AlbumListFilter::Genre(genre) => {
                        query.genre = Some(genre.clone());
                        query.sort_by = Some("SortName".into());
                    }
                }
                s.client()
                    .await?
                    .get_albums(&query)
                    .await?
                    .into_iter()
                    .map(Album::from)
                    .collect()
            }
        };
        Ok(albums
            .into_iter()
            .map(|a| Row::new(RowKind::Album(a)))
            .collect())
    }

    pub async fn get_album(&self, id: &ItemId) -> ApiResult<AlbumDetail> {
        let (album, tracks): (Album, Vec<Track>) = match self {
            ApiController::Subsonic(c) => {
                let response = c.get_album_with_songs(id.0.clone()).await?;
                let tracks = response.song.into_iter().map(Track::from).collect();
                (Album::from(response.album), tracks)
            }
            ApiController::Jellyfin(s) => {
                let client = s.client().await?;
                let album = client.get_item(&id.0).await?;
                let tracks = client.get_album_tracks(&id.0).await?;
                let mut album = Album::from(album);
                if album.duration == 0 {
                    album.duration = jf::total_duration_seconds(&tracks);
                }
                if album.song_count == 0 {
                    album.song_count = tracks.len() as u32;
                }
                (album, tracks.into_iter().map(Track::from).collect())
            }
        };

        let tracks = tracks
            .into_iter()
            .map(|mut t| {
                if album.genre.is_some() {
                    t.album_genre = album.genre.clone();
                }
                Row::track(t)
            })
            .collect();
        Ok(AlbumDetail {
            album: Row::new(RowKind::Album(album)),
            tracks,
        })
    }

    pub async fn get_playlists(&self) -> ApiResult<Vec<Row>> {
        let playlists: Vec<Playlist> = match self {
            ApiController::Subsonic(c) => c
                .get_playlists()
                .await?
                .into_iter()
                .map(Playlist::from)
                .collect(),
            ApiController::Jellyfin(s) => s
                .client()
                .await?
                .get_playlists()
                .await?
                .into_iter()
                .map(Playlist::from)
                .collect(),
        };
        Ok(playlists
            .into_iter()
            .map(|p| Row::new(RowKind::Playlist(p)))
            .collect())
    }

    pub async fn get_playlist(&self, id: &ItemId) -> ApiResult<PlaylistDetail> {
        let (playlist, entries): (Playlist, Vec<Track>) = match self {
            ApiController::Subsonic(c) => {
                let response = c.get_playlist(id.0.clone()).await?;
                let entries = response.entry.into_iter().map(Track::from).collect();
                (Playlist::from(response.playlist), entries)
            }
            ApiController::Jellyfin(s) => {
                let client = s.client().await?;
                let playlist = client.get_item(&id.0).await?;
                let entries = client.get_playlist_items(&id.0).await?;
                let mut playlist = Playlist::from(playlist);
                playlist.song_count = entries.len() as u32;
                playlist.duration = jf::total_duration_seconds(&entries);
                (playlist, entries.into_iter().map(Track::from).collect())
            }
        };
        Ok(PlaylistDetail {
            playlist: Row::new(RowKind::Playlist(playlist)),
            entries: entries.into_iter().map(Row::track).collect(),
        })
    }

    pub async fn get_artist(&self, id: &ItemId) -> ApiResult<ArtistDetail> {
        let (artist, albums, biography) = match self {
            ApiController::Subsonic(c) => {
                let response = c.get_artist(id.0.clone()).await?;
                // Biography is best-effort; many servers have no last.fm key.
                let biography = match c.get_artist_info_2(id.0.clone(), Some(0)).await {
                    Ok(info) => info.biography.filter(|b| !b.is_empty()),
                    Err(e) => {
                        tracing::debug!("no artist info for {id}: {e}");
                        None
                    }
                };
                let albums: Vec<Album> = response.album.into_iter().map(Album::from).collect();
                (Artist::from(response.artist), albums, biography)
            }
            ApiController::Jellyfin(s) => {
                let client = s.client().await?;
                let artist = client.get_item(&id.0).await?;
                let biography = artist.overview.clone();
                let albums = client
                    .get_artist_albums(&id.0)
                    .await?
                    .into_iter()
                    .map(Album::from)
                    .collect();
                (Artist::from(artist), albums, biography)
            }
        };
        Ok(ArtistDetail {
            artist: Row::new(RowKind::Artist(artist)),
            albums: albums
                .into_iter()
                .map(|a| Row::new(RowKind::Album(a)))
                .collect(),
            biography,
        })
    }

    pub async fn get_similar_songs(&self, artist: &ItemId, count: usize) -> ApiResult<Vec<Row>> {
        let tracks: Vec<Track> = match self {
            ApiController::Subsonic(c) => c
                .get_similar_songs_2(artist.0.clone(), Some(count))
                .await?
                .into_iter()
                .map(Track::from)
                .collect(),
            ApiController::Jellyfin(s) => s
                .client()
                .await?
                .get_instant_mix(&artist.0, count)
                .await?
                .into_iter()
                .map(Track::from)
                .collect(),
        };
        Ok(tracks.into_iter().map(Row::track).collect())
    }

    async fn star(&self, ids: &[ItemId], kind: RowKindTag, starred: bool) -> ApiResult<()> {
        match self {
            ApiController::Subsonic(c) => {
                let ids: Vec<String> = ids.iter().map(|id| id.0.clone()).collect();
                let (tracks, albums, artists) = match kind {
                    RowKindTag::Track => (ids, vec![], vec![]),
                    RowKindTag::Album => (vec![], ids, vec![]),
                    RowKindTag::Artist => (vec![], vec![], ids),
                    RowKindTag::Playlist => {
                        return Err(ApiError::Unsupported {
                            server_type: ServerType::Subsonic,
                            endpoint: "starring playlists",
                        });
                    }
                };
                if starred {
                    c.star(tracks, albums, artists).await?;
                } else {
                    c.unstar(tracks, albums, artists).await?;
                }
                Ok(())
            }
            ApiController::Jellyfin(s) => {
                let client = s.client().await?;
                for id in ids {
                    if starred {
                        client.favorite(&id.0).await?;
                    } else {
                        client.unfavorite(&id.0).await?;
                    }
                }
                Ok(())
            }
        }
    }

    async fn set_rating(&self, ids: &[ItemId], rating: u8) -> ApiResult<()> {
        match self {
            ApiController::Subsonic(c) => {
                for id in ids {
                    c.set_rating(id.0.clone(), rating).await?;
                }
                Ok(())
            }
            ApiController::Jellyfin(_) => Err(ApiError::Unsupported {
                server_type: ServerType::Jellyfin,
                endpoint: "ratings",
            }),
        }
    }

    async fn create_playlist(&self, name: &str) -> ApiResult<()> {
        match self {
            ApiController::Subsonic(c) => {
                c.create_playlist(name, std::iter::empty::<String>()).await?;
            }
            ApiController::Jellyfin(s) => {
                s.client()
                    .await?
                    .create_playlist(name, std::iter::empty::<String>())
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn download_url(&self, id: &ItemId) -> ApiResult<String> {
        match self {
            ApiController::Subsonic(c) => Ok(c.download_url(id.0.clone())?),
            ApiController::Jellyfin(s) => Ok(s.client().await?.download_url(&id.0)?),
        }
    }
}
