use crate::{Client, ClientResult};

/// Annotation endpoints: stars and ratings.
impl Client {
    /// Star items.
    pub async fn star(
        &self,
        track_ids: impl IntoIterator<Item = String>,
        album_ids: impl IntoIterator<Item = String>,
        artist_ids: impl IntoIterator<Item = String>,
    ) -> ClientResult<()> {
        let parameters = annotation_parameters(track_ids, album_ids, artist_ids);
        self.request::<()>("star", &parameters).await
    }

    /// Unstar items.
    pub async fn unstar(
        &self,
        track_ids: impl IntoIterator<Item = String>,
        album_ids: impl IntoIterator<Item = String>,
        artist_ids: impl IntoIterator<Item = String>,
    ) -> ClientResult<()> {
        let parameters = annotation_parameters(track_ids, album_ids, artist_ids);
        self.request::<()>("unstar", &parameters).await
    }

    /// Set the user rating of an item. A rating of 0 removes the rating.
    pub async fn set_rating(&self, id: impl Into<String>, rating: u8) -> ClientResult<()> {
        let rating = rating.min(5);
        self.request::<()>("setRating", &[("id", id.into()), ("rating", rating.to_string())])
            .await
    }
}

fn annotation_parameters(
    track_ids: impl IntoIterator<Item = String>,
    album_ids: impl IntoIterator<Item = String>,
    artist_ids: impl IntoIterator<Item = String>,
) -> Vec<(&'static str, String)> {
    let mut parameters = vec![];
    for track_id in track_ids {
        parameters.push(("id", track_id));
    }
    for album_id in album_ids {
        parameters.push(("albumId", album_id));
    }
    for artist_id in artist_ids {
        parameters.push(("artistId", artist_id));
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_parameters_keys() {
        let parameters = annotation_parameters(
            ["t1".to_string()],
            ["a1".to_string(), "a2".to_string()],
            std::iter::empty(),
        );
        assert_eq!(
            parameters,
            vec![
                ("id", "t1".to_string()),
                ("albumId", "a1".to_string()),
                ("albumId", "a2".to_string()),
            ]
        );
    }
}
