use crate::{Client, ClientResult};

/// Favorite endpoints. Jellyfin has no per-user star rating, only favorites.
impl Client {
    /// Mark an item as a favorite.
    pub async fn favorite(&self, id: &str) -> ClientResult<()> {
        self.post::<()>(&format!("/Users/{}/FavoriteItems/{id}", self.user_id), &[], None)
            .await?;
        Ok(())
    }

    /// Remove an item from the favorites.
    pub async fn unfavorite(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/Users/{}/FavoriteItems/{id}", self.user_id))
            .await
    }
}
