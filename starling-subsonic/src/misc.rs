use crate::{Client, ClientResult};

/// Miscellaneous endpoints.
impl Client {
    /// Ping the server and verify the connection.
    pub async fn ping(&self) -> ClientResult<()> {
        self.request::<()>("ping", &[]).await?;
        Ok(())
    }

    /// The URL that downloads the given item. Directories and albums are
    /// served as a zip archive by the server.
    pub fn download_url(&self, id: impl Into<String>) -> ClientResult<String> {
        self.url_for("download", &[("id", id.into())])
    }

    /// The URL for the cover art with the given ID.
    pub fn cover_art_url(&self, id: impl Into<String>, size: Option<usize>) -> ClientResult<String> {
        let mut parameters = vec![("id", id.into())];
        if let Some(size) = size {
            parameters.push(("size", size.to_string()));
        }
        self.url_for("getCoverArt", &parameters)
    }
}
