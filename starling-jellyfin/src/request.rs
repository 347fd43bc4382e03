use serde::{Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult, client::authorization_header};

/// Making requests to the Jellyfin API.
impl Client {
    /// Make a `GET` request and deserialize the JSON body into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("X-Emby-Authorization", self.authorization())
            .query(parameters)
            .send()
            .await?;
        let bytes = Self::check_status(response).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a `POST` request with an optional JSON body, returning the raw body.
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        parameters: &[(&str, String)],
        body: Option<&B>,
    ) -> ClientResult<Vec<u8>> {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("X-Emby-Authorization", self.authorization())
            .query(parameters);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::check_status(request.send().await?).await
    }

    /// Make a `DELETE` request.
    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(format!("{}{path}", self.base_url))
            .header("X-Emby-Authorization", self.authorization())
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Build a URL that can be opened without the client's headers, carrying the
    /// access token as a query parameter.
    pub(crate) fn url_with_token(
        &self,
        path: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<String> {
        let base = format!("{}{path}", self.base_url);
        let all = parameters
            .iter()
            .cloned()
            .chain(std::iter::once(("api_key", self.access_token.clone())));
        reqwest::Url::parse_with_params(&base, all)
            .map(|url| url.to_string())
            .map_err(|_| ClientError::InvalidUrl(base))
    }

    pub(crate) async fn check_status(response: reqwest::Response) -> ClientResult<Vec<u8>> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes.into())
    }

    fn authorization(&self) -> String {
        authorization_header(&self.device_id, Some(&self.access_token))
    }
}
