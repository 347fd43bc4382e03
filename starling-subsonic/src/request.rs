use rand::seq::IndexedRandom as _;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the Subsonic API.
impl Client {
    /// Make a request to the Subsonic API. `T` must contain a field corresponding to
    /// the actual value you want from the endpoint: that is, for `getAlbum`,
    /// `T` should be `{ album: AlbumWithSongsID3 }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid.
    pub async fn request<T: Serialize + DeserializeOwned>(
        &self,
        endpoint: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self
            .client
            .get(format!("{}/rest/{endpoint}", self.base_url))
            .query(&self.auth_parameters())
            .query(parameters);

        let bytes = request.send().await?.bytes().await?;
        Self::parse_response::<T>(&bytes)
    }

    /// Build a fully-authenticated URL for an endpoint without requesting it.
    ///
    /// Used for endpoints whose response is consumed by something other than
    /// this client, such as a browser download or a copied link.
    pub fn url_for(&self, endpoint: &str, parameters: &[(&str, String)]) -> ClientResult<String> {
        let base = format!("{}/rest/{endpoint}", self.base_url);
        let all = self
            .auth_parameters()
            .into_iter()
            .chain(parameters.iter().cloned());
        reqwest::Url::parse_with_params(&base, all)
            .map(|url| url.to_string())
            .map_err(|_| ClientError::InvalidUrl(base))
    }

    fn auth_parameters(&self) -> [(&'static str, String); 6] {
        let (salt, token) = self.generate_salt_and_token();
        [
            ("u", self.username.clone()),
            ("v", Self::API_VERSION.to_string()),
            ("c", self.client_id.clone()),
            ("f", "json".to_string()),
            ("t", token),
            ("s", salt),
        ]
    }

    fn parse_response<T: Serialize + DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        let response: Response<T> = serde_json::from_slice(bytes)?;

        if response.subsonic_response.status == ResponseStatus::Failed {
            let (code, message) = response
                .subsonic_response
                .error
                .map(|e| (e.code, e.message))
                .unwrap_or((0, None));
            return Err(ClientError::SubsonicError { code, message });
        }

        Ok(response.subsonic_response.body)
    }

    fn generate_salt_and_token(&self) -> (String, String) {
        let mut rng = rand::rng();

        let password = &self.password;
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let salt = String::from_iter(CHARSET.choose_multiple(&mut rng, 16).map(|c| *c as char));

        let token = format!("{password}{salt}");
        let token = md5::compute(token).0;
        let token = data_encoding::HEXLOWER.encode(&token);

        (salt, token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Response<T> {
    pub subsonic_response: SubsonicResponse<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubsonicResponse<T> {
    status: ResponseStatus,
    version: String,
    error: Option<ResponseError>,

    // Response body
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum ResponseStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseError {
    code: i32,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failed_response() {
        let body = br#"{"subsonic-response":{"status":"failed","version":"1.16.1","error":{"code":70,"message":"Album not found"}}}"#;
        match Client::parse_response::<()>(body) {
            Err(ClientError::SubsonicError { code, message }) => {
                assert_eq!(code, 70);
                assert_eq!(message.as_deref(), Some("Album not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_url_for_contains_auth_and_parameters() {
        let client = Client::new("http://music.local/", "alice", "secret", "starling");
        let url = client
            .url_for("download", &[("id", "al-1".to_string())])
            .unwrap();
        assert!(url.starts_with("http://music.local/rest/download?"));
        assert!(url.contains("u=alice"));
        assert!(url.contains("id=al-1"));
        assert!(url.contains("t="));
        assert!(!url.contains("secret"));
    }
}
