use serde::{Deserialize, Serialize};

#[derive(Debug)]
/// An error that can occur when interacting with the client.
pub enum ClientError {
    /// An error that occurred when making a request.
    ReqwestError(reqwest::Error),
    /// An error that occurred when deserializing a response.
    DeserializationError(serde_json::Error),
    /// The configured base URL could not be turned into a request URL.
    InvalidUrl(String),
    /// The server answered with a non-success status.
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        body: String,
    },
}
impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ReqwestError(e) => write!(f, "Reqwest error: {e}"),
            ClientError::DeserializationError(e) => write!(f, "Deserialization error: {e}"),
            ClientError::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            ClientError::HttpStatus { status, body } => {
                write!(f, "Jellyfin error: HTTP {status}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
        }
    }
}
impl std::error::Error for ClientError {}
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::ReqwestError(e)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DeserializationError(e)
    }
}
/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// An authenticated client for the Jellyfin API.
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) user_id: String,
    pub(crate) access_token: String,
    pub(crate) device_id: String,
    pub(crate) client: reqwest::Client,
}
impl Client {
    /// The client name reported to the server.
    pub const CLIENT_NAME: &str = "starling";
    /// The client version reported to the server.
    pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Authenticate against the server with a username and password.
    pub async fn authenticate(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        device_id: impl Into<String>,
    ) -> ClientResult<Self> {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let device_id = device_id.into();
        let client = reqwest::Client::new();

        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct AuthenticateByName {
            username: String,
            pw: String,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct AuthenticatedUser {
            id: String,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct AuthenticationResult {
            user: AuthenticatedUser,
            access_token: String,
        }

        let response = client
            .post(format!("{base_url}/Users/AuthenticateByName"))
            .header(
                "X-Emby-Authorization",
                authorization_header(&device_id, None),
            )
            .json(&AuthenticateByName {
                username: username.into(),
                pw: password.into(),
            })
            .send()
            .await?;
        let bytes = Self::check_status(response).await?;
        let result: AuthenticationResult = serde_json::from_slice(&bytes)?;

        Ok(Self {
            base_url,
            user_id: result.user.id,
            access_token: result.access_token,
            device_id,
            client,
        })
    }

    /// Create a client from a previously obtained access token.
    pub fn with_token(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        access_token: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            access_token: access_token.into(),
            device_id: device_id.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The ID of the authenticated user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The base URL of the server, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub(crate) fn authorization_header(device_id: &str, token: Option<&str>) -> String {
    let mut header = format!(
        r#"MediaBrowser Client="{}", Device="{}", DeviceId="{device_id}", Version="{}""#,
        Client::CLIENT_NAME,
        Client::CLIENT_NAME,
        Client::CLIENT_VERSION,
    );
    if let Some(token) = token {
        header.push_str(&format!(r#", Token="{token}""#));
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_includes_token() {
        let header = authorization_header("dev-1", Some("abc"));
        assert!(header.starts_with("MediaBrowser Client=\"starling\""));
        assert!(header.contains("DeviceId=\"dev-1\""));
        assert!(header.ends_with("Token=\"abc\""));
    }

    #[test]
    fn test_with_token_trims_trailing_slash() {
        let client = Client::with_token("https://jf.local/", "u1", "t1", "d1");
        assert_eq!(client.base_url(), "https://jf.local");
        assert_eq!(client.user_id(), "u1");
    }
}
