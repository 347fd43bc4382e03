//! Configuration shared by every front-end: which server to talk to and how to
//! filter playback.
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use starling_state::PlaybackFilter;

/// Load a TOML config file, returning `T::default()` if the file doesn't exist.
/// Panics on parse errors or unexpected I/O errors.
pub fn load_config<T: Default + DeserializeOwned>(filename: &str) -> T {
    match std::fs::read_to_string(filename) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => panic!("Failed to parse {filename}: {e}"),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no config file found, creating default config");
            T::default()
        }
        Err(e) => panic!("Failed to read {filename}: {e}"),
    }
}

/// Write a TOML file, logging instead of failing.
pub fn save_toml<T: Serialize>(filename: &str, value: &T) {
    let contents = match toml::to_string(value) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("failed to serialize {filename}: {e}");
            return;
        }
    };
    match std::fs::write(filename, contents) {
        Ok(()) => tracing::debug!("saved {filename}"),
        Err(e) => tracing::warn!("failed to write {filename}: {e}"),
    }
}

/// The API family the server speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Subsonic and compatible servers: Navidrome, Airsonic, Gonic
    #[default]
    Subsonic,
    Jellyfin,
}
impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerType::Subsonic => write!(f, "Subsonic"),
            ServerType::Jellyfin => write!(f, "Jellyfin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Server {
    pub server_type: ServerType,
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Identifies this installation to Jellyfin; generated on first run.
    pub device_id: String,
}
impl Default for Server {
    fn default() -> Self {
        Self {
            server_type: ServerType::Subsonic,
            base_url: "http://localhost:4533".to_string(),
            username: "YOUR_USERNAME".to_string(),
            password: "YOUR_PASSWORD".to_string(),
            device_id: generate_device_id(),
        }
    }
}

fn generate_device_id() -> String {
    format!("starling-{:016x}", rand::random::<u64>())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Playback {
    pub filters: Vec<PlaybackFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults_missing_fields() {
        let server: Server = toml::from_str(
            r#"
            server_type = "jellyfin"
            base_url = "https://jf.example"
            "#,
        )
        .unwrap();
        assert_eq!(server.server_type, ServerType::Jellyfin);
        assert_eq!(server.username, "YOUR_USERNAME");
        assert!(server.device_id.starts_with("starling-"));
    }

    #[test]
    fn test_playback_filters_parse() {
        let playback: Playback = toml::from_str(
            r#"
            [[filters]]
            filter = "(live)"

            [[filters]]
            filter = "demo"
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(playback.filters.len(), 2);
        assert!(playback.filters[0].enabled);
        assert!(!playback.filters[1].enabled);
    }
}
