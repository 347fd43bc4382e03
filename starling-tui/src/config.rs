use serde::{Deserialize, Serialize};
use starling_core::config::{Playback, Server, load_config, save_toml};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub server: Server,
    pub playback: Playback,
}
impl Config {
    pub const FILENAME: &str = "tui-config.toml";

    pub fn load() -> Self {
        load_config(Self::FILENAME)
    }

    /// Written on exit so that first runs leave an editable file behind.
    pub fn save(&self) {
        save_toml(Self::FILENAME, self);
        tracing::info!("saved config to {}", Self::FILENAME);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    pub tick_rate_ms: u64,
}
impl Default for General {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_core::config::ServerType;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            server_type = "jellyfin"
            base_url = "https://music.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.tick_rate_ms, 50);
        assert_eq!(config.server.server_type, ServerType::Jellyfin);
        assert!(config.playback.filters.is_empty());
    }
}
