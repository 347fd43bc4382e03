//! Locally persisted view settings: column layouts, view types and scroll
//! positions.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use starling_state::{ColumnDescriptor, ListType, column::default_columns};

use crate::config::save_toml;

/// Whether a browsing page shows a table or a grid of cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    List,
    Grid,
}
impl ViewType {
    pub fn toggled(self) -> Self {
        match self {
            ViewType::List => ViewType::Grid,
            ViewType::Grid => ViewType::List,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewType::List => "list",
            ViewType::Grid => "grid",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub columns: BTreeMap<String, Vec<ColumnDescriptor>>,
    /// Terminal lines per row, keyed like `columns`.
    pub row_heights: BTreeMap<String, u16>,
    pub view_types: BTreeMap<String, ViewType>,
}

/// A TOML-backed value that is saved whenever it changes. Without a path it
/// lives only in memory.
#[derive(Debug)]
struct TomlFile<T> {
    path: Option<String>,
    value: T,
}
impl<T: Default + Serialize + DeserializeOwned> TomlFile<T> {
    fn load(path: &str) -> Self {
        let value = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable {path}: {e}");
                T::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
            Err(e) => {
                tracing::warn!("failed to read {path}: {e}");
                T::default()
            }
        };
        Self {
            path: Some(path.to_string()),
            value,
        }
    }

    fn in_memory() -> Self {
        Self {
            path: None,
            value: T::default(),
        }
    }

    fn save(&self) {
        if let Some(path) = &self.path {
            save_toml(path, &self.value);
        }
    }
}

#[derive(Debug)]
pub struct SettingsStore {
    file: TomlFile<Settings>,
}
impl SettingsStore {
    pub const FILENAME: &str = "settings.toml";

    pub fn load() -> Self {
        Self {
            file: TomlFile::load(Self::FILENAME),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            file: TomlFile::in_memory(),
        }
    }

    /// The column layout of a list type, falling back to its default.
    pub fn columns(&self, list_type: ListType) -> Vec<ColumnDescriptor> {
        self.file
            .value
            .columns
            .get(list_type.columns_key())
            .cloned()
            .unwrap_or_else(|| default_columns(list_type))
    }

    pub fn set_columns(&mut self, list_type: ListType, columns: Vec<ColumnDescriptor>) {
        self.file
            .value
            .columns
            .insert(list_type.columns_key().to_string(), columns);
        self.file.save();
    }

    pub fn row_height(&self, list_type: ListType) -> u16 {
        self.file
            .value
            .row_heights
            .get(list_type.columns_key())
            .copied()
            .unwrap_or(1)
            .clamp(1, 2)
    }

    pub fn set_row_height(&mut self, list_type: ListType, height: u16) {
        self.file
            .value
            .row_heights
            .insert(list_type.columns_key().to_string(), height.clamp(1, 2));
        self.file.save();
    }

    pub fn view_type(&self, page: &str) -> ViewType {
        self.file
            .value
            .view_types
            .get(page)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_view_type(&mut self, page: &str, view_type: ViewType) {
        self.file
            .value
            .view_types
            .insert(page.to_string(), view_type);
        self.file.save();
    }
}

/// Saved scroll offsets, keyed like `scroll_list_albumList`. Written on exit.
#[derive(Debug)]
pub struct ScrollStore {
    file: TomlFile<BTreeMap<String, usize>>,
}
impl ScrollStore {
    pub const FILENAME: &str = "scroll.toml";

    pub fn load() -> Self {
        Self {
            file: TomlFile::load(Self::FILENAME),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            file: TomlFile::in_memory(),
        }
    }

    /// The key a page's scroll offset is stored under for a view type.
    pub fn key(view_type: ViewType, page: &str) -> String {
        format!("scroll_{}_{page}", view_type.as_str())
    }

    pub fn get(&self, key: &str) -> usize {
        self.file.value.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: impl Into<String>, offset: usize) {
        self.file.value.insert(key.into(), offset);
    }

    /// Reset the offsets of a page in both view types.
    pub fn reset_page(&mut self, page: &str) {
        for view_type in [ViewType::List, ViewType::Grid] {
            self.set(Self::key(view_type, page), 0);
        }
    }

    pub fn save(&self) {
        self.file.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::{ColumnKey, column::resize_column};

    #[test]
    fn test_columns_fall_back_to_defaults() {
        let mut settings = SettingsStore::in_memory();
        assert_eq!(
            settings.columns(ListType::Music),
            default_columns(ListType::Music)
        );

        let mut columns = settings.columns(ListType::Music);
        resize_column(&mut columns, ColumnKey::Album, 33);
        settings.set_columns(ListType::Music, columns.clone());
        assert_eq!(settings.columns(ListType::Music), columns);
        assert_eq!(settings.columns(ListType::Mini), default_columns(ListType::Mini));
    }

    #[test]
    fn test_row_height_is_clamped() {
        let mut settings = SettingsStore::in_memory();
        assert_eq!(settings.row_height(ListType::Album), 1);
        settings.set_row_height(ListType::Album, 7);
        assert_eq!(settings.row_height(ListType::Album), 2);
        assert_eq!(settings.row_height(ListType::Playlist), 1);
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(
            ScrollStore::key(ViewType::Grid, "playlistList"),
            "scroll_grid_playlistList"
        );
        let mut scroll = ScrollStore::in_memory();
        scroll.set("scroll_list_albumList", 40);
        scroll.set("scroll_grid_albumList", 12);
        scroll.reset_page("albumList");
        assert_eq!(scroll.get("scroll_list_albumList"), 0);
        assert_eq!(scroll.get("scroll_grid_albumList"), 0);
    }
}
