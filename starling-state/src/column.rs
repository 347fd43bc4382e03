//! Column layouts for each kind of list, and the columns' sort fields.

use serde::{Deserialize, Serialize};

use crate::sort::SortField;

/// A column a table can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ColumnKey {
    Index,
    /// Title with the artist underneath
    CombinedTitle,
    Title,
    Artist,
    Album,
    Genre,
    Duration,
    Year,
    Track,
    Disc,
    BitRate,
    Size,
    Starred,
    UserRating,
    PlayCount,
    Created,
    Changed,
    SongCount,
    AlbumCount,
    Owner,
    Public,
    Comment,
    Path,
}
impl ColumnKey {
    /// The field rows are ordered by when this column is the sort column.
    ///
    /// The artist column sorts by album artist and the genre column by album
    /// genre, so that tracks stay grouped with their album.
    pub fn sort_field(self) -> Option<SortField> {
        use ColumnKey as C;
        Some(match self {
            C::Index => return None,
            C::CombinedTitle | C::Title => SortField::Title,
            C::Artist => SortField::AlbumArtist,
            C::Genre => SortField::AlbumGenre,
            C::Album => SortField::Album,
            C::Duration => SortField::Duration,
            C::Year => SortField::Year,
            C::Track => SortField::Track,
            C::Disc => SortField::Disc,
            C::BitRate => SortField::BitRate,
            C::Size => SortField::Size,
            C::Starred => SortField::Starred,
            C::UserRating => SortField::UserRating,
            C::PlayCount => SortField::PlayCount,
            C::Created => SortField::Created,
            C::Changed => SortField::Changed,
            C::SongCount => SortField::SongCount,
            C::AlbumCount => SortField::AlbumCount,
            C::Owner => SortField::Owner,
            C::Public => SortField::Public,
            C::Comment => SortField::Comment,
            C::Path => SortField::Path,
        })
    }

    /// The default header label.
    pub fn label(self) -> &'static str {
        use ColumnKey as C;
        match self {
            C::Index => "#",
            C::CombinedTitle | C::Title => "Title",
            C::Artist => "Artist",
            C::Album => "Album",
            C::Genre => "Genre",
            C::Duration => "Duration",
            C::Year => "Year",
            C::Track => "Track",
            C::Disc => "Disc",
            C::BitRate => "Bitrate",
            C::Size => "Size",
            C::Starred => "Fav",
            C::UserRating => "Rating",
            C::PlayCount => "Plays",
            C::Created => "Created",
            C::Changed => "Modified",
            C::SongCount => "Tracks",
            C::AlbumCount => "Albums",
            C::Owner => "Owner",
            C::Public => "Visibility",
            C::Comment => "Description",
            C::Path => "Path",
        }
    }

    /// Columns Jellyfin has no data for.
    pub fn unsupported_on_jellyfin(self) -> bool {
        matches!(
            self,
            ColumnKey::Changed | ColumnKey::Owner | ColumnKey::Public | ColumnKey::UserRating
        )
    }
}

/// The edge a column is pinned to while the table scrolls horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixedSide {
    /// Pinned to the left edge
    Left,
    /// Pinned to the right edge
    Right,
}

/// How a table column is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// What the column displays
    pub key: ColumnKey,
    /// The header label
    pub label: String,
    /// The width in cells
    pub width: u16,
    /// How much of the leftover width the column takes, relative to the others
    #[serde(default)]
    pub flex_grow: u16,
    /// Whether the user can resize the column
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Whether the column is pinned
    #[serde(default)]
    pub fixed: Option<FixedSide>,
    /// Whether clicking the header sorts by this column
    #[serde(default = "default_true")]
    pub sortable: bool,
}
fn default_true() -> bool {
    true
}
impl ColumnDescriptor {
    /// The smallest width a column can be resized to.
    pub const MIN_WIDTH: u16 = 3;

    /// A resizable column with the default label.
    pub fn new(key: ColumnKey, width: u16) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            width,
            flex_grow: 0,
            resizable: true,
            fixed: None,
            sortable: key.sort_field().is_some(),
        }
    }

    /// Make the column take a share of the leftover width.
    pub fn grow(mut self, flex_grow: u16) -> Self {
        self.flex_grow = flex_grow;
        self
    }

    /// Pin the column and prevent resizing.
    pub fn pinned(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self.resizable = false;
        self
    }
}

/// The kind of list a set of columns belongs to. Each kind has its own
/// persisted column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListType {
    /// Track lists: album tracks, similar songs
    Music,
    /// Album lists
    Album,
    /// Playlist entries
    Playlist,
    /// The list of playlists
    PlaylistList,
    /// Artist lists
    Artist,
    /// The compact play queue
    Mini,
}
impl ListType {
    /// The settings key the column layout is stored under.
    pub fn columns_key(self) -> &'static str {
        match self {
            ListType::Music => "musicListColumns",
            ListType::Album => "albumListColumns",
            ListType::Playlist => "playlistListColumns",
            ListType::PlaylistList => "playlistListListColumns",
            ListType::Artist => "artistListColumns",
            ListType::Mini => "miniListColumns",
        }
    }
}

/// The default column layout of a list type.
pub fn default_columns(list_type: ListType) -> Vec<ColumnDescriptor> {
    use ColumnKey as C;
    let index = ColumnDescriptor::new(C::Index, 4).pinned(FixedSide::Left);
    match list_type {
        ListType::Music | ListType::Playlist => vec![
            index,
            ColumnDescriptor::new(C::CombinedTitle, 30).grow(2),
            ColumnDescriptor::new(C::Album, 20).grow(1),
            ColumnDescriptor::new(C::Duration, 8),
            ColumnDescriptor::new(C::Genre, 12),
            ColumnDescriptor::new(C::BitRate, 9),
            ColumnDescriptor::new(C::Starred, 4),
            ColumnDescriptor::new(C::UserRating, 7),
        ],
        ListType::Album => vec![
            index,
            ColumnDescriptor::new(C::Title, 30).grow(2),
            ColumnDescriptor::new(C::Artist, 20).grow(1),
            ColumnDescriptor::new(C::Year, 6),
            ColumnDescriptor::new(C::SongCount, 7),
            ColumnDescriptor::new(C::Duration, 8),
            ColumnDescriptor::new(C::Starred, 4),
        ],
        ListType::PlaylistList => vec![
            index,
            ColumnDescriptor::new(C::Title, 30).grow(2),
            ColumnDescriptor::new(C::SongCount, 7),
            ColumnDescriptor::new(C::Duration, 8),
            ColumnDescriptor::new(C::Owner, 12),
            ColumnDescriptor::new(C::Public, 10),
            ColumnDescriptor::new(C::Changed, 12),
        ],
        ListType::Artist => vec![
            index,
            ColumnDescriptor::new(C::Title, 30).grow(2),
            ColumnDescriptor::new(C::AlbumCount, 7),
            ColumnDescriptor::new(C::Starred, 4),
            ColumnDescriptor::new(C::UserRating, 7),
        ],
        ListType::Mini => vec![
            index,
            ColumnDescriptor::new(C::Title, 24).grow(2),
            ColumnDescriptor::new(C::Artist, 16).grow(1),
            ColumnDescriptor::new(C::Duration, 8),
        ],
    }
}

/// Set the width of the column `key`, returning whether anything changed.
/// Columns that are not resizable keep their width.
pub fn resize_column(columns: &mut [ColumnDescriptor], key: ColumnKey, width: u16) -> bool {
    let Some(column) = columns.iter_mut().find(|c| c.key == key && c.resizable) else {
        return false;
    };
    let width = width.max(ColumnDescriptor::MIN_WIDTH);
    if column.width == width {
        return false;
    }
    column.width = width;
    true
}

/// Lay out `columns` across `total` cells: every column gets its width, then
/// leftover cells are shared between growing columns by their `flex_grow`.
pub fn layout_widths(columns: &[ColumnDescriptor], total: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = columns.iter().map(|c| c.width).collect();
    let used: u16 = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
    let total_grow: u32 = columns.iter().map(|c| c.flex_grow as u32).sum();
    if used >= total || total_grow == 0 {
        return widths;
    }

    let leftover = (total - used) as u32;
    let mut given = 0u32;
    for (width, column) in widths.iter_mut().zip(columns) {
        let share = leftover * column.flex_grow as u32 / total_grow;
        *width += share as u16;
        given += share;
    }
    // Rounding remainder goes to the first growing column.
    if let Some((width, _)) = widths
        .iter_mut()
        .zip(columns)
        .find(|(_, c)| c.flex_grow > 0)
    {
        *width += (leftover - given) as u16;
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_lookup_table() {
        assert_eq!(ColumnKey::CombinedTitle.sort_field(), Some(SortField::Title));
        assert_eq!(ColumnKey::Artist.sort_field(), Some(SortField::AlbumArtist));
        assert_eq!(ColumnKey::Genre.sort_field(), Some(SortField::AlbumGenre));
        assert_eq!(ColumnKey::Year.sort_field(), Some(SortField::Year));
        assert_eq!(ColumnKey::Index.sort_field(), None);
        assert!(!ColumnDescriptor::new(ColumnKey::Index, 4).sortable);
    }

    #[test]
    fn test_resize_column_clamps_and_skips_pinned() {
        let mut columns = default_columns(ListType::Music);
        assert!(resize_column(&mut columns, ColumnKey::Album, 1));
        let album = columns.iter().find(|c| c.key == ColumnKey::Album).unwrap();
        assert_eq!(album.width, ColumnDescriptor::MIN_WIDTH);

        assert!(!resize_column(&mut columns, ColumnKey::Index, 10));
        assert!(!resize_column(&mut columns, ColumnKey::Path, 10));
    }

    #[test]
    fn test_layout_widths_distributes_leftover() {
        let columns = vec![
            ColumnDescriptor::new(ColumnKey::Index, 4),
            ColumnDescriptor::new(ColumnKey::Title, 10).grow(2),
            ColumnDescriptor::new(ColumnKey::Album, 10).grow(1),
        ];
        let widths = layout_widths(&columns, 35);
        assert_eq!(widths, vec![4, 18, 13]);
        assert_eq!(widths.iter().sum::<u16>(), 35);

        assert_eq!(layout_widths(&columns, 10), vec![4, 10, 10]);
    }
}
