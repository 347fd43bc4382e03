//! Tri-state column sorting, with one sort per list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{Row, column::ColumnKey};

/// A field of a [`Row`] that rows can be ordered by.
///
/// Columns resolve to fields through [`ColumnKey::sort_field`]; a column does not
/// necessarily sort by the value it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SortField {
    Title,
    AlbumArtist,
    Album,
    AlbumGenre,
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

/// The direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// The sort applied to one list.
///
/// Clicking a column header cycles ascending, descending, then back to the
/// list's natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// The column being sorted by; `None` keeps the natural order
    pub column: Option<ColumnKey>,
    /// The direction of the sort
    pub direction: SortDirection,
    toggle_count: u8,
}
impl SortSpec {
    /// A sort by `column` in `direction`.
    pub fn by(column: ColumnKey, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
            toggle_count: match direction {
                SortDirection::Ascending => 0,
                SortDirection::Descending => 1,
            },
        }
    }

    /// Whether the list keeps its natural order.
    pub fn is_natural(&self) -> bool {
        self.column.is_none()
    }

    /// Apply a header click on `column`.
    pub fn click(&mut self, column: ColumnKey) {
        if self.column != Some(column) {
            *self = Self::by(column, SortDirection::Ascending);
            return;
        }

        self.toggle_count += 1;
        if self.toggle_count >= 2 {
            *self = Self::default();
        } else {
            self.direction = SortDirection::Descending;
        }
    }

    /// The direction `column` is currently sorted in, if it is the sort column.
    pub fn direction_of(&self, column: ColumnKey) -> Option<SortDirection> {
        (self.column == Some(column)).then_some(self.direction)
    }
}

/// The list a [`SortSpec`] belongs to. Every context keeps its own spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortContext {
    /// A browsing page, keyed by name (such as `playlistList`)
    Page(SmolStr),
    /// The play queue
    PlayQueue,
    /// The currently open playlist
    Playlist,
}
impl SortContext {
    /// A page context.
    pub fn page(name: &str) -> Self {
        SortContext::Page(SmolStr::new(name))
    }
}

/// The sort specs of every list, created on first use.
#[derive(Debug, Clone, Default)]
pub struct SortRegistry {
    specs: HashMap<SortContext, SortSpec>,
}
impl SortRegistry {
    /// The spec for `context`; the natural order if it has never been sorted.
    pub fn get(&self, context: &SortContext) -> SortSpec {
        self.specs.get(context).cloned().unwrap_or_default()
    }

    /// Mutable access to the spec for `context`, creating it if needed.
    pub fn get_mut(&mut self, context: &SortContext) -> &mut SortSpec {
        self.specs.entry(context.clone()).or_default()
    }

    /// Apply a header click on `column` in `context`, returning the new spec.
    pub fn click(&mut self, context: &SortContext, column: ColumnKey) -> SortSpec {
        let spec = self.get_mut(context);
        spec.click(column);
        spec.clone()
    }
}

/// Order `rows` by `spec`, keeping the relative order of rows with equal keys.
///
/// Returns the rows unchanged when the spec is natural or its column is not
/// sortable.
pub fn sort_rows(rows: &[Row], spec: &SortSpec) -> Vec<Row> {
    let mut out = rows.to_vec();
    let Some(field) = spec.column.and_then(ColumnKey::sort_field) else {
        return out;
    };

    let mut keyed: Vec<_> = out.drain(..).map(|r| (r.sort_value(field), r)).collect();
    match spec.direction {
        SortDirection::Ascending => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Descending => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Track, UniqueId, row::RowKind};

    fn row(unique_id: &str, title: &str, year: Option<i32>) -> Row {
        Row::with_unique_id(
            UniqueId::new(unique_id),
            RowKind::Track(Track {
                year,
                ..Track::new(unique_id, title)
            }),
        )
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.unique_id.0.as_str()).collect()
    }

    #[test]
    fn test_click_cycles_through_three_states() {
        let mut spec = SortSpec::default();
        spec.click(ColumnKey::Title);
        assert_eq!(spec.column, Some(ColumnKey::Title));
        assert_eq!(spec.direction, SortDirection::Ascending);
        spec.click(ColumnKey::Title);
        assert_eq!(spec.direction, SortDirection::Descending);
        spec.click(ColumnKey::Title);
        assert!(spec.is_natural());
        assert_eq!(spec.direction, SortDirection::Ascending);
        spec.click(ColumnKey::Title);
        assert_eq!(spec, SortSpec::by(ColumnKey::Title, SortDirection::Ascending));
    }

    #[test]
    fn test_click_other_column_mid_cycle_restarts() {
        let mut spec = SortSpec::default();
        spec.click(ColumnKey::Title);
        spec.click(ColumnKey::Title);
        spec.click(ColumnKey::Year);
        assert_eq!(spec, SortSpec::by(ColumnKey::Year, SortDirection::Ascending));
        spec.click(ColumnKey::Year);
        assert_eq!(spec.direction, SortDirection::Descending);
    }

    #[test]
    fn test_title_sort_scenario() {
        let rows = vec![row("a1", "B", None), row("a2", "A", None)];
        let mut spec = SortSpec::default();

        spec.click(ColumnKey::Title);
        assert_eq!(ids(&sort_rows(&rows, &spec)), ["a2", "a1"]);
        spec.click(ColumnKey::Title);
        assert_eq!(ids(&sort_rows(&rows, &spec)), ["a1", "a2"]);
        spec.click(ColumnKey::Title);
        assert_eq!(ids(&sort_rows(&rows, &spec)), ["a1", "a2"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = vec![
            row("r1", "x", Some(2001)),
            row("r2", "y", Some(1999)),
            row("r3", "z", Some(2001)),
            row("r4", "w", Some(1999)),
        ];
        let asc = SortSpec::by(ColumnKey::Year, SortDirection::Ascending);
        let desc = SortSpec::by(ColumnKey::Year, SortDirection::Descending);

        assert_eq!(ids(&sort_rows(&rows, &asc)), ["r2", "r4", "r1", "r3"]);
        assert_eq!(ids(&sort_rows(&rows, &desc)), ["r1", "r3", "r2", "r4"]);
        let back = sort_rows(&sort_rows(&rows, &desc), &asc);
        assert_eq!(ids(&back), ["r2", "r4", "r1", "r3"]);
    }

    #[test]
    fn test_sort_is_case_insensitive_and_missing_values_first() {
        let rows = vec![
            row("r1", "beta", Some(3)),
            row("r2", "Alpha", None),
            row("r3", "alpha", Some(1)),
        ];
        let by_title = SortSpec::by(ColumnKey::Title, SortDirection::Ascending);
        assert_eq!(ids(&sort_rows(&rows, &by_title)), ["r2", "r3", "r1"]);

        let by_year = SortSpec::by(ColumnKey::Year, SortDirection::Ascending);
        assert_eq!(ids(&sort_rows(&rows, &by_year)), ["r2", "r3", "r1"]);
    }

    #[test]
    fn test_registry_contexts_are_independent() {
        let mut registry = SortRegistry::default();
        registry.click(&SortContext::PlayQueue, ColumnKey::Title);
        registry.click(&SortContext::page("albumList"), ColumnKey::Year);
        registry.click(&SortContext::page("albumList"), ColumnKey::Year);

        assert_eq!(
            registry.get(&SortContext::PlayQueue),
            SortSpec::by(ColumnKey::Title, SortDirection::Ascending)
        );
        assert_eq!(
            registry.get(&SortContext::page("albumList")).direction,
            SortDirection::Descending
        );
        assert!(registry.get(&SortContext::Playlist).is_natural());
    }
}
