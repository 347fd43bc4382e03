//! The play queue, in storage order and in display order.

use crate::{
    ItemId, Row, UniqueId,
    filter::{FilteredEntries, PlaybackFilter, compile_filters, is_filtered},
    sort::{SortSpec, sort_rows},
};

/// Whether the player is producing sound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Playing the current entry
    Playing,
    /// Paused on the current entry
    Paused,
    /// Nothing loaded
    #[default]
    Stopped,
}

/// Where appended entries go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendPosition {
    /// Directly after the current entry
    Next,
    /// At the end of the queue
    Later,
}

/// A request to replace the queue with a list and start playing one of its rows,
/// produced by double-clicking a row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayFromHere {
    /// The rows of the list, in displayed order
    pub rows: Vec<Row>,
    /// The index of the clicked row in `rows`
    pub index: usize,
    /// The unique ID of the clicked row
    pub unique_id: UniqueId,
    /// The item ID of the clicked row
    pub id: ItemId,
    /// The playback filters to apply
    pub filters: Vec<PlaybackFilter>,
}

/// The play queue: entries in storage order, plus a sorted projection for
/// display. The current entry is tracked by unique ID so that it survives
/// re-sorting.
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    entries: Vec<Row>,
    sorted_entries: Vec<Row>,
    sort: SortSpec,
    current: Option<UniqueId>,
    status: PlayerStatus,
}
impl PlayQueue {
    /// The entries in storage order.
    pub fn entries(&self) -> &[Row] {
        &self.entries
    }

    /// The entries in displayed order.
    pub fn display_entries(&self) -> &[Row] {
        if self.sort.is_natural() {
            &self.entries
        } else {
            &self.sorted_entries
        }
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The sort applied to the displayed entries.
    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    /// The player status.
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Set the player status.
    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    /// The current entry.
    pub fn current(&self) -> Option<&Row> {
        let current = self.current.as_ref()?;
        self.entries.iter().find(|r| &r.unique_id == current)
    }

    /// The unique ID of the current entry.
    pub fn current_unique_id(&self) -> Option<&UniqueId> {
        self.current.as_ref()
    }

    /// The index of the current entry in displayed order.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.display_entries()
            .iter()
            .position(|r| &r.unique_id == current)
    }

    /// Replace the queue, making the first entry current.
    pub fn set(&mut self, entries: Vec<Row>) {
        self.entries = restamp(entries);
        self.current = self.entries.first().map(|r| r.unique_id.clone());
        self.resort();
    }

    /// Append entries after the current entry or at the end.
    pub fn append(&mut self, entries: Vec<Row>, position: AppendPosition) {
        let entries = restamp(entries);
        let insert_at = match position {
            AppendPosition::Later => self.entries.len(),
            AppendPosition::Next => self
                .current
                .as_ref()
                .and_then(|c| self.entries.iter().position(|r| &r.unique_id == c))
                .map_or(self.entries.len(), |i| i + 1),
        };
        let tail = self.entries.split_off(insert_at);
        self.entries.extend(entries);
        self.entries.extend(tail);
        if self.current.is_none() {
            self.current = self.entries.first().map(|r| r.unique_id.clone());
        }
        self.resort();
    }

    /// Replace the queue with the rows of a list and start playing the clicked
    /// row. The clicked row is kept even if a filter matches it.
    pub fn set_by_row_click(&mut self, play: &PlayFromHere) -> FilteredEntries {
        let compiled = compile_filters(&play.filters);
        let mut original = 0;
        let mut entries = vec![];
        let mut clicked = None;
        for (i, row) in play.rows.iter().enumerate() {
            if row.as_track().is_none() {
                continue;
            }
            original += 1;
            let is_clicked = i == play.index && row.unique_id == play.unique_id;
            if !is_clicked && is_filtered(&compiled, row) {
                continue;
            }
            if is_clicked {
                clicked = Some(entries.len());
            }
            entries.push(row.clone());
        }

        self.entries = restamp(entries);
        self.current = clicked
            .or_else(|| self.entries.iter().position(|r| r.id() == &play.id))
            .and_then(|i| self.entries.get(i))
            .map(|r| r.unique_id.clone());
        self.status = PlayerStatus::Playing;
        self.resort();

        FilteredEntries {
            filtered: original - self.entries.len(),
            original,
            entries: self.entries.clone(),
        }
    }

    /// Empty the queue.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sorted_entries.clear();
        self.current = None;
    }

    /// Sort the displayed entries; the natural order restores storage order.
    pub fn sort(&mut self, spec: SortSpec) {
        self.sort = spec;
        self.resort();
    }

    /// Make the entry with `unique_id` current.
    pub fn set_current(&mut self, unique_id: &UniqueId) -> bool {
        if self.entries.iter().any(|r| &r.unique_id == unique_id) {
            self.current = Some(unique_id.clone());
            true
        } else {
            false
        }
    }

    /// Move the current entry by `offset` in displayed order, stopping at the ends.
    pub fn advance(&mut self, offset: isize) -> Option<&Row> {
        let index = self.current_index()?;
        let next = index.checked_add_signed(offset)?;
        let unique_id = self.display_entries().get(next)?.unique_id.clone();
        self.current = Some(unique_id);
        self.current()
    }

    /// Set the starred flag of every entry for the given items.
    pub fn set_star(&mut self, ids: &[ItemId], starred: bool) {
        self.update_rows(ids, |r| r.set_starred(starred));
    }

    /// Set the user rating of every entry for the given items.
    pub fn set_rating(&mut self, ids: &[ItemId], rating: u8) {
        self.update_rows(ids, |r| r.set_user_rating(rating));
    }

    /// Apply `f` to every entry whose item is one of `ids`.
    pub fn update_rows(&mut self, ids: &[ItemId], mut f: impl FnMut(&mut Row)) {
        for row in self
            .entries
            .iter_mut()
            .chain(self.sorted_entries.iter_mut())
            .filter(|r| ids.contains(r.id()))
        {
            f(row);
        }
    }

    fn resort(&mut self) {
        self.sorted_entries = if self.sort.is_natural() {
            vec![]
        } else {
            sort_rows(&self.entries, &self.sort)
        };
    }
}

fn restamp(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|r| Row::new(r.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Track, column::ColumnKey, sort::SortDirection};

    fn tracks(titles: &[&str]) -> Vec<Row> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Row::track(Track::new(format!("t{i}"), *t)))
            .collect()
    }

    fn titles(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(Row::title).collect()
    }

    #[test]
    fn test_set_by_row_click_keeps_clicked_row_despite_filter() {
        let rows = tracks(&["Intro", "Live One", "Live Two", "Outro"]);
        let play = PlayFromHere {
            unique_id: rows[2].unique_id.clone(),
            id: rows[2].id().clone(),
            index: 2,
            rows,
            filters: vec![PlaybackFilter::new("live")],
        };
        let mut queue = PlayQueue::default();
        let result = queue.set_by_row_click(&play);

        assert_eq!(titles(queue.entries()), ["Intro", "Live Two", "Outro"]);
        assert_eq!(result.filtered, 1);
        assert_eq!(queue.current().map(Row::title), Some("Live Two"));
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.status(), PlayerStatus::Playing);
        assert_ne!(queue.current_unique_id(), Some(&play.unique_id));
    }

    #[test]
    fn test_append_next_inserts_after_current() {
        let mut queue = PlayQueue::default();
        queue.set(tracks(&["A", "B", "C"]));
        queue.advance(1);
        queue.append(tracks(&["X", "Y"]), AppendPosition::Next);
        assert_eq!(titles(queue.entries()), ["A", "B", "X", "Y", "C"]);
        queue.append(tracks(&["Z"]), AppendPosition::Later);
        assert_eq!(titles(queue.entries()), ["A", "B", "X", "Y", "C", "Z"]);
        assert_eq!(queue.current().map(Row::title), Some("B"));
    }

    #[test]
    fn test_current_survives_sorting() {
        let mut queue = PlayQueue::default();
        queue.set(tracks(&["c", "a", "b"]));
        assert_eq!(queue.current_index(), Some(0));

        queue.sort(SortSpec::by(ColumnKey::Title, SortDirection::Ascending));
        assert_eq!(titles(queue.display_entries()), ["a", "b", "c"]);
        assert_eq!(queue.current().map(Row::title), Some("c"));
        assert_eq!(queue.current_index(), Some(2));

        queue.sort(SortSpec::default());
        assert_eq!(titles(queue.display_entries()), ["c", "a", "b"]);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn test_set_star_updates_every_copy() {
        let mut queue = PlayQueue::default();
        let mut rows = tracks(&["A", "B"]);
        rows.push(rows[0].clone());
        queue.set(rows);
        queue.sort(SortSpec::by(ColumnKey::Title, SortDirection::Descending));
        queue.set_star(&[ItemId::from("t0")], true);
        assert_eq!(queue.entries().iter().filter(|r| r.starred()).count(), 2);
        assert_eq!(
            queue.display_entries().iter().filter(|r| r.starred()).count(),
            2
        );
    }

    #[test]
    fn test_advance_stops_at_the_ends() {
        let mut queue = PlayQueue::default();
        queue.set(tracks(&["A", "B"]));
        assert!(queue.advance(-1).is_none());
        assert_eq!(queue.advance(1).map(Row::title), Some("B"));
        assert!(queue.advance(1).is_none());
        assert_eq!(queue.current().map(Row::title), Some("B"));
    }
}
