//! Multi-row selection: toggles, ranges and drag selection.

use crate::{Row, UniqueId};

/// The row under the pointer while dragging, with its position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseOver {
    /// The row under the pointer
    pub unique_id: UniqueId,
    /// Its index in the displayed list
    pub index: usize,
}

/// A range waiting to be applied by [`SelectionState::toggle_range`].
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAnchor {
    /// The row the range starts from
    pub origin: Row,
    /// The row the range extends to
    pub target: Row,
}

/// The multi-selection of one list.
///
/// Membership is keyed on [`UniqueId`], so two rows for the same item are
/// selected independently.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Vec<Row>,
    last_selected: Option<Row>,
    range: Option<RangeAnchor>,
    current_mouse_over: Option<MouseOver>,
    is_dragging: bool,
    is_select_dragging: bool,
}
impl SelectionState {
    /// The selected rows, in the order they were selected.
    pub fn selected(&self) -> &[Row] {
        &self.selected
    }

    /// Whether the row with `unique_id` is selected.
    pub fn is_selected(&self, unique_id: &UniqueId) -> bool {
        self.selected.iter().any(|r| &r.unique_id == unique_id)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// The row range operations start from.
    pub fn last_selected(&self) -> Option<&Row> {
        self.last_selected.as_ref()
    }

    /// The pending range, if any.
    pub fn range(&self) -> Option<&RangeAnchor> {
        self.range.as_ref()
    }

    /// The row under the pointer during a drag.
    pub fn current_mouse_over(&self) -> Option<&MouseOver> {
        self.current_mouse_over.as_ref()
    }

    /// Whether rows are being dragged.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether a drag is extending the selection.
    pub fn is_select_dragging(&self) -> bool {
        self.is_select_dragging
    }

    /// Whether `row` is the only selected row.
    pub fn is_sole_selection(&self, row: &Row) -> bool {
        self.selected.len() == 1 && self.selected[0].unique_id == row.unique_id
    }

    /// Deselect `row` if it is selected, otherwise select it and make it the
    /// origin of later range operations. Deselecting the origin hands that
    /// role back to the most recently selected row still selected.
    pub fn toggle(&mut self, row: &Row) {
        if let Some(pos) = self
            .selected
            .iter()
            .position(|r| r.unique_id == row.unique_id)
        {
            self.selected.remove(pos);
            if self
                .last_selected
                .as_ref()
                .is_some_and(|r| r.unique_id == row.unique_id)
            {
                self.last_selected = self.selected.last().cloned();
            }
        } else {
            self.selected.push(row.clone());
            self.last_selected = Some(row.clone());
        }
    }

    /// Record a pending range from the current origin to `row`. Without an
    /// origin the range covers `row` alone. The selection is not changed.
    pub fn set_range_anchor(&mut self, row: &Row) {
        let origin = self.last_selected.clone().unwrap_or_else(|| row.clone());
        self.range = Some(RangeAnchor {
            origin,
            target: row.clone(),
        });
    }

    /// Select every row between the pending range's origin and target, in the
    /// order given by `rows`, adding to the existing selection. Applying the
    /// same range again changes nothing.
    ///
    /// If the origin is not in `rows` (for example after a filter hid it), only
    /// the target is added.
    pub fn toggle_range(&mut self, rows: &[Row]) {
        let Some(range) = &self.range else {
            return;
        };
        let position = |id: &UniqueId| rows.iter().position(|r| &r.unique_id == id);
        let Some(target) = position(&range.target.unique_id) else {
            return;
        };
        let origin = position(&range.origin.unique_id).unwrap_or(target);
        let (start, end) = (origin.min(target), origin.max(target));

        for row in &rows[start..=end] {
            if !self.is_selected(&row.unique_id) {
                self.selected.push(row.clone());
            }
        }
    }

    /// Replace the selection with `row` alone.
    pub fn set_single(&mut self, row: &Row) {
        self.selected = vec![row.clone()];
        self.last_selected = Some(row.clone());
        self.range = None;
    }

    /// Select every row in `rows`; if they are all selected already, clear the
    /// selection instead.
    pub fn select_all(&mut self, rows: &[Row]) {
        let all_selected = !rows.is_empty()
            && rows.len() == self.selected.len()
            && rows.iter().all(|r| self.is_selected(&r.unique_id));
        if all_selected || rows.is_empty() {
            self.clear();
            return;
        }
        self.selected = rows.to_vec();
        self.range = None;
    }

    /// Deselect everything and end any drag.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_selected = None;
        self.range = None;
        self.current_mouse_over = None;
        self.is_dragging = false;
        self.is_select_dragging = false;
    }

    /// Start a drag that extends the selection, beginning by toggling `row`.
    pub fn begin_select_drag(&mut self, row: &Row) {
        self.is_select_dragging = true;
        self.toggle(row);
    }

    /// Record the row under the pointer during a drag.
    pub fn set_mouse_over(&mut self, mouse_over: Option<MouseOver>) {
        self.current_mouse_over = mouse_over;
    }

    /// Mark rows as being dragged, for reordering.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    /// End any drag, keeping the selection.
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
        self.is_select_dragging = false;
        self.current_mouse_over = None;
    }

    /// Apply `f` to every selected row with the given item ID, keeping the
    /// selection's copies in step with optimistic updates.
    pub fn update_rows(&mut self, id: &crate::ItemId, mut f: impl FnMut(&mut Row)) {
        for row in self.selected.iter_mut().filter(|r| r.id() == id) {
            f(row);
        }
        for row in self.last_selected.iter_mut().filter(|r| r.id() == id) {
            f(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Track, row::RowKind};

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Row::with_unique_id(
                    UniqueId::new(format!("u{i}")),
                    RowKind::Track(Track::new(format!("t{i}").as_str(), format!("Track {i}"))),
                )
            })
            .collect()
    }

    fn selected_ids(selection: &SelectionState) -> Vec<&str> {
        selection
            .selected()
            .iter()
            .map(|r| r.unique_id.0.as_str())
            .collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[1]);
        assert_eq!(selected_ids(&selection), ["u1"]);
        assert_eq!(selection.last_selected(), Some(&rows[1]));
        selection.toggle(&rows[1]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_deselecting_origin_moves_range_origin_back() {
        let rows = rows(6);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[1]);
        selection.toggle(&rows[4]);
        selection.toggle(&rows[4]);
        assert_eq!(selection.last_selected(), Some(&rows[1]));

        selection.set_range_anchor(&rows[3]);
        selection.toggle_range(&rows);
        assert_eq!(selected_ids(&selection), ["u1", "u2", "u3"]);

        selection.clear();
        selection.toggle(&rows[2]);
        selection.toggle(&rows[2]);
        assert_eq!(selection.last_selected(), None);
    }

    #[test]
    fn test_toggle_keys_on_unique_id_not_item_id() {
        let mut rows = rows(2);
        rows[1].kind = rows[0].kind.clone();
        let mut selection = SelectionState::default();
        selection.toggle(&rows[0]);
        selection.toggle(&rows[1]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_toggle_range_selects_contiguous_slice() {
        let rows = rows(6);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[4]);
        selection.set_range_anchor(&rows[1]);
        assert_eq!(selected_ids(&selection), ["u4"]);

        selection.toggle_range(&rows);
        let mut ids = selected_ids(&selection);
        ids.sort();
        assert_eq!(ids, ["u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_toggle_range_is_idempotent() {
        let rows = rows(5);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[0]);
        selection.set_range_anchor(&rows[3]);
        selection.toggle_range(&rows);
        let first = selected_ids(&selection)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        selection.set_range_anchor(&rows[3]);
        selection.toggle_range(&rows);
        assert_eq!(selected_ids(&selection), first);
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn test_toggle_range_merges_with_existing_selection() {
        let rows = rows(8);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[7]);
        selection.toggle(&rows[2]);
        selection.set_range_anchor(&rows[4]);
        selection.toggle_range(&rows);
        assert_eq!(selected_ids(&selection), ["u7", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_toggle_range_uses_display_order() {
        let rows = rows(4);
        let reversed: Vec<Row> = rows.iter().rev().cloned().collect();
        let mut selection = SelectionState::default();
        selection.toggle(&rows[3]);
        selection.set_range_anchor(&rows[2]);
        selection.toggle_range(&reversed);
        assert_eq!(selected_ids(&selection), ["u3", "u2"]);
    }

    #[test]
    fn test_range_without_origin_selects_target_only() {
        let rows = rows(4);
        let mut selection = SelectionState::default();
        selection.set_range_anchor(&rows[2]);
        selection.toggle_range(&rows);
        assert_eq!(selected_ids(&selection), ["u2"]);
    }

    #[test]
    fn test_select_all_toggles() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[0]);
        selection.select_all(&rows);
        assert_eq!(selection.len(), 3);
        selection.select_all(&rows);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_set_single_replaces() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        selection.select_all(&rows);
        selection.set_single(&rows[2]);
        assert_eq!(selected_ids(&selection), ["u2"]);
        assert!(selection.is_sole_selection(&rows[2]));
    }

    #[test]
    fn test_clear_resets_drag_flags() {
        let rows = rows(2);
        let mut selection = SelectionState::default();
        selection.begin_select_drag(&rows[0]);
        selection.set_mouse_over(Some(MouseOver {
            unique_id: rows[1].unique_id.clone(),
            index: 1,
        }));
        assert!(selection.is_select_dragging());
        selection.clear();
        assert!(!selection.is_select_dragging());
        assert!(selection.current_mouse_over().is_none());
        assert!(selection.last_selected().is_none());
    }
}
