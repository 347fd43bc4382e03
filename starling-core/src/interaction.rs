//! Pointer handling for list tables: drag selection, debounced modifier
//! clicks and double-click playback.
//!
//! Time is always passed in, so every transition can be driven from tests.
use std::time::{Duration, Instant};

use starling_state::{
    PlayFromHere, PlaybackFilter, Row, SelectionState, UniqueId, selection::MouseOver,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}
impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };

    pub fn any(self) -> bool {
        self.ctrl || self.shift
    }
}

#[derive(Debug, Clone)]
struct PendingClick {
    row: Row,
    modifiers: Modifiers,
    fires_at: Instant,
}

#[derive(Debug, Clone)]
struct PendingHover {
    row: Row,
    fires_at: Instant,
}

/// The timers of one table. At most one click and one hover are pending.
#[derive(Debug, Clone, Default)]
pub struct TableInteraction {
    pending_click: Option<PendingClick>,
    pending_hover: Option<PendingHover>,
}
impl TableInteraction {
    pub const CLICK_DELAY: Duration = Duration::from_millis(100);
    pub const HOVER_DELAY: Duration = Duration::from_millis(200);

    /// Primary button pressed on `row`. Modified presses are left to
    /// [`Self::click`].
    pub fn mouse_down(&mut self, selection: &mut SelectionState, row: &Row, modifiers: Modifiers) {
        if modifiers.any() {
            return;
        }
        if selection.is_sole_selection(row) {
            selection.clear();
        } else {
            if !selection.is_empty() {
                selection.clear();
            }
            selection.begin_select_drag(row);
        }
    }

    /// Primary button released. A hover still waiting on its delay is applied
    /// now against the displayed `rows`, so the release keeps the range.
    pub fn mouse_up(&mut self, selection: &mut SelectionState, rows: &[Row]) {
        if let Some(hover) = self.pending_hover.take() {
            selection.set_range_anchor(&hover.row);
            selection.toggle_range(rows);
        }
        selection.set_dragging(false);
        selection.end_drag();
    }

    /// The pointer moved onto `row`, at `index` in the displayed list.
    pub fn mouse_enter(
        &mut self,
        selection: &mut SelectionState,
        row: &Row,
        index: usize,
        now: Instant,
    ) {
        if !selection.is_select_dragging() && !selection.is_dragging() {
            return;
        }
        selection.set_mouse_over(Some(MouseOver {
            unique_id: row.unique_id.clone(),
            index,
        }));
        if selection.is_select_dragging() {
            self.pending_hover = Some(PendingHover {
                row: row.clone(),
                fires_at: now + Self::HOVER_DELAY,
            });
        }
    }

    /// A completed click. Only the first click of a burst is kept; the action
    /// runs from [`Self::poll`] once the delay has passed without a double
    /// click.
    pub fn click(&mut self, row: &Row, modifiers: Modifiers, now: Instant) {
        if self.pending_click.is_some() {
            return;
        }
        self.pending_click = Some(PendingClick {
            row: row.clone(),
            modifiers,
            fires_at: now + Self::CLICK_DELAY,
        });
    }

    /// A double click on `rows[index]`: drop the pending click, clear the
    /// selection and return what to play.
    pub fn double_click(
        &mut self,
        selection: &mut SelectionState,
        rows: &[Row],
        index: usize,
        filters: &[PlaybackFilter],
    ) -> Option<PlayFromHere> {
        self.pending_click = None;
        self.pending_hover = None;
        selection.clear();
        let row = rows.get(index)?;
        Some(PlayFromHere {
            rows: rows.to_vec(),
            index,
            unique_id: row.unique_id.clone(),
            id: row.id().clone(),
            filters: filters.to_vec(),
        })
    }

    /// Run any timers that have expired by `now` against the displayed `rows`.
    /// Returns whether the selection changed.
    pub fn poll(&mut self, selection: &mut SelectionState, rows: &[Row], now: Instant) -> bool {
        let mut changed = false;
        if let Some(click) = self.pending_click.take_if(|c| c.fires_at <= now) {
            if click.modifiers.ctrl {
                selection.toggle(&click.row);
                changed = true;
            } else if click.modifiers.shift {
                selection.set_range_anchor(&click.row);
                selection.toggle_range(rows);
                changed = true;
            }
        }
        if let Some(hover) = self.pending_hover.take_if(|h| h.fires_at <= now) {
            selection.set_range_anchor(&hover.row);
            selection.toggle_range(rows);
            changed = true;
        }
        changed
    }

    pub fn has_pending(&self) -> bool {
        self.pending_click.is_some() || self.pending_hover.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending_click = None;
        self.pending_hover = None;
    }
}

/// What a pointer did, after pairing presses with releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent<T> {
    Down(T),
    Up(T),
    Click(T),
    DoubleClick(T),
}

/// Terminals report only button transitions; this derives clicks and double
/// clicks from them. A release on the target that was pressed is a click, and
/// a second click on the same target within [`Self::DOUBLE_CLICK`] is a double
/// click.
#[derive(Debug, Clone)]
pub struct PointerTracker<T> {
    pressed: Option<T>,
    last_click: Option<(T, Instant)>,
}
impl<T> Default for PointerTracker<T> {
    fn default() -> Self {
        Self {
            pressed: None,
            last_click: None,
        }
    }
}
impl<T: Clone + PartialEq> PointerTracker<T> {
    pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

    pub fn down(&mut self, target: T) -> PointerEvent<T> {
        self.pressed = Some(target.clone());
        PointerEvent::Down(target)
    }

    /// Returns the release, followed by a click or double click if the release
    /// completes one.
    pub fn up(&mut self, target: T, now: Instant) -> Vec<PointerEvent<T>> {
        let mut events = vec![PointerEvent::Up(target.clone())];
        if self.pressed.take().as_ref() != Some(&target) {
            return events;
        }
        let is_double = self.last_click.as_ref().is_some_and(|(last, at)| {
            last == &target && now.saturating_duration_since(*at) <= Self::DOUBLE_CLICK
        });
        events.push(PointerEvent::Click(target.clone()));
        if is_double {
            self.last_click = None;
            events.push(PointerEvent::DoubleClick(target));
        } else {
            self.last_click = Some((target, now));
        }
        events
    }
}

/// Identifies a row by position and identity, for [`PointerTracker`].
pub type RowTarget = (usize, UniqueId);

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::Track;

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::track(Track::new(format!("t{i}"), format!("Track {i}"))))
            .collect()
    }

    fn selected_ids(selection: &SelectionState) -> Vec<&str> {
        selection.selected().iter().map(|r| r.id().0.as_str()).collect()
    }

    #[test]
    fn test_mouse_down_toggles_sole_selection() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();

        interaction.mouse_down(&mut selection, &rows[1], Modifiers::NONE);
        assert_eq!(selected_ids(&selection), ["t1"]);
        assert!(selection.is_select_dragging());
        interaction.mouse_up(&mut selection, &rows);
        assert!(!selection.is_select_dragging());

        interaction.mouse_down(&mut selection, &rows[1], Modifiers::NONE);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_mouse_down_on_other_row_replaces_selection() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[0]);
        selection.toggle(&rows[2]);
        let mut interaction = TableInteraction::default();

        interaction.mouse_down(&mut selection, &rows[1], Modifiers::NONE);
        assert_eq!(selected_ids(&selection), ["t1"]);

        interaction.mouse_down(&mut selection, &rows[0], Modifiers::CTRL);
        assert_eq!(selected_ids(&selection), ["t1"]);
    }

    #[test]
    fn test_ctrl_click_fires_after_delay() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();
        let start = Instant::now();

        interaction.click(&rows[2], Modifiers::CTRL, start);
        assert!(!interaction.poll(&mut selection, &rows, start + Duration::from_millis(50)));
        assert!(selection.is_empty());
        assert!(interaction.poll(&mut selection, &rows, start + Duration::from_millis(100)));
        assert_eq!(selected_ids(&selection), ["t2"]);
        assert!(!interaction.has_pending());
    }

    #[test]
    fn test_double_click_within_delay_only_plays() {
        let rows = rows(3);
        let mut selection = SelectionState::default();
        selection.toggle(&rows[0]);
        let mut interaction = TableInteraction::default();
        let start = Instant::now();

        interaction.click(&rows[1], Modifiers::CTRL, start);
        interaction.click(&rows[1], Modifiers::CTRL, start + Duration::from_millis(30));
        let play = interaction
            .double_click(&mut selection, &rows, 1, &[])
            .unwrap();
        assert_eq!(play.index, 1);
        assert_eq!(play.unique_id, rows[1].unique_id);

        assert!(!interaction.poll(&mut selection, &rows, start + Duration::from_secs(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_shift_click_selects_range_from_last_selected() {
        let rows = rows(5);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();
        let start = Instant::now();

        interaction.mouse_down(&mut selection, &rows[1], Modifiers::NONE);
        interaction.mouse_up(&mut selection, &rows);
        interaction.click(&rows[3], Modifiers::SHIFT, start);
        interaction.poll(&mut selection, &rows, start + TableInteraction::CLICK_DELAY);
        assert_eq!(selected_ids(&selection), ["t1", "t2", "t3"]);
    }

    #[test]
    fn test_drag_hover_is_debounced() {
        let rows = rows(5);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();
        let start = Instant::now();

        interaction.mouse_down(&mut selection, &rows[0], Modifiers::NONE);
        interaction.mouse_enter(&mut selection, &rows[1], 1, start);
        interaction.mouse_enter(&mut selection, &rows[3], 3, start + Duration::from_millis(100));
        assert_eq!(selection.current_mouse_over().map(|m| m.index), Some(3));

        interaction.poll(&mut selection, &rows, start + Duration::from_millis(250));
        assert_eq!(selected_ids(&selection), ["t0"]);
        interaction.poll(&mut selection, &rows, start + Duration::from_millis(300));
        assert_eq!(selected_ids(&selection), ["t0", "t1", "t2", "t3"]);
    }

    #[test]
    fn test_release_applies_pending_drag_range() {
        let rows = rows(5);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();
        let start = Instant::now();

        interaction.mouse_down(&mut selection, &rows[0], Modifiers::NONE);
        interaction.mouse_enter(&mut selection, &rows[3], 3, start);
        interaction.mouse_up(&mut selection, &rows);
        assert_eq!(selected_ids(&selection), ["t0", "t1", "t2", "t3"]);
        assert!(!selection.is_select_dragging());
        assert!(!interaction.has_pending());

        assert!(!interaction.poll(&mut selection, &rows, start + Duration::from_millis(500)));
        assert_eq!(selected_ids(&selection), ["t0", "t1", "t2", "t3"]);
    }

    #[test]
    fn test_hover_without_drag_does_nothing() {
        let rows = rows(2);
        let mut selection = SelectionState::default();
        let mut interaction = TableInteraction::default();
        interaction.mouse_enter(&mut selection, &rows[1], 1, Instant::now());
        assert!(!interaction.has_pending());
        assert!(selection.current_mouse_over().is_none());
    }

    #[test]
    fn test_pointer_tracker_double_click() {
        let mut tracker = PointerTracker::default();
        let start = Instant::now();

        tracker.down(1);
        assert_eq!(
            tracker.up(1, start),
            [PointerEvent::Up(1), PointerEvent::Click(1)]
        );
        tracker.down(1);
        assert_eq!(
            tracker.up(1, start + Duration::from_millis(200)),
            [
                PointerEvent::Up(1),
                PointerEvent::Click(1),
                PointerEvent::DoubleClick(1)
            ]
        );

        tracker.down(1);
        assert_eq!(tracker.up(2, start), [PointerEvent::Up(2)]);

        tracker.down(2);
        tracker.up(2, start);
        tracker.down(2);
        assert_eq!(
            tracker.up(2, start + Duration::from_secs(1)).len(),
            2,
            "too slow for a double click"
        );
    }
}
