use std::time::Instant;

use starling_state::{
    ColumnDescriptor, ColumnKey, ListType, PlayFromHere, Row, SortContext, SortSpec, UniqueId,
    column::resize_column,
    play_queue::AppendPosition,
    sort::sort_rows,
};

use crate::{
    app_state::AppState,
    command::Command,
    config::ServerType,
    interaction::{Modifiers, PointerEvent, PointerTracker, RowTarget, TableInteraction},
    search::filter_rows,
    view::actions,
};

/// How a row should be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowFlags {
    pub selected: bool,
    /// The row is the track being played.
    pub playing: bool,
    /// The pointer is over this row during a drag.
    pub drag_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    Play,
    AddNext,
    AddLater,
    AddToFavorites,
    RemoveFromFavorites,
    SetRating,
    SelectAll,
    ClearSelection,
}
impl ContextMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            ContextMenuItem::Play => "Play",
            ContextMenuItem::AddNext => "Add to queue (next)",
            ContextMenuItem::AddLater => "Add to queue (later)",
            ContextMenuItem::AddToFavorites => "Add to favorites",
            ContextMenuItem::RemoveFromFavorites => "Remove from favorites",
            ContextMenuItem::SetRating => "Set rating",
            ContextMenuItem::SelectAll => "Select all",
            ContextMenuItem::ClearSelection => "Clear selection",
        }
    }
}

/// An open context menu, positioned in cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub x: u16,
    pub y: u16,
    pub items: Vec<ContextMenuItem>,
}
impl ContextMenu {
    pub const WIDTH: u16 = 26;

    /// Items plus a border line on each side.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 + 2
    }
}

/// Place a `width` by `height` menu at the pointer, flipping it left or up
/// when it would run past the edge of the viewport.
pub fn place_menu(pointer: (u16, u16), size: (u16, u16), viewport: (u16, u16)) -> (u16, u16) {
    let (x, y) = pointer;
    let (width, height) = size;
    let (viewport_width, viewport_height) = viewport;
    let x = if x.saturating_add(width) > viewport_width {
        x.saturating_sub(width)
    } else {
        x
    };
    let y = if y.saturating_add(height) > viewport_height {
        y.saturating_sub(height)
    } else {
        y
    };
    (x, y)
}

/// A sortable, selectable track table bound to the shared selection.
#[derive(Debug, Clone)]
pub struct ListViewTable {
    pub list_type: ListType,
    pub sort_context: SortContext,
    pub interaction: TableInteraction,
    pointer: PointerTracker<RowTarget>,
    pub context_menu: Option<ContextMenu>,
    /// Menu items this table never offers.
    pub disabled_items: Vec<ContextMenuItem>,
    /// Whether header clicks sort the table.
    pub sortable: bool,
}
impl ListViewTable {
    pub fn new(list_type: ListType, sort_context: SortContext) -> Self {
        Self {
            list_type,
            sort_context,
            interaction: TableInteraction::default(),
            pointer: PointerTracker::default(),
            context_menu: None,
            disabled_items: vec![],
            sortable: true,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_disabled_items(mut self, items: impl IntoIterator<Item = ContextMenuItem>) -> Self {
        self.disabled_items.extend(items);
        self
    }

    /// The persisted column layout, without columns the server can't fill.
    pub fn columns(&self, state: &AppState) -> Vec<ColumnDescriptor> {
        let mut columns = state.settings.columns(self.list_type);
        if state.server_type == ServerType::Jellyfin {
            columns.retain(|c| !c.key.unsupported_on_jellyfin());
        }
        columns
    }

    pub fn sort_spec(&self, state: &AppState) -> SortSpec {
        match self.sort_context {
            SortContext::PlayQueue => state.play_queue.sort_spec().clone(),
            _ => state.sorts.get(&self.sort_context),
        }
    }

    /// `rows` as displayed: searched, then sorted. The play queue keeps its
    /// own sorted projection, so its rows are only searched.
    pub fn display_rows(&self, state: &AppState, rows: &[Row]) -> Vec<Row> {
        let rows = filter_rows(rows, &state.search_query);
        match self.sort_context {
            SortContext::PlayQueue => rows,
            _ => {
                let spec = state.sorts.get(&self.sort_context);
                if spec.is_natural() {
                    rows
                } else {
                    sort_rows(&rows, &spec)
                }
            }
        }
    }

    /// Cycle the sort of `column`. Returns whether anything changed.
    pub fn header_click(&mut self, state: &mut AppState, column: ColumnKey) -> bool {
        let sortable = self.sortable
            && self
                .columns(state)
                .iter()
                .any(|c| c.key == column && c.sortable);
        if !sortable {
            return false;
        }
        let spec = state.sorts.click(&self.sort_context, column);
        tracing::debug!("sorting {:?} by {:?}", self.sort_context, spec);
        if self.sort_context == SortContext::PlayQueue {
            state.play_queue.sort(spec);
        }
        true
    }

    pub fn row_flags(&self, state: &AppState, row: &Row, index: usize) -> RowFlags {
        let playing = match self.sort_context {
            SortContext::PlayQueue => {
                state.play_queue.current_unique_id() == Some(&row.unique_id)
            }
            _ => state
                .play_queue
                .current()
                .is_some_and(|current| current.id() == row.id()),
        };
        let drag_over = (state.selection.is_dragging() || state.selection.is_select_dragging())
            && state
                .selection
                .current_mouse_over()
                .is_some_and(|m| m.index == index && m.unique_id == row.unique_id);
        RowFlags {
            selected: state.selection.is_selected(&row.unique_id),
            playing,
            drag_over,
        }
    }

    pub fn select_all(&mut self, state: &mut AppState, rows: &[Row]) {
        state.selection.select_all(rows);
    }

    /// Widen or narrow a column and persist the layout.
    pub fn resize_column(&mut self, state: &mut AppState, key: ColumnKey, delta: i16) -> bool {
        let mut columns = state.settings.columns(self.list_type);
        let Some(width) = columns.iter().find(|c| c.key == key).map(|c| c.width) else {
            return false;
        };
        let width = width.saturating_add_signed(delta);
        if !resize_column(&mut columns, key, width) {
            return false;
        }
        state.settings.set_columns(self.list_type, columns);
        true
    }

    /// Primary button pressed on `rows[index]`.
    pub fn pointer_down(
        &mut self,
        state: &mut AppState,
        rows: &[Row],
        index: usize,
        modifiers: Modifiers,
    ) {
        self.context_menu = None;
        let Some(row) = rows.get(index) else {
            return;
        };
        self.pointer.down((index, row.unique_id.clone()));
        self.interaction
            .mouse_down(&mut state.selection, row, modifiers);
    }

    /// Primary button released on `rows[index]`. Returns what to play if the
    /// release completed a double click.
    pub fn pointer_up(
        &mut self,
        state: &mut AppState,
        rows: &[Row],
        index: usize,
        modifiers: Modifiers,
        now: Instant,
    ) -> Option<PlayFromHere> {
        self.interaction.mouse_up(&mut state.selection, rows);
        let row = rows.get(index)?;
        let mut play = None;
        for event in self.pointer.up((index, row.unique_id.clone()), now) {
            match event {
                PointerEvent::Click(_) => self.interaction.click(row, modifiers, now),
                PointerEvent::DoubleClick(_) => {
                    play = self.interaction.double_click(
                        &mut state.selection,
                        rows,
                        index,
                        &state.filters,
                    );
                }
                PointerEvent::Down(_) | PointerEvent::Up(_) => {}
            }
        }
        play
    }

    /// The pointer moved over `rows[index]` with the button held.
    pub fn pointer_drag(&mut self, state: &mut AppState, rows: &[Row], index: usize, now: Instant) {
        if let Some(row) = rows.get(index) {
            self.interaction
                .mouse_enter(&mut state.selection, row, index, now);
        }
    }

    /// Run expired click and hover timers.
    pub fn tick(&mut self, state: &mut AppState, rows: &[Row], now: Instant) -> bool {
        self.interaction.poll(&mut state.selection, rows, now)
    }

    /// Leaving the page drops pending clicks.
    pub fn unmount(&mut self) {
        self.interaction.cancel();
        self.context_menu = None;
    }

    /// Keyboard activation of `rows[index]`, equivalent to a double click.
    pub fn activate(&mut self, state: &mut AppState, rows: &[Row], index: usize) -> Option<PlayFromHere> {
        self.interaction
            .double_click(&mut state.selection, rows, index, &state.filters)
    }

    /// Open the context menu for `row`. Right-clicking a row outside the
    /// selection selects it alone first.
    pub fn open_context_menu(
        &mut self,
        state: &mut AppState,
        row: &Row,
        pointer: (u16, u16),
        viewport: (u16, u16),
    ) {
        if !state.selection.is_selected(&row.unique_id) {
            state.selection.set_single(row);
        }
        let items: Vec<ContextMenuItem> = [
            ContextMenuItem::Play,
            ContextMenuItem::AddNext,
            ContextMenuItem::AddLater,
            ContextMenuItem::AddToFavorites,
            ContextMenuItem::RemoveFromFavorites,
            ContextMenuItem::SetRating,
            ContextMenuItem::SelectAll,
            ContextMenuItem::ClearSelection,
        ]
        .into_iter()
        .filter(|item| !self.disabled_items.contains(item))
        .filter(|item| {
            *item != ContextMenuItem::SetRating || state.server_type != ServerType::Jellyfin
        })
        .collect();

        let mut menu = ContextMenu {
            x: 0,
            y: 0,
            items,
        };
        (menu.x, menu.y) = place_menu(pointer, (ContextMenu::WIDTH, menu.height()), viewport);
        self.context_menu = Some(menu);
    }

    /// Run a context menu item against the selection. `rating` is used by
    /// [`ContextMenuItem::SetRating`].
    pub fn context_menu_action(
        &mut self,
        state: &mut AppState,
        item: ContextMenuItem,
        rows: &[Row],
        rating: u8,
    ) -> Vec<Command> {
        self.context_menu = None;
        let selected = self.selected_in_display_order(state, rows);
        match item {
            ContextMenuItem::Play => {
                actions::play(state, &selected);
                vec![]
            }
            ContextMenuItem::AddNext => {
                actions::append(state, &selected, AppendPosition::Next);
                vec![]
            }
            ContextMenuItem::AddLater => {
                actions::append(state, &selected, AppendPosition::Later);
                vec![]
            }
            ContextMenuItem::AddToFavorites => actions::set_favorite(state, &selected, true),
            ContextMenuItem::RemoveFromFavorites => actions::set_favorite(state, &selected, false),
            ContextMenuItem::SetRating => actions::set_rating(state, &selected, rating),
            ContextMenuItem::SelectAll => {
                self.select_all(state, rows);
                vec![]
            }
            ContextMenuItem::ClearSelection => {
                state.selection.clear();
                vec![]
            }
        }
    }

    /// The selected rows in the order they are displayed.
    pub fn selected_in_display_order(&self, state: &AppState, rows: &[Row]) -> Vec<Row> {
        let selected: Vec<&UniqueId> = state
            .selection
            .selected()
            .iter()
            .map(|r| &r.unique_id)
            .collect();
        rows.iter()
            .filter(|r| selected.contains(&&r.unique_id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use starling_state::{PlayerStatus, SortDirection, Track};

    fn rows(titles: &[&str]) -> Vec<Row> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Row::track(Track::new(format!("a{}", i + 1), *t)))
            .collect()
    }

    fn titles(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(Row::title).collect()
    }

    #[test]
    fn test_header_clicks_cycle_title_sort() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut table = ListViewTable::new(ListType::Album, SortContext::page("albumListPage"));
        let rows = rows(&["B", "A"]);

        assert!(table.header_click(&mut state, ColumnKey::Title));
        assert_eq!(titles(&table.display_rows(&state, &rows)), ["A", "B"]);
        table.header_click(&mut state, ColumnKey::Title);
        assert_eq!(
            table.sort_spec(&state).direction_of(ColumnKey::Title),
            Some(SortDirection::Descending)
        );
        assert_eq!(titles(&table.display_rows(&state, &rows)), ["B", "A"]);
        table.header_click(&mut state, ColumnKey::Title);
        assert!(table.sort_spec(&state).is_natural());
        assert_eq!(titles(&table.display_rows(&state, &rows)), ["B", "A"]);

        assert!(!table.header_click(&mut state, ColumnKey::Index));
    }

    #[test]
    fn test_play_queue_header_sorts_queue() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        state.play_queue.set(rows(&["b", "a"]));
        let mut table = ListViewTable::new(ListType::Mini, SortContext::PlayQueue);

        table.header_click(&mut state, ColumnKey::Title);
        assert_eq!(titles(state.play_queue.display_entries()), ["a", "b"]);
        assert!(state.sorts.get(&SortContext::page("albumListPage")).is_natural());
    }

    #[test]
    fn test_jellyfin_hides_unsupported_columns() {
        let table = ListViewTable::new(ListType::Music, SortContext::page("albumPage"));
        let subsonic = AppState::in_memory(ServerType::Subsonic);
        let jellyfin = AppState::in_memory(ServerType::Jellyfin);
        let has_rating = |state: &AppState| {
            table
                .columns(state)
                .iter()
                .any(|c| c.key == ColumnKey::UserRating)
        };
        assert!(has_rating(&subsonic));
        assert!(!has_rating(&jellyfin));
    }

    #[test]
    fn test_resize_column_persists() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut table = ListViewTable::new(ListType::Music, SortContext::page("albumPage"));
        assert!(table.resize_column(&mut state, ColumnKey::Album, 4));
        let width = |state: &AppState| {
            state
                .settings
                .columns(ListType::Music)
                .iter()
                .find(|c| c.key == ColumnKey::Album)
                .map(|c| c.width)
        };
        assert_eq!(width(&state), Some(24));
        assert!(table.resize_column(&mut state, ColumnKey::Album, -100));
        assert_eq!(width(&state), Some(ColumnDescriptor::MIN_WIDTH));
        assert!(!table.resize_column(&mut state, ColumnKey::Index, 2));
    }

    #[test]
    fn test_double_click_through_pointer_plays_from_row() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut table = ListViewTable::new(ListType::Music, SortContext::page("albumPage"));
        let rows = rows(&["One", "Two", "Three"]);
        let start = Instant::now();

        table.pointer_down(&mut state, &rows, 1, Modifiers::NONE);
        assert!(table.pointer_up(&mut state, &rows, 1, Modifiers::NONE, start).is_none());
        assert!(state.selection.is_selected(&rows[1].unique_id));

        table.pointer_down(&mut state, &rows, 1, Modifiers::NONE);
        let play = table
            .pointer_up(&mut state, &rows, 1, Modifiers::NONE, start + Duration::from_millis(150))
            .unwrap();
        assert!(state.selection.is_empty());
        actions::play_from_here(&mut state, &play);
        assert_eq!(state.play_queue.current().map(Row::title), Some("Two"));
        assert_eq!(state.play_queue.status(), PlayerStatus::Playing);

        let flags = table.row_flags(&state, &rows[1], 1);
        assert!(flags.playing && !flags.selected);
    }

    #[test]
    fn test_context_menu_selects_row_and_flips() {
        let mut state = AppState::in_memory(ServerType::Jellyfin);
        let mut table = ListViewTable::new(ListType::Music, SortContext::page("albumPage"))
            .with_disabled_items([ContextMenuItem::SelectAll]);
        let rows = rows(&["One", "Two"]);
        state.selection.toggle(&rows[0]);

        table.open_context_menu(&mut state, &rows[1], (70, 20), (80, 24));
        assert_eq!(titles(state.selection.selected()), ["Two"]);
        let menu = table.context_menu.clone().unwrap();
        assert!(!menu.items.contains(&ContextMenuItem::SetRating));
        assert!(!menu.items.contains(&ContextMenuItem::SelectAll));
        assert_eq!((menu.x, menu.y), (70 - ContextMenu::WIDTH, 20 - menu.height()));

        table.open_context_menu(&mut state, &rows[1], (1, 1), (80, 24));
        let menu = table.context_menu.clone().unwrap();
        assert_eq!((menu.x, menu.y), (1, 1));

        let commands =
            table.context_menu_action(&mut state, ContextMenuItem::AddToFavorites, &rows, 0);
        assert_eq!(commands.len(), 1);
        assert!(table.context_menu.is_none());
    }

    #[test]
    fn test_right_click_keeps_existing_selection() {
        let mut state = AppState::in_memory(ServerType::Subsonic);
        let mut table = ListViewTable::new(ListType::Music, SortContext::page("albumPage"));
        let rows = rows(&["One", "Two", "Three"]);
        state.selection.toggle(&rows[2]);
        state.selection.toggle(&rows[0]);

        table.open_context_menu(&mut state, &rows[0], (0, 0), (80, 24));
        assert_eq!(state.selection.len(), 2);
        assert_eq!(
            titles(&table.selected_in_display_order(&state, &rows)),
            ["One", "Three"]
        );
    }
}
