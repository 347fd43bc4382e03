use std::time::Instant;

use starling_core::{
    Logic,
    command::{Command, DownloadAction},
    interaction::Modifiers,
    notification::Notification,
    route::{AlbumListFilter, Route},
    settings::ViewType,
    starling_state::{
        ColumnKey, ItemId, ListType, PlayerStatus, Row, RowKind, SortContext, SortDirection,
        UniqueId, play_queue::AppendPosition,
    },
    view::{
        ListViewTable, Page, actions,
        now_playing::NowPlayingView,
        table::ContextMenuItem,
    },
};

use crate::{
    config::Config,
    log_buffer::LogBuffer,
    ui::{
        layout::{COLUMN_RESIZE_STEP, HitMap, Link, PAGE_SCROLL_SIZE},
        logs::LogsState,
    },
};

/// Which panel has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Content,
    Queue,
    Logs,
}
impl FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Content => FocusedPanel::Queue,
            FocusedPanel::Queue => FocusedPanel::Logs,
            FocusedPanel::Logs => FocusedPanel::Content,
        }
    }
}

/// A text box that has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    NewPlaylist,
}

/// Keyboard position within a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub offset: usize,
}
impl Cursor {
    /// Move by `delta` rows within `len`, scrolling to keep the row among the
    /// `visible` rows.
    pub fn move_by(&mut self, delta: isize, len: usize, visible: usize) {
        if len == 0 {
            *self = Self::default();
            return;
        }
        self.row = self.row.saturating_add_signed(delta).min(len - 1);
        self.reveal(visible);
    }

    pub fn reveal(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + visible {
            self.offset = self.row + 1 - visible;
        }
    }
}

pub struct App {
    pub logic: Logic,
    pub config: Config,

    pub page: Page,
    page_route: Route,
    pub queue: ListViewTable,

    pub focused_panel: FocusedPanel,
    pub input: Option<InputMode>,
    pub cursor: Cursor,
    pub queue_cursor: Cursor,
    /// The column `o` sorts and `[`/`]` resize.
    pub column_cursor: usize,
    pub menu_cursor: usize,
    pub should_quit: bool,
    pub needs_redraw: bool,

    pub logs: LogsState,
    /// Clickable areas of the last frame.
    pub hit: HitMap,
    pub viewport: (u16, u16),
}
impl App {
    pub fn new(config: Config, logic: Logic, log_buffer: LogBuffer) -> Self {
        let route = logic.state().router.current().clone();
        let mut app = Self {
            logic,
            config,
            page: Page::for_route(&route),
            page_route: route,
            queue: ListViewTable::new(ListType::Mini, SortContext::PlayQueue),
            focused_panel: FocusedPanel::Content,
            input: None,
            cursor: Cursor::default(),
            queue_cursor: Cursor::default(),
            column_cursor: 0,
            menu_cursor: 0,
            should_quit: false,
            needs_redraw: true,
            logs: LogsState::new(log_buffer),
            hit: HitMap::default(),
            viewport: (0, 0),
        };
        app.mount_page();
        app
    }

    fn mount_page(&mut self) {
        self.cursor = Cursor::default();
        self.column_cursor = 0;
        self.menu_cursor = 0;
        self.input = None;
        if let Some(key) = self.page.scroll_key(self.logic.state()) {
            self.cursor.offset = self.logic.state().scroll.get(&key);
            self.cursor.row = self.cursor.offset;
        }
        let commands = self.page.mount(self.logic.state());
        self.logic.run(commands);
    }

    /// Rebuild the page when the route has changed.
    fn sync_route(&mut self) {
        let route = self.logic.state().router.current().clone();
        if route == self.page_route {
            return;
        }
        tracing::debug!("navigating to {route:?}");
        self.page.unmount();
        self.page = Page::for_route(&route);
        self.page_route = route;
        self.mount_page();
    }

    pub fn run(&mut self, commands: Vec<Command>) {
        self.logic.run(commands);
        self.sync_route();
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        let rows = self.page.rows(self.logic.state());
        self.page
            .table_mut()
            .tick(self.logic.state_mut(), &rows, now);
        let queue_rows = self.queue_rows();
        self.queue.tick(self.logic.state_mut(), &queue_rows, now);

        let commands = self.page.sync(self.logic.state());
        self.logic.run(commands);
        self.logic.update();
        self.sync_route();
        self.needs_redraw = true;
    }

    pub fn queue_rows(&self) -> Vec<Row> {
        self.logic.state().play_queue.display_entries().to_vec()
    }

    /// The rows of the table that has the keyboard.
    pub fn focused_rows(&self) -> Vec<Row> {
        match self.focused_panel {
            FocusedPanel::Queue => self.queue_rows(),
            _ => self.page.rows(self.logic.state()),
        }
    }

    fn visible_rows(&self) -> usize {
        if self.focused_panel == FocusedPanel::Content
            && let Some(grid) = self.hit.grid
        {
            return grid.visible.max(1);
        }
        let geometry = match self.focused_panel {
            FocusedPanel::Queue => &self.hit.queue,
            _ => &self.hit.table,
        };
        geometry.as_ref().map_or(PAGE_SCROLL_SIZE, |t| t.visible_rows())
    }

    fn focused_cursor(&mut self) -> &mut Cursor {
        match self.focused_panel {
            FocusedPanel::Queue => &mut self.queue_cursor,
            _ => &mut self.cursor,
        }
    }

    /// The rows an action applies to: the selection, or the row under the
    /// cursor when nothing is selected.
    fn targets(&self, rows: &[Row]) -> Vec<Row> {
        let state = self.logic.state();
        if !state.selection.is_empty() {
            let table = match self.focused_panel {
                FocusedPanel::Queue => &self.queue,
                _ => self.page.table(),
            };
            return table.selected_in_display_order(state, rows);
        }
        let cursor = match self.focused_panel {
            FocusedPanel::Queue => self.queue_cursor,
            _ => self.cursor,
        };
        rows.get(cursor.row).cloned().into_iter().collect()
    }

    pub fn switch_panel(&mut self) {
        self.logic.state_mut().selection.clear();
        self.page.table_mut().context_menu = None;
        self.queue.context_menu = None;
        self.focused_panel = self.focused_panel.next();
        if self.focused_panel == FocusedPanel::Logs {
            self.logs.scroll_to_end();
        }
    }

    // ── Cursor and selection ────────────────────────────────────────────

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.focused_rows().len();
        let visible = self.visible_rows();
        self.focused_cursor().move_by(delta, len, visible);
        self.save_scroll();
    }

    /// Up and down move by a whole row of cards in a grid.
    pub fn move_vertical(&mut self, delta: isize) {
        let step = match (self.focused_panel, self.hit.grid) {
            (FocusedPanel::Content, Some(grid)) => grid.per_row.max(1) as isize,
            _ => 1,
        };
        self.move_cursor(delta * step);
    }

    /// Left and right pick a table column, or step through a grid.
    pub fn move_horizontal(&mut self, delta: isize) {
        if self.focused_panel == FocusedPanel::Content && self.hit.grid.is_some() {
            self.move_cursor(delta);
        } else {
            self.move_column_cursor(delta);
        }
    }

    pub fn goto_row(&mut self, row: usize) {
        let len = self.focused_rows().len();
        let visible = self.visible_rows();
        let cursor = self.focused_cursor();
        cursor.row = row.min(len.saturating_sub(1));
        cursor.reveal(visible);
        self.save_scroll();
    }

    /// The wheel carries the cursor along with it.
    pub fn scroll(&mut self, delta: isize) {
        self.move_cursor(delta);
    }

    fn save_scroll(&mut self) {
        if self.focused_panel != FocusedPanel::Content {
            return;
        }
        if let Some(key) = self.page.scroll_key(self.logic.state()) {
            let offset = self.cursor.offset;
            self.logic.state_mut().scroll.set(key, offset);
        }
    }

    pub fn toggle_select(&mut self) {
        let rows = self.focused_rows();
        let row = match self.focused_panel {
            FocusedPanel::Queue => rows.get(self.queue_cursor.row),
            _ => rows.get(self.cursor.row),
        };
        if let Some(row) = row {
            self.logic.state_mut().selection.toggle(row);
        }
    }

    pub fn select_all(&mut self) {
        let rows = self.focused_rows();
        match self.focused_panel {
            FocusedPanel::Queue => self.queue.select_all(self.logic.state_mut(), &rows),
            _ => self.page.table_mut().select_all(self.logic.state_mut(), &rows),
        }
    }

    /// Escape closes the innermost thing that is open, then goes back.
    pub fn escape(&mut self) {
        if self.page.table().context_menu.is_some() || self.queue.context_menu.is_some() {
            self.close_menu();
            return;
        }
        let state = self.logic.state_mut();
        if !state.selection.is_empty() {
            state.selection.clear();
        } else if !state.search_query.is_empty() {
            state.search_query.clear();
        } else if self.focused_panel == FocusedPanel::Content {
            self.run(vec![Command::Back]);
        }
    }

    /// Enter on the cursor row: play from it, or open it.
    pub fn activate(&mut self, index: usize) {
        let rows = self.focused_rows();
        match self.focused_panel {
            FocusedPanel::Queue => {
                if let Some(play) = self.queue.activate(self.logic.state_mut(), &rows, index) {
                    self.play_queue_entry(&play.unique_id);
                }
            }
            _ => {
                let Some(play) = self
                    .page
                    .table_mut()
                    .activate(self.logic.state_mut(), &rows, index)
                else {
                    return;
                };
                let commands = self.page.activate(self.logic.state_mut(), &play);
                self.run(commands);
            }
        }
    }

    pub fn play_queue_entry(&mut self, unique_id: &UniqueId) {
        let queue = &mut self.logic.state_mut().play_queue;
        if queue.set_current(unique_id) {
            queue.set_status(PlayerStatus::Playing);
        }
    }

    // ── Actions on rows ─────────────────────────────────────────────────

    pub fn favorite(&mut self) {
        let rows = self.focused_rows();
        let targets = self.targets(&rows);
        let commands = match targets.as_slice() {
            [] => vec![],
            [row] if self.focused_panel == FocusedPanel::Content => {
                self.page.row_favorite(self.logic.state_mut(), row)
            }
            targets => {
                let starred = !targets.iter().all(Row::starred);
                actions::set_favorite(self.logic.state_mut(), targets, starred)
            }
        };
        self.run(commands);
    }

    pub fn rate(&mut self, rating: u8) {
        let rows = self.focused_rows();
        let targets = self.targets(&rows);
        let commands = match targets.as_slice() {
            [] => vec![],
            [row] if self.focused_panel == FocusedPanel::Content => {
                self.page.row_rating(self.logic.state_mut(), row, rating)
            }
            targets => actions::set_rating(self.logic.state_mut(), targets, rating),
        };
        self.run(commands);
    }

    /// Play or queue the selection, or the whole list when nothing is
    /// selected.
    pub fn play(&mut self, position: Option<AppendPosition>) {
        let nothing_selected = self.logic.state().selection.is_empty();
        if nothing_selected && self.focused_panel == FocusedPanel::Content {
            let state = self.logic.state_mut();
            match (&self.page, position) {
                (Page::Album(v), None) => return v.play(state),
                (Page::Album(v), Some(p)) => return v.play_append(state, p),
                (Page::Playlist(v), None) => return v.play(state),
                (Page::Playlist(v), Some(p)) => return v.play_append(state, p),
                _ => {}
            }
        }
        let rows = self.focused_rows();
        let targets = if nothing_selected {
            rows
        } else {
            self.targets(&rows)
        };
        let tracks: Vec<Row> = targets
            .into_iter()
            .filter(|r| r.as_track().is_some())
            .collect();
        if tracks.is_empty() {
            return;
        }
        match position {
            None => actions::play(self.logic.state_mut(), &tracks),
            Some(p) => actions::append(self.logic.state_mut(), &tracks, p),
        }
    }

    pub fn play_pause(&mut self) {
        let queue = &mut self.logic.state_mut().play_queue;
        if queue.current().is_none() {
            return;
        }
        let status = match queue.status() {
            PlayerStatus::Playing => PlayerStatus::Paused,
            _ => PlayerStatus::Playing,
        };
        queue.set_status(status);
    }

    pub fn skip(&mut self, offset: isize) {
        let queue = &mut self.logic.state_mut().play_queue;
        if queue.advance(offset).is_some() {
            queue.set_status(PlayerStatus::Playing);
        }
    }

    pub fn favorite_page(&mut self) {
        let commands = match &self.page {
            Page::Album(v) => v.toggle_favorite(self.logic.state_mut()),
            Page::Artist(v) => v.toggle_favorite(self.logic.state_mut()),
            _ => vec![],
        };
        self.run(commands);
    }

    pub fn download(&mut self, action: DownloadAction) {
        let commands = match &self.page {
            Page::Album(v) if self.focused_panel == FocusedPanel::Content => {
                v.download(self.logic.state_mut(), action)
            }
            _ => {
                let rows = self.focused_rows();
                let ids: Vec<ItemId> = self
                    .targets(&rows)
                    .iter()
                    .filter_map(Row::as_track)
                    .map(|t| t.id.clone())
                    .collect();
                if ids.is_empty() {
                    vec![]
                } else {
                    vec![Command::Download { ids, action }]
                }
            }
        };
        self.run(commands);
    }

    // ── Columns and sorting ─────────────────────────────────────────────

    fn focused_table(&self) -> &ListViewTable {
        match self.focused_panel {
            FocusedPanel::Queue => &self.queue,
            _ => self.page.table(),
        }
    }

    pub fn move_column_cursor(&mut self, delta: isize) {
        let count = self.focused_table().columns(self.logic.state()).len();
        self.column_cursor = self
            .column_cursor
            .saturating_add_signed(delta)
            .min(count.saturating_sub(1));
    }

    pub fn sort(&mut self) {
        if let Page::PlaylistList(v) = &self.page
            && self.focused_panel == FocusedPanel::Content
            && v.view_type(self.logic.state()) == ViewType::Grid
        {
            // The grid has no header, so step through the sortable columns.
            let state = self.logic.state();
            let current = state.sorts.get(&v.table.sort_context).column;
            let enabled: Vec<_> = v
                .sort_columns(state)
                .into_iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(key, _)| key)
                .collect();
            let next = current
                .and_then(|c| enabled.iter().position(|k| *k == c))
                .map_or(0, |i| (i + 1) % enabled.len().max(1));
            if let Some(column) = enabled.get(next).copied() {
                v.set_sort_column(self.logic.state_mut(), column);
            }
            return;
        }
        let Some(column) = self
            .focused_table()
            .columns(self.logic.state())
            .get(self.column_cursor)
            .map(|c| c.key)
        else {
            return;
        };
        match self.focused_panel {
            FocusedPanel::Queue => self.queue.header_click(self.logic.state_mut(), column),
            _ => self.page.table_mut().header_click(self.logic.state_mut(), column),
        };
    }

    pub fn flip_sort_direction(&mut self) {
        if let Page::PlaylistList(v) = &self.page {
            let direction = match self.logic.state().sorts.get(&v.table.sort_context).direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
            v.set_sort_direction(self.logic.state_mut(), direction);
        }
    }

    pub fn clear_sort(&mut self) {
        if let Page::PlaylistList(v) = &self.page {
            v.clear_sort(self.logic.state_mut());
        }
    }

    pub fn resize_column(&mut self, grow: bool) {
        let delta = if grow {
            COLUMN_RESIZE_STEP
        } else {
            -COLUMN_RESIZE_STEP
        };
        let Some(key) = self
            .focused_table()
            .columns(self.logic.state())
            .get(self.column_cursor)
            .map(|c| c.key)
        else {
            return;
        };
        match self.focused_panel {
            FocusedPanel::Queue => self.queue.resize_column(self.logic.state_mut(), key, delta),
            _ => self
                .page
                .table_mut()
                .resize_column(self.logic.state_mut(), key, delta),
        };
    }

    pub fn toggle_row_height(&mut self) {
        let list_type = self.focused_table().list_type;
        let settings = &mut self.logic.state_mut().settings;
        let height = if settings.row_height(list_type) == 1 { 2 } else { 1 };
        settings.set_row_height(list_type, height);
    }

    // ── Pages ───────────────────────────────────────────────────────────

    pub fn navigate(&mut self, route: Route) {
        self.focused_panel = FocusedPanel::Content;
        self.run(vec![Command::Navigate(route)]);
    }

    pub fn toggle_view_type(&mut self) {
        match &self.page {
            Page::AlbumList(v) => v.toggle_view_type(self.logic.state_mut()),
            Page::PlaylistList(v) => {
                let view_type = v.view_type(self.logic.state()).toggled();
                v.set_view_type(self.logic.state_mut(), view_type);
            }
            _ => return,
        }
        // Each view type keeps its own scroll offset.
        if let Some(key) = self.page.scroll_key(self.logic.state()) {
            self.cursor.offset = self.logic.state().scroll.get(&key);
            self.cursor.row = self.cursor.offset;
        }
    }

    pub fn cycle_filter(&mut self) {
        let filter = match &self.page {
            Page::AlbumList(v) => match v.filter {
                AlbumListFilter::Random => AlbumListFilter::Newest,
                AlbumListFilter::Newest => AlbumListFilter::Starred,
                AlbumListFilter::Starred | AlbumListFilter::Genre(_) => AlbumListFilter::Random,
            },
            _ => AlbumListFilter::Random,
        };
        self.navigate(Route::AlbumList(filter));
    }

    /// `,` and `.`: album list pages, or the latest albums strip.
    pub fn turn_page(&mut self, delta: isize) {
        let per_page = self.hit.strip_per_page.max(1);
        let commands = match &mut self.page {
            Page::AlbumList(v) => {
                self.cursor = Cursor::default();
                v.turn_page(self.logic.state_mut(), delta)
            }
            Page::NowPlaying(v) => {
                if delta < 0 {
                    v.latest_albums.scroll_prev(per_page);
                } else {
                    v.latest_albums.scroll_next(per_page);
                }
                vec![]
            }
            _ => vec![],
        };
        self.run(commands);
    }

    pub fn refresh(&mut self) {
        if let Page::AlbumList(v) = &self.page {
            let commands = v.refresh();
            self.run(commands);
        }
    }

    pub fn genre_link(&mut self) {
        let commands = match &self.page {
            Page::Album(v) => {
                let genre = v.detail(self.logic.state()).and_then(|d| match &d.album.kind {
                    RowKind::Album(album) => album.genre.clone(),
                    _ => None,
                });
                match genre {
                    Some(genre) => v.genre_link(self.logic.state_mut(), &genre),
                    None => vec![],
                }
            }
            Page::NowPlaying(v) => {
                let genre = NowPlayingView::current_track(self.logic.state())
                    .and_then(|t| t.genre.clone());
                match genre {
                    Some(genre) => v.genre_link(self.logic.state_mut(), &genre),
                    None => vec![],
                }
            }
            _ => vec![],
        };
        self.focused_panel = FocusedPanel::Content;
        self.run(commands);
    }

    pub fn artist_link(&mut self) {
        if let Page::Album(v) = &self.page {
            let commands = v.artist_link(self.logic.state());
            self.run(commands);
        }
    }

    pub fn album_link(&mut self) {
        let commands = NowPlayingView::album_link(self.logic.state());
        self.run(commands);
    }

    pub fn toggle_biography(&mut self) {
        if let Page::NowPlaying(v) = &mut self.page {
            v.expanded_biography = !v.expanded_biography;
        }
    }

    pub fn follow_link(&mut self, link: Link) {
        match link {
            Link::Route(route) => self.navigate(route),
            Link::Card(index) => {
                self.cursor.row = index;
                self.activate(index);
            }
            Link::Genre(genre) => {
                let commands = match &self.page {
                    Page::Album(v) => v.genre_link(self.logic.state_mut(), &genre),
                    Page::NowPlaying(v) => v.genre_link(self.logic.state_mut(), &genre),
                    _ => vec![],
                };
                self.run(commands);
            }
            Link::Artist => self.artist_link(),
            Link::Album => self.album_link(),
            Link::FavoritePage => self.favorite_page(),
            Link::Biography => self.toggle_biography(),
            Link::CardFavorite(index) => {
                let Page::NowPlaying(v) = &self.page else {
                    return;
                };
                let Some(row) = v.latest_albums(self.logic.state()).get(index).cloned() else {
                    return;
                };
                let commands = v.album_favorite(self.logic.state_mut(), &row);
                self.run(commands);
            }
            Link::StripPrevious => self.turn_page(-1),
            Link::StripNext => self.turn_page(1),
            Link::PreviousPage => self.turn_page(-1),
            Link::NextPage => self.turn_page(1),
        }
    }

    // ── Text input ──────────────────────────────────────────────────────

    pub fn start_input(&mut self, mode: InputMode) {
        if mode == InputMode::NewPlaylist && !matches!(self.page, Page::PlaylistList(_)) {
            self.navigate(Route::PlaylistList);
        }
        self.focused_panel = FocusedPanel::Content;
        self.input = Some(mode);
    }

    pub fn input_text(&mut self) -> Option<&mut String> {
        match self.input? {
            InputMode::Search => Some(&mut self.logic.state_mut().search_query),
            InputMode::NewPlaylist => match &mut self.page {
                Page::PlaylistList(v) => Some(&mut v.new_playlist_name),
                _ => None,
            },
        }
    }

    pub fn submit_input(&mut self) {
        match self.input.take() {
            Some(InputMode::NewPlaylist) => {
                if let Page::PlaylistList(v) = &mut self.page {
                    let commands = v.create_playlist(self.logic.state_mut());
                    self.run(commands);
                }
            }
            Some(InputMode::Search) => self.cursor = Cursor::default(),
            None => {}
        }
    }

    pub fn cancel_input(&mut self) {
        match self.input.take() {
            Some(InputMode::Search) => self.logic.state_mut().search_query.clear(),
            Some(InputMode::NewPlaylist) => {
                if let Page::PlaylistList(v) = &mut self.page {
                    v.new_playlist_name.clear();
                }
            }
            None => {}
        }
    }

    // ── Pointer ─────────────────────────────────────────────────────────

    fn rows_for_panel(&self, panel: FocusedPanel) -> Vec<Row> {
        match panel {
            FocusedPanel::Queue => self.queue_rows(),
            _ => self.page.rows(self.logic.state()),
        }
    }

    pub fn pointer_down(&mut self, index: usize, modifiers: Modifiers) {
        let panel = self.focused_panel;
        let rows = self.rows_for_panel(panel);
        let (table, state) = match panel {
            FocusedPanel::Queue => (&mut self.queue, self.logic.state_mut()),
            _ => (self.page.table_mut(), self.logic.state_mut()),
        };
        table.pointer_down(state, &rows, index, modifiers);
        match panel {
            FocusedPanel::Queue => self.queue_cursor.row = index,
            _ => self.cursor.row = index,
        }
    }

    pub fn pointer_drag(&mut self, index: usize) {
        let panel = self.focused_panel;
        let rows = self.rows_for_panel(panel);
        let (table, state) = match panel {
            FocusedPanel::Queue => (&mut self.queue, self.logic.state_mut()),
            _ => (self.page.table_mut(), self.logic.state_mut()),
        };
        table.pointer_drag(state, &rows, index, Instant::now());
    }

    /// The button came up over row `index`, or outside the table.
    pub fn pointer_up(&mut self, index: Option<usize>, modifiers: Modifiers) {
        let panel = self.focused_panel;
        let rows = self.rows_for_panel(panel);
        let (table, state) = match panel {
            FocusedPanel::Queue => (&mut self.queue, self.logic.state_mut()),
            _ => (self.page.table_mut(), self.logic.state_mut()),
        };
        let Some(play) = table.pointer_up(
            state,
            &rows,
            index.unwrap_or(usize::MAX),
            modifiers,
            Instant::now(),
        ) else {
            return;
        };
        match panel {
            FocusedPanel::Queue => self.play_queue_entry(&play.unique_id),
            _ => {
                let commands = self.page.activate(self.logic.state_mut(), &play);
                self.run(commands);
            }
        }
    }

    pub fn header_click(&mut self, column: ColumnKey) {
        let panel = self.focused_panel;
        let state = self.logic.state_mut();
        match panel {
            FocusedPanel::Queue => self.queue.header_click(state, column),
            _ => self.page.table_mut().header_click(state, column),
        };
    }

    // ── Context menu ────────────────────────────────────────────────────

    pub fn menu_open(&self) -> bool {
        self.focused_table().context_menu.is_some()
    }

    pub fn open_context_menu(&mut self, index: usize, pointer: (u16, u16)) {
        let panel = self.focused_panel;
        let rows = self.rows_for_panel(panel);
        let Some(row) = rows.get(index) else {
            return;
        };
        let (table, state) = match panel {
            FocusedPanel::Queue => (&mut self.queue, self.logic.state_mut()),
            _ => (self.page.table_mut(), self.logic.state_mut()),
        };
        table.open_context_menu(state, row, pointer, self.viewport);
        self.menu_cursor = 0;
    }

    /// Open the menu next to the cursor row.
    pub fn open_context_menu_at_cursor(&mut self) {
        let cursor = match self.focused_panel {
            FocusedPanel::Queue => self.queue_cursor,
            _ => self.cursor,
        };
        let geometry = match self.focused_panel {
            FocusedPanel::Queue => &self.hit.queue,
            _ => &self.hit.table,
        };
        let Some(table) = geometry else {
            return;
        };
        let line = cursor.row.saturating_sub(table.offset) as u16 * table.row_height.max(1);
        let pointer = (table.body.x + 4, table.body.y + line + 1);
        self.open_context_menu(cursor.row, pointer);
    }

    pub fn close_menu(&mut self) {
        self.page.table_mut().context_menu = None;
        self.queue.context_menu = None;
    }

    pub fn menu_items(&self) -> Vec<ContextMenuItem> {
        self.focused_table()
            .context_menu
            .as_ref()
            .map(|m| m.items.clone())
            .unwrap_or_default()
    }

    pub fn move_menu_cursor(&mut self, delta: isize) {
        let count = self.menu_items().len();
        self.menu_cursor = self
            .menu_cursor
            .saturating_add_signed(delta)
            .min(count.saturating_sub(1));
    }

    /// Run a menu item. Ratings come from the digit typed or the star clicked.
    pub fn menu_select(&mut self, item: ContextMenuItem, rating: Option<u8>) {
        if item == ContextMenuItem::SetRating && rating.is_none() {
            self.logic
                .state_mut()
                .notify(Notification::info("Press 0-5 to set the rating"));
            return;
        }
        let panel = self.focused_panel;
        let rows = self.rows_for_panel(panel);
        let state = self.logic.state_mut();
        let commands = match panel {
            FocusedPanel::Queue => {
                self.queue
                    .context_menu_action(state, item, &rows, rating.unwrap_or(0))
            }
            _ => self
                .page
                .table_mut()
                .context_menu_action(state, item, &rows, rating.unwrap_or(0)),
        };
        self.run(commands);
    }

    pub fn save_state(&self) {
        self.logic.shutdown();
        self.config.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_keeps_row_visible() {
        let mut cursor = Cursor::default();
        cursor.move_by(7, 20, 5);
        assert_eq!(cursor, Cursor { row: 7, offset: 3 });
        cursor.move_by(-5, 20, 5);
        assert_eq!(cursor, Cursor { row: 2, offset: 2 });
        cursor.move_by(100, 20, 5);
        assert_eq!(cursor, Cursor { row: 19, offset: 15 });
    }

    #[test]
    fn test_cursor_empty_list_resets() {
        let mut cursor = Cursor { row: 4, offset: 2 };
        cursor.move_by(1, 0, 5);
        assert_eq!(cursor, Cursor::default());
    }

    #[test]
    fn test_panels_cycle() {
        assert_eq!(FocusedPanel::Content.next(), FocusedPanel::Queue);
        assert_eq!(FocusedPanel::Queue.next(), FocusedPanel::Logs);
        assert_eq!(FocusedPanel::Logs.next(), FocusedPanel::Content);
    }
}
