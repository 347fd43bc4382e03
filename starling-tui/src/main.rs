mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::time::{Duration, Instant};

use app::{App, FocusedPanel, InputMode};
use config::Config;
use keys::Action;
use log_buffer::{LogBuffer, LogBufferLayer};
use starling_core::{
    Logic,
    command::{Command, DownloadAction},
    interaction::Modifiers,
    route::{AlbumListFilter, Route},
    starling_state::play_queue::AppendPosition,
    view::table::ContextMenuItem,
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};
use ui::{
    context_menu,
    layout::{PAGE_SCROLL_SIZE, SCROLL_WHEEL_STEPS},
    logs::{self, LogsAction},
};

fn main() -> anyhow::Result<()> {
    // Logs go to the logs panel instead of stdout.
    let log_buffer = LogBuffer::new();

    // And to a file, which survives the alternate screen.
    let log_file = std::fs::File::create("starling-tui.log")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("starling=info")),
        )
        .init();

    let config = Config::load();
    let logic = Logic::new(&config.server, config.playback.filters.clone())?;
    let mut app = App::new(config, logic, log_buffer);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(app.config.general.tick_rate_ms);
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.save_state();
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }
        let term_size = terminal.size()?;
        let size = Rect::new(0, 0, term_size.width, term_size.height);

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let mut scroll_delta: i32 = 0;

            // Process the first event, then drain all remaining queued events.
            let mut process_event = |evt: Event, app: &mut App| match evt {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, &key);
                    app.needs_redraw = true;
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll_delta -= 1;
                        app.needs_redraw = true;
                    }
                    MouseEventKind::ScrollDown => {
                        scroll_delta += 1;
                        app.needs_redraw = true;
                    }
                    _ => {
                        handle_mouse_event(app, &mouse, size);
                        app.needs_redraw = true;
                    }
                },
                Event::Resize(_, _) => {
                    app.needs_redraw = true;
                }
                _ => {}
            };

            process_event(event::read()?, app);
            while event::poll(Duration::ZERO)? {
                process_event(event::read()?, app);
            }

            // Apply coalesced scroll as a single operation.
            if scroll_delta != 0 {
                apply_scroll(app, scroll_delta);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    // Text boxes take every key.
    if app.input.is_some() {
        let Some(action) = keys::input_action(key) else {
            return;
        };
        match action {
            Action::Char(c) => {
                if let Some(text) = app.input_text() {
                    text.push(c);
                }
            }
            Action::DeleteChar => {
                if let Some(text) = app.input_text() {
                    text.pop();
                }
            }
            Action::ClearLine => {
                if let Some(text) = app.input_text() {
                    text.clear();
                }
            }
            Action::Select => app.submit_input(),
            Action::Back => app.cancel_input(),
            _ => {}
        }
        return;
    }

    if app.menu_open() {
        let Some(action) = keys::menu_action(key) else {
            return;
        };
        match action {
            Action::MoveUp => app.move_menu_cursor(-1),
            Action::MoveDown => app.move_menu_cursor(1),
            Action::Select => {
                if let Some(item) = app.menu_items().get(app.menu_cursor).copied() {
                    app.menu_select(item, None);
                }
            }
            Action::Rate(rating) => app.menu_select(ContextMenuItem::SetRating, Some(rating)),
            Action::Back => app.close_menu(),
            _ => {}
        }
        return;
    }

    if app.focused_panel == FocusedPanel::Logs {
        let Some(action) = keys::logs_action(key) else {
            return;
        };
        match logs::handle_key(&mut app.logs, action) {
            Some(LogsAction::SwitchPanel) => app.switch_panel(),
            Some(LogsAction::Quit) => app.should_quit = true,
            None => {}
        }
        return;
    }

    let Some(action) = keys::browse_action(key) else {
        return;
    };
    match action {
        Action::Quit => app.should_quit = true,
        Action::MoveUp => app.move_vertical(-1),
        Action::MoveDown => app.move_vertical(1),
        Action::ColumnLeft => app.move_horizontal(-1),
        Action::ColumnRight => app.move_horizontal(1),
        Action::PageUp => app.move_cursor(-(PAGE_SCROLL_SIZE as isize)),
        Action::PageDown => app.move_cursor(PAGE_SCROLL_SIZE as isize),
        Action::GotoTop => app.goto_row(0),
        Action::GotoBottom => app.goto_row(usize::MAX),
        Action::Select => {
            let row = match app.focused_panel {
                FocusedPanel::Queue => app.queue_cursor.row,
                _ => app.cursor.row,
            };
            app.activate(row);
        }
        Action::ToggleSelect => app.toggle_select(),
        Action::SelectAll => app.select_all(),
        Action::Back => app.escape(),
        Action::GoBack => app.run(vec![Command::Back]),
        Action::Favorite => app.favorite(),
        Action::FavoritePage => app.favorite_page(),
        Action::Rate(rating) => app.rate(rating),
        Action::Play => app.play(None),
        Action::PlayNext => app.play(Some(AppendPosition::Next)),
        Action::PlayLater => app.play(Some(AppendPosition::Later)),
        Action::PlayPause => app.play_pause(),
        Action::NextTrack => app.skip(1),
        Action::PreviousTrack => app.skip(-1),
        Action::Download => app.download(DownloadAction::Open),
        Action::CopyLinks => app.download(DownloadAction::Copy),
        Action::Search => app.start_input(InputMode::Search),
        Action::NewPlaylist => app.start_input(InputMode::NewPlaylist),
        Action::ViewType => app.toggle_view_type(),
        Action::SwitchPanel => app.switch_panel(),
        Action::ContextMenu => app.open_context_menu_at_cursor(),
        Action::Albums => app.navigate(Route::AlbumList(AlbumListFilter::default())),
        Action::Playlists => app.navigate(Route::PlaylistList),
        Action::NowPlaying => app.navigate(Route::NowPlaying),
        Action::CycleFilter => app.cycle_filter(),
        Action::PreviousPage => app.turn_page(-1),
        Action::NextPage => app.turn_page(1),
        Action::Refresh => app.refresh(),
        Action::Genre => app.genre_link(),
        Action::Artist => app.artist_link(),
        Action::Album => app.album_link(),
        Action::Biography => app.toggle_biography(),
        Action::Sort => app.sort(),
        Action::SortDirection => app.flip_sort_direction(),
        Action::ClearSort => app.clear_sort(),
        Action::WidenColumn => app.resize_column(true),
        Action::NarrowColumn => app.resize_column(false),
        Action::RowHeight => app.toggle_row_height(),
        Action::ClearLine | Action::Char(_) | Action::DeleteChar => {}
    }
}

fn modifiers(mouse: &MouseEvent) -> Modifiers {
    Modifiers {
        ctrl: mouse.modifiers.contains(KeyModifiers::CONTROL),
        shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
    }
}

/// The panel whose table is under `(x, y)`, with the row there if any.
fn table_hit(app: &App, x: u16, y: u16) -> Option<(FocusedPanel, Option<usize>)> {
    let inside = |r: Rect| x >= r.x && x < r.right() && y >= r.y && y < r.bottom();
    if let Some(queue) = &app.hit.queue
        && (inside(queue.header) || inside(queue.body))
    {
        return Some((FocusedPanel::Queue, queue.row_at(x, y)));
    }
    if let Some(table) = &app.hit.table
        && (inside(table.header) || inside(table.body))
    {
        return Some((FocusedPanel::Content, table.row_at(x, y)));
    }
    None
}

fn handle_mouse_event(app: &mut App, mouse: &MouseEvent, size: Rect) {
    let x = mouse.column;
    let y = mouse.row;
    let mods = modifiers(mouse);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // An open menu takes the click, and closes on a click elsewhere.
            if app.menu_open() {
                let picked = app
                    .page
                    .table()
                    .context_menu
                    .as_ref()
                    .or(app.queue.context_menu.as_ref())
                    .and_then(|menu| context_menu::item_at(menu, size, x, y));
                match picked {
                    Some((item, rating)) => app.menu_select(item, rating),
                    None => app.close_menu(),
                }
                return;
            }

            if app.focused_panel == FocusedPanel::Logs {
                if let Some(link) = app.hit.link_at(x, y).cloned() {
                    app.follow_link(link);
                }
                return;
            }

            if let Some((panel, row)) = table_hit(app, x, y) {
                app.focused_panel = panel;
                let geometry = match panel {
                    FocusedPanel::Queue => &app.hit.queue,
                    _ => &app.hit.table,
                };
                if let Some(column) = geometry.as_ref().and_then(|g| g.column_at(x, y)) {
                    app.header_click(column);
                } else if let Some(row) = row {
                    app.pointer_down(row, mods);
                }
                return;
            }

            if let Some(link) = app.hit.link_at(x, y).cloned() {
                app.focused_panel = FocusedPanel::Content;
                app.follow_link(link);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((_, Some(row))) = table_hit(app, x, y) {
                app.pointer_drag(row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let row = table_hit(app, x, y)
                .filter(|(panel, _)| *panel == app.focused_panel)
                .and_then(|(_, row)| row);
            app.pointer_up(row, mods);
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some((panel, Some(row))) = table_hit(app, x, y) {
                app.focused_panel = panel;
                app.open_context_menu(row, (x, y));
            }
        }
        _ => {}
    }
}

fn apply_scroll(app: &mut App, scroll_delta: i32) {
    let steps = scroll_delta.unsigned_abs() as isize * SCROLL_WHEEL_STEPS as isize;
    let delta = steps * scroll_delta.signum() as isize;
    match app.focused_panel {
        FocusedPanel::Logs => app.logs.scroll_by(delta),
        _ => app.scroll(delta),
    }
}
