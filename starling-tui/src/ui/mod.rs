pub(crate) mod cards;
pub(crate) mod context_menu;
pub(crate) mod layout;
pub(crate) mod logs;
pub(crate) mod now_playing;
pub(crate) mod pages;
pub(crate) mod table;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use starling_core::{
    notification::NotificationLevel,
    route::{AlbumListFilter, Route},
    starling_state::PlayerStatus,
    view::Page,
};
use unicode_width::UnicodeWidthStr as _;

use crate::{
    app::{App, FocusedPanel, InputMode},
    keys,
};

use layout::{HitMap, Link};

/// The colors everything is drawn with.
pub mod theme {
    use ratatui::style::Color;

    pub const TEXT: Color = Color::Gray;
    pub const DIM: Color = Color::DarkGray;
    pub const HEADER: Color = Color::White;
    pub const ACCENT: Color = Color::Cyan;
    pub const LINK: Color = Color::LightBlue;
    pub const PLAYING: Color = Color::LightGreen;
    pub const STARRED: Color = Color::LightRed;
    pub const BORDER: Color = Color::DarkGray;
    pub const FOCUSED_BORDER: Color = Color::Cyan;
    pub const SELECTED_BG: Color = Color::Rgb(40, 60, 90);
    pub const CURSOR_BG: Color = Color::Rgb(60, 60, 60);
}

/// A line of text with clickable spans, whose areas are recorded in the
/// [`HitMap`] when it is drawn.
pub struct LinkLine {
    spans: Vec<Span<'static>>,
    links: Vec<(u16, u16, Link)>,
    width: u16,
}
impl LinkLine {
    pub fn new() -> Self {
        Self {
            spans: vec![],
            links: vec![],
            width: 0,
        }
    }

    pub fn text(mut self, text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        self.width = self.width.saturating_add(text.width() as u16);
        self.spans.push(Span::styled(text, style));
        self
    }

    pub fn link(mut self, text: impl Into<String>, style: Style, link: Link) -> Self {
        let text = text.into();
        let width = text.width() as u16;
        self.links.push((self.width, width, link));
        self.width = self.width.saturating_add(width);
        self.spans.push(Span::styled(text, style));
        self
    }

    pub fn draw(self, frame: &mut Frame, hit: &mut HitMap, area: Rect) {
        for (x, width, link) in self.links {
            if x >= area.width {
                continue;
            }
            let width = width.min(area.width - x);
            hit.links
                .push((Rect::new(area.x + x, area.y, width, area.height.min(1)), link));
        }
        frame.render_widget(Paragraph::new(Line::from(self.spans)), area);
    }
}

pub fn link_style() -> Style {
    Style::default()
        .fg(theme::LINK)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.viewport = (size.width, size.height);
    app.hit = HitMap::default();

    let main = layout::split_main(size);
    draw_title_bar(frame, app, main.title_bar);

    if app.focused_panel == FocusedPanel::Logs {
        logs::draw(frame, &mut app.logs, main.content);
    } else {
        let (page_area, queue_area) = layout::split_content(main.content);
        pages::draw(frame, app, page_area);
        draw_queue(frame, app, queue_area);
    }

    draw_help_bar(frame, app, main.help_bar);
    draw_notifications(frame, app, main.content);

    if let Some(menu) = &app.page.table().context_menu {
        context_menu::draw(frame, menu, app.menu_cursor, size);
    } else if let Some(menu) = &app.queue.context_menu {
        context_menu::draw(frame, menu, app.menu_cursor, size);
    }
}

fn draw_title_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let state = app.logic.state();
    let current = state.router.current();
    let tab = |active: bool| {
        if active {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT)
        }
    };

    let mut line = LinkLine::new()
        .text(" starling ", Style::default().fg(Color::Black).bg(theme::ACCENT))
        .text(" ", Style::default())
        .link(
            "Albums",
            tab(matches!(current, Route::AlbumList(_))),
            Link::Route(Route::AlbumList(AlbumListFilter::default())),
        )
        .text(" │ ", Style::default().fg(theme::DIM))
        .link(
            "Playlists",
            tab(*current == Route::PlaylistList),
            Link::Route(Route::PlaylistList),
        )
        .text(" │ ", Style::default().fg(theme::DIM))
        .link(
            "Now playing",
            tab(*current == Route::NowPlaying),
            Link::Route(Route::NowPlaying),
        )
        .text(format!("   {}", app.page.title()), Style::default().fg(theme::HEADER));

    if app.input == Some(InputMode::Search) || !state.search_query.is_empty() {
        let caret = if app.input == Some(InputMode::Search) { "▏" } else { "" };
        line = line.text(
            format!("   Search: {}{caret}", state.search_query),
            Style::default().fg(theme::ACCENT),
        );
    }

    let queue = &state.play_queue;
    if let Some(current) = queue.current() {
        let symbol = match queue.status() {
            PlayerStatus::Playing => "▶",
            PlayerStatus::Paused => "⏸",
            PlayerStatus::Stopped => "■",
        };
        line = line.text(
            format!("   {symbol} {}", current.title()),
            Style::default().fg(theme::PLAYING),
        );
    }

    line.draw(frame, &mut app.hit, area);
}

fn draw_queue(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.queue_rows();
    let title = format!("Queue ({})", rows.len());
    let focused = app.focused_panel == FocusedPanel::Queue;
    let geometry = table::draw(
        frame,
        app.logic.state(),
        &app.queue,
        &rows,
        &mut app.queue_cursor,
        table::TableView {
            title: &title,
            focused,
            column_cursor: focused.then_some(app.column_cursor),
            empty_message: "The queue is empty",
        },
        area,
    );
    app.hit.queue = Some(geometry);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_actions: &[keys::Action] = if app.input.is_some() {
        keys::INPUT_HELP
    } else if app.menu_open() {
        keys::MENU_HELP
    } else {
        match (app.focused_panel, &app.page) {
            (FocusedPanel::Logs, _) => keys::LOGS_HELP,
            (FocusedPanel::Queue, _) => keys::TRACK_LIST_HELP,
            (_, Page::AlbumList(_)) => keys::ALBUM_LIST_HELP,
            (_, Page::Album(_)) => keys::ALBUM_HELP,
            (_, Page::PlaylistList(_)) => keys::PLAYLIST_LIST_HELP,
            (_, Page::NowPlaying(_)) => keys::NOW_PLAYING_HELP,
            (_, Page::Playlist(_) | Page::Artist(_)) => keys::TRACK_LIST_HELP,
        }
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for action in help_actions {
        if let Some((key, label)) = action.help_label() {
            spans.push(Span::styled(
                String::from(key),
                Style::default().fg(theme::ACCENT),
            ));
            spans.push(Span::styled(
                format!(":{label} "),
                Style::default().fg(theme::TEXT),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Toasts stack up from the bottom right corner of `area`.
fn draw_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let notifications: Vec<_> = app.logic.state().notifications.visible().collect();
    if notifications.is_empty() {
        return;
    }
    let width = area.width.min(48);
    let height = (notifications.len() as u16 * 3).min(area.height);
    let stack = Rect::new(
        area.right().saturating_sub(width + 1),
        area.bottom().saturating_sub(height),
        width,
        height,
    );
    let slots = Layout::vertical(vec![Constraint::Length(3); notifications.len()]).split(stack);

    for (notification, slot) in notifications.iter().zip(slots.iter()) {
        let color = match notification.level {
            NotificationLevel::Info => theme::ACCENT,
            NotificationLevel::Success => theme::PLAYING,
            NotificationLevel::Warning => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        };
        frame.render_widget(Clear, *slot);
        let toast = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(theme::HEADER))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(toast, *slot);
    }
}
