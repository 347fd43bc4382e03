use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Paragraph, Wrap},
};
use starling_core::{
    app_state::AppState,
    query::QueryStatus,
    route::{AlbumListFilter, Route},
    settings::ViewType,
    starling_state::{Row, RowKind, SortDirection},
    util::seconds_to_hms_string,
    view::{
        AlbumListView, AlbumView, ArtistView, ListViewTable, Page, PlaylistListView, PlaylistView,
    },
};

use crate::app::{App, Cursor, FocusedPanel, InputMode};

use super::{
    LinkLine, cards,
    layout::{HitMap, Link, split_detail},
    link_style, now_playing,
    table::{self, TableView},
    theme,
};

/// What every page draws with.
pub struct PageContext<'a> {
    pub state: &'a AppState,
    pub cursor: &'a mut Cursor,
    pub hit: &'a mut HitMap,
    pub focused: bool,
    pub column_cursor: Option<usize>,
    pub input: Option<InputMode>,
}
impl PageContext<'_> {
    pub fn draw_table(
        &mut self,
        frame: &mut Frame,
        table: &ListViewTable,
        rows: &[Row],
        title: &str,
        empty_message: &str,
        area: Rect,
    ) {
        let geometry = table::draw(
            frame,
            self.state,
            table,
            rows,
            self.cursor,
            TableView {
                title,
                focused: self.focused,
                column_cursor: self.column_cursor,
                empty_message,
            },
            area,
        );
        self.hit.table = Some(geometry);
    }
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Content;
    let App {
        logic,
        page,
        cursor,
        column_cursor,
        hit,
        input,
        ..
    } = app;
    let mut ctx = PageContext {
        state: logic.state(),
        cursor,
        hit,
        focused,
        column_cursor: focused.then_some(*column_cursor),
        input: *input,
    };
    match page {
        Page::AlbumList(v) => draw_album_list(frame, &mut ctx, v, area),
        Page::Album(v) => draw_album(frame, &mut ctx, v, area),
        Page::Artist(v) => draw_artist(frame, &mut ctx, v, area),
        Page::PlaylistList(v) => draw_playlist_list(frame, &mut ctx, v, area),
        Page::Playlist(v) => draw_playlist(frame, &mut ctx, v, area),
        Page::NowPlaying(v) => now_playing::draw(frame, &mut ctx, v, area),
    }
}

/// Draws a placeholder for a query without data. Returns whether it did.
pub fn draw_placeholder(frame: &mut Frame, status: QueryStatus, area: Rect) -> bool {
    let (text, style) = match status {
        QueryStatus::Ready(_) => return false,
        QueryStatus::Loading => ("Loading...".to_string(), Style::default().fg(theme::DIM)),
        QueryStatus::Failed(e) => (
            format!("Failed to load: {e}"),
            Style::default().fg(ratatui::style::Color::Red),
        ),
    };
    frame.render_widget(
        Paragraph::new(text).style(style).wrap(Wrap { trim: true }),
        area,
    );
    true
}

/// Row `i` of a header area.
pub fn header_line(area: Rect, i: u16) -> Rect {
    if i >= area.height {
        return Rect::new(area.x, area.y, area.width, 0);
    }
    Rect::new(area.x, area.y + i, area.width, 1)
}

fn heart(starred: bool) -> (&'static str, Style) {
    if starred {
        ("♥ ", Style::default().fg(theme::STARRED))
    } else {
        ("♡ ", Style::default().fg(theme::DIM))
    }
}

fn title_style() -> Style {
    Style::default()
        .fg(theme::HEADER)
        .add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(theme::DIM)
}

// ── Album list ──────────────────────────────────────────────────────────

fn draw_album_list(frame: &mut Frame, ctx: &mut PageContext, view: &AlbumListView, area: Rect) {
    let (toolbar, body) = split_detail(area, 1);

    let mut line = LinkLine::new().text(" ", Style::default());
    for filter in [
        AlbumListFilter::Random,
        AlbumListFilter::Newest,
        AlbumListFilter::Starred,
    ] {
        let style = if filter == view.filter {
            title_style().fg(theme::ACCENT)
        } else {
            Style::default().fg(theme::TEXT)
        };
        line = line
            .link(filter.to_string(), style, Link::Route(Route::AlbumList(filter)))
            .text("  ", Style::default());
    }
    if let AlbumListFilter::Genre(_) = &view.filter {
        line = line.text(view.filter.to_string(), title_style().fg(theme::ACCENT));
    }
    line = line.text(format!("   Page {}  ", view.page + 1), dim());
    if view.page > 0 {
        line = line
            .link("◀ prev", link_style(), Link::PreviousPage)
            .text("  ", Style::default());
    }
    line = line.link("next ▶", link_style(), Link::NextPage);
    line.draw(frame, ctx.hit, toolbar);

    if draw_placeholder(frame, view.status(ctx.state), body) {
        return;
    }
    let rows = view.rows(ctx.state);
    match view.view_type(ctx.state) {
        ViewType::Grid => cards::draw_grid(
            frame, ctx.state, &rows, ctx.cursor, ctx.focused, "Albums", ctx.hit, body,
        ),
        ViewType::List => ctx.draw_table(frame, &view.table, &rows, "Albums", "No albums", body),
    }
}

// ── Album ───────────────────────────────────────────────────────────────

const ALBUM_HEADER_HEIGHT: u16 = 4;

fn draw_album(frame: &mut Frame, ctx: &mut PageContext, view: &AlbumView, area: Rect) {
    let Some(detail) = view.detail(ctx.state) else {
        draw_placeholder(frame, view.status(ctx.state), area);
        return;
    };
    let (header, body) = split_detail(area, ALBUM_HEADER_HEIGHT);

    if let RowKind::Album(album) = &detail.album.kind {
        let (heart, heart_style) = heart(album.starred);
        LinkLine::new()
            .text(" ", Style::default())
            .link(heart, heart_style, Link::FavoritePage)
            .text(album.title.clone(), title_style())
            .draw(frame, ctx.hit, header_line(header, 0));

        let mut by = LinkLine::new().text(" by ", dim());
        by = match (&album.artist, &album.artist_id) {
            (Some(artist), Some(_)) => by.link(artist.clone(), link_style(), Link::Artist),
            (Some(artist), None) => by.text(artist.clone(), Style::default().fg(theme::TEXT)),
            _ => by.text("Unknown artist", dim()),
        };
        if let Some(year) = album.year {
            by = by.text(format!("  ({year})"), dim());
        }
        by.draw(frame, ctx.hit, header_line(header, 1));

        let mut info = LinkLine::new().text(" ", Style::default());
        if let Some(genre) = &album.genre {
            info = info
                .link(genre.clone(), link_style(), Link::Genre(genre.clone()))
                .text(" · ", dim());
        }
        info.text(
            format!(
                "{} tracks · {}",
                album.song_count,
                seconds_to_hms_string(album.duration)
            ),
            dim(),
        )
        .draw(frame, ctx.hit, header_line(header, 2));
    }

    let rows = view.rows(ctx.state);
    ctx.draw_table(frame, &view.table, &rows, "Tracks", "No tracks", body);
}

// ── Artist ──────────────────────────────────────────────────────────────

const ARTIST_HEADER_HEIGHT: u16 = 6;

fn draw_artist(frame: &mut Frame, ctx: &mut PageContext, view: &ArtistView, area: Rect) {
    let Some(detail) = view.detail(ctx.state) else {
        draw_placeholder(frame, view.status(ctx.state), area);
        return;
    };
    let (header, body) = split_detail(area, ARTIST_HEADER_HEIGHT);

    let (heart, heart_style) = heart(detail.artist.starred());
    LinkLine::new()
        .text(" ", Style::default())
        .link(heart, heart_style, Link::FavoritePage)
        .text(detail.artist.title().to_string(), title_style())
        .text(format!("   {} albums", detail.albums.len()), dim())
        .draw(frame, ctx.hit, header_line(header, 0));

    if let Some(biography) = view.biography(ctx.state) {
        let bio_area = Rect::new(
            header.x + 1,
            header.y + 1,
            header.width.saturating_sub(2),
            header.height.saturating_sub(2),
        );
        frame.render_widget(
            Paragraph::new(biography)
                .style(Style::default().fg(theme::TEXT))
                .wrap(Wrap { trim: true }),
            bio_area,
        );
    }

    let rows = view.rows(ctx.state);
    ctx.draw_table(frame, &view.table, &rows, "Albums", "No albums", body);
}

// ── Playlists ───────────────────────────────────────────────────────────

fn draw_playlist_list(
    frame: &mut Frame,
    ctx: &mut PageContext,
    view: &PlaylistListView,
    area: Rect,
) {
    let typing = ctx.input == Some(InputMode::NewPlaylist);
    let (toolbar, body) = split_detail(area, 2);

    let spec = ctx.state.sorts.get(&view.table.sort_context);
    let sort = match spec.column {
        Some(column) => {
            let arrow = match spec.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {arrow}", column.label())
        }
        None => "Unsorted".to_string(),
    };
    LinkLine::new()
        .text(format!(" Sort: {sort}"), Style::default().fg(theme::TEXT))
        .draw(frame, ctx.hit, header_line(toolbar, 0));

    let new_playlist = if typing {
        LinkLine::new()
            .text(" New playlist: ", Style::default().fg(theme::ACCENT))
            .text(
                format!("{}▏", view.new_playlist_name),
                Style::default().fg(theme::HEADER),
            )
    } else {
        LinkLine::new().text(" Press N to create a playlist", dim())
    };
    new_playlist.draw(frame, ctx.hit, header_line(toolbar, 1));

    if draw_placeholder(frame, view.status(ctx.state), body) {
        return;
    }
    let rows = view.rows(ctx.state);
    match view.view_type(ctx.state) {
        ViewType::Grid => cards::draw_grid(
            frame, ctx.state, &rows, ctx.cursor, ctx.focused, "Playlists", ctx.hit, body,
        ),
        ViewType::List => ctx.draw_table(
            frame,
            &view.table,
            &rows,
            "Playlists",
            "No playlists",
            body,
        ),
    }
}

const PLAYLIST_HEADER_HEIGHT: u16 = 4;

fn draw_playlist(frame: &mut Frame, ctx: &mut PageContext, view: &PlaylistView, area: Rect) {
    let Some(detail) = view.detail(ctx.state) else {
        draw_placeholder(frame, view.status(ctx.state), area);
        return;
    };
    let (header, body) = split_detail(area, PLAYLIST_HEADER_HEIGHT);

    if let RowKind::Playlist(playlist) = &detail.playlist.kind {
        LinkLine::new()
            .text(format!(" {}", playlist.title), title_style())
            .draw(frame, ctx.hit, header_line(header, 0));

        let mut about = LinkLine::new().text(" ", Style::default());
        if let Some(owner) = &playlist.owner {
            about = about.text(format!("by {owner}  "), dim());
        }
        if let Some(comment) = &playlist.comment {
            about = about.text(comment.clone(), Style::default().fg(theme::TEXT));
        }
        about.draw(frame, ctx.hit, header_line(header, 1));

        LinkLine::new()
            .text(
                format!(
                    " {} tracks · {} · {}",
                    playlist.song_count,
                    seconds_to_hms_string(playlist.duration),
                    if playlist.public { "Public" } else { "Private" }
                ),
                dim(),
            )
            .draw(frame, ctx.hit, header_line(header, 2));
    }

    let rows = view.rows(ctx.state);
    ctx.draw_table(frame, &view.table, &rows, "Tracks", "No tracks", body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lines_clip_to_area() {
        let area = Rect::new(2, 3, 40, 2);
        assert_eq!(header_line(area, 1), Rect::new(2, 4, 40, 1));
        assert_eq!(header_line(area, 2).height, 0);
    }
}
