use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use starling_core::{
    app_state::AppState,
    starling_state::{ColumnKey, Row, RowKind, SortDirection, column::layout_widths},
    util::{format_bit_rate, format_date, format_size_mb, rating_stars, seconds_to_hms_string},
    view::ListViewTable,
};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

use crate::app::Cursor;

use super::{layout::TableGeometry, theme};

/// Cells between columns.
const COLUMN_GAP: u16 = 1;

/// How the table should be drawn.
pub struct TableView<'a> {
    pub title: &'a str,
    pub focused: bool,
    /// The column under the keyboard's column cursor
    pub column_cursor: Option<usize>,
    pub empty_message: &'a str,
}

/// Draw `rows` through `table` and return where everything landed.
pub fn draw(
    frame: &mut Frame,
    state: &AppState,
    table: &ListViewTable,
    rows: &[Row],
    cursor: &mut Cursor,
    view: TableView,
    area: Rect,
) -> TableGeometry {
    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if view.focused {
            theme::FOCUSED_BORDER
        } else {
            theme::BORDER
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = table.columns(state);
    let gaps = COLUMN_GAP * columns.len().saturating_sub(1) as u16;
    let widths = layout_widths(&columns, inner.width.saturating_sub(gaps));
    let row_height = state.settings.row_height(table.list_type).max(1);

    let header = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
    let body = Rect::new(
        inner.x,
        inner.y + header.height,
        inner.width,
        inner.height.saturating_sub(header.height),
    );

    let mut geometry = TableGeometry {
        header,
        body,
        columns: Vec::with_capacity(columns.len()),
        row_height,
        offset: 0,
        len: rows.len(),
    };

    // Header
    let spec = table.sort_spec(state);
    let mut x = inner.x;
    let mut header_spans = Vec::with_capacity(columns.len() * 2);
    for (i, (column, width)) in columns.iter().zip(&widths).enumerate() {
        geometry.columns.push((column.key, x, *width));
        let arrow = match spec.direction_of(column.key) {
            Some(SortDirection::Ascending) => " ▲",
            Some(SortDirection::Descending) => " ▼",
            None => "",
        };
        let mut style = Style::default()
            .fg(theme::HEADER)
            .add_modifier(Modifier::BOLD);
        if view.focused && view.column_cursor == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        header_spans.push(Span::styled(
            pad(&format!("{}{arrow}", column.label), *width),
            style,
        ));
        header_spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
        x = x.saturating_add(*width + COLUMN_GAP);
    }
    frame.render_widget(Paragraph::new(Line::from(header_spans)), header);

    if rows.is_empty() {
        *cursor = Cursor::default();
        frame.render_widget(
            Paragraph::new(view.empty_message).style(Style::default().fg(theme::DIM)),
            body,
        );
        return geometry;
    }

    // Body
    let visible = geometry.visible_rows().max(1);
    cursor.row = cursor.row.min(rows.len() - 1);
    cursor.offset = cursor.offset.min(rows.len().saturating_sub(visible));
    cursor.reveal(visible);
    geometry.offset = cursor.offset;

    let mut lines = Vec::with_capacity(visible * row_height as usize);
    for (index, row) in rows.iter().enumerate().skip(cursor.offset).take(visible) {
        let flags = table.row_flags(state, row, index);
        let mut style = Style::default().fg(theme::TEXT);
        if flags.playing {
            style = style.fg(theme::PLAYING).add_modifier(Modifier::BOLD);
        }
        if flags.selected {
            style = style.bg(theme::SELECTED_BG);
        }
        if view.focused && index == cursor.row {
            style = style.bg(theme::CURSOR_BG);
        }
        if flags.drag_over {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let mut first = Vec::with_capacity(columns.len() * 2);
        let mut second = Vec::new();
        for (column, width) in columns.iter().zip(&widths) {
            let text = cell_text(row, column.key, index);
            let cell_style = match column.key {
                ColumnKey::Starred if row.starred() => style.fg(theme::STARRED),
                _ => style,
            };
            first.push(Span::styled(pad(&text, *width), cell_style));
            first.push(Span::styled(" ".repeat(COLUMN_GAP as usize), style));
            if row_height > 1 {
                // Tall rows show the artist under a combined title.
                let below = match column.key {
                    ColumnKey::CombinedTitle => cell_text(row, ColumnKey::Artist, index),
                    _ => String::new(),
                };
                second.push(Span::styled(pad(&below, *width), style.fg(theme::DIM)));
                second.push(Span::styled(" ".repeat(COLUMN_GAP as usize), style));
            }
        }
        lines.push(Line::from(first));
        for _ in 1..row_height {
            lines.push(Line::from(std::mem::take(&mut second)));
        }
    }
    frame.render_widget(Paragraph::new(lines), body);

    geometry
}

/// The text of one cell. `index` is the row's position in the displayed list.
pub fn cell_text(row: &Row, key: ColumnKey, index: usize) -> String {
    use ColumnKey as C;
    let hms = seconds_to_hms_string;
    let text = match (&row.kind, key) {
        (_, C::Index) => Some((index + 1).to_string()),
        (_, C::Title | C::CombinedTitle) => Some(row.title().to_string()),
        (_, C::Starred) => Some(if row.starred() { "♥" } else { "♡" }.to_string()),
        (_, C::UserRating) => Some(rating_stars(row.user_rating())),

        (RowKind::Track(t), C::Artist) => t.artist.clone(),
        (RowKind::Track(t), C::Album) => t.album.clone(),
        (RowKind::Track(t), C::Genre) => t.genre.clone(),
        (RowKind::Track(t), C::Duration) => t.duration.map(hms),
        (RowKind::Track(t), C::Year) => t.year.map(|y| y.to_string()),
        (RowKind::Track(t), C::Track) => t.track.map(|n| n.to_string()),
        (RowKind::Track(t), C::Disc) => t.disc_number.map(|n| n.to_string()),
        (RowKind::Track(t), C::BitRate) => t.bit_rate.map(format_bit_rate),
        (RowKind::Track(t), C::Size) => t.size.map(format_size_mb),
        (RowKind::Track(t), C::PlayCount) => t.play_count.map(|n| n.to_string()),
        (RowKind::Track(t), C::Created) => t.created.as_deref().map(format_date),
        (RowKind::Track(t), C::Path) => t.path.clone(),

        (RowKind::Album(a), C::Artist) => a.artist.clone(),
        (RowKind::Album(a), C::Genre) => a.genre.clone(),
        (RowKind::Album(a), C::Duration) => Some(hms(a.duration)),
        (RowKind::Album(a), C::Year) => a.year.map(|y| y.to_string()),
        (RowKind::Album(a), C::SongCount) => Some(a.song_count.to_string()),
        (RowKind::Album(a), C::PlayCount) => a.play_count.map(|n| n.to_string()),
        (RowKind::Album(a), C::Created) => a.created.as_deref().map(format_date),

        (RowKind::Playlist(p), C::Comment) => p.comment.clone(),
        (RowKind::Playlist(p), C::Owner) => p.owner.clone(),
        (RowKind::Playlist(p), C::Public) => {
            Some(if p.public { "Public" } else { "Private" }.to_string())
        }
        (RowKind::Playlist(p), C::SongCount) => Some(p.song_count.to_string()),
        (RowKind::Playlist(p), C::Duration) => Some(hms(p.duration)),
        (RowKind::Playlist(p), C::Created) => p.created.as_deref().map(format_date),
        (RowKind::Playlist(p), C::Changed) => p.changed.as_deref().map(format_date),

        (RowKind::Artist(a), C::AlbumCount) => Some(a.album_count.to_string()),
        _ => None,
    };
    text.unwrap_or_default()
}

/// Fit `text` into exactly `width` cells, cutting it with an ellipsis.
pub fn pad(text: &str, width: u16) -> String {
    let width = width as usize;
    if text.width() <= width {
        return format!("{text}{}", " ".repeat(width - text.width()));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_core::starling_state::{Album, Playlist, Track};

    #[test]
    fn test_track_cells() {
        let mut track = Track::new("t1", "Song");
        track.duration = Some(185);
        track.size = Some(3 * 1024 * 1024);
        track.user_rating = Some(2);
        track.starred = true;
        let row = Row::track(track);

        assert_eq!(cell_text(&row, ColumnKey::Index, 4), "5");
        assert_eq!(cell_text(&row, ColumnKey::Duration, 0), "3:05");
        assert_eq!(cell_text(&row, ColumnKey::Size, 0), "3.00 MB");
        assert_eq!(cell_text(&row, ColumnKey::UserRating, 0), "★★☆☆☆");
        assert_eq!(cell_text(&row, ColumnKey::Starred, 0), "♥");
        assert_eq!(cell_text(&row, ColumnKey::Artist, 0), "");
    }

    #[test]
    fn test_album_and_playlist_cells() {
        let mut album = Album::new("al1", "Record");
        album.song_count = 12;
        album.year = Some(1999);
        let row = Row::new(RowKind::Album(album));
        assert_eq!(cell_text(&row, ColumnKey::SongCount, 0), "12");
        assert_eq!(cell_text(&row, ColumnKey::Year, 0), "1999");

        let mut playlist = Playlist::new("p1", "Mix");
        playlist.changed = Some("2024-02-03T04:05:06Z".into());
        let row = Row::new(RowKind::Playlist(playlist));
        assert_eq!(cell_text(&row, ColumnKey::Public, 0), "Private");
        assert_eq!(cell_text(&row, ColumnKey::Changed, 0), "2024-02-03");
    }

    #[test]
    fn test_pad_truncates_by_display_width() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdef", 4), "abc…");
        assert_eq!(pad("日本語", 4), "日… ");
        assert_eq!(pad("abc", 0), "");
    }
}
