use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use starling_core::{app_state::AppState, starling_state::Row, view::scrolling_menu::Card};

use crate::app::Cursor;

use super::{
    layout::{CARD_HEIGHT, CARD_WIDTH, GridGeometry, HitMap, Link, cards_per_row},
    table::pad,
    theme,
};

/// One card: a bordered title with a subtitle underneath.
pub fn draw_card(frame: &mut Frame, card: &Card, highlighted: bool, selected: bool, area: Rect) {
    let border = if highlighted {
        theme::FOCUSED_BORDER
    } else {
        theme::BORDER
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if selected {
        block = block.style(Style::default().bg(theme::SELECTED_BG));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (heart, heart_color) = if card.starred {
        ("♥ ", theme::STARRED)
    } else {
        ("♡ ", theme::DIM)
    };
    let title_width = inner.width.saturating_sub(2);
    let lines = vec![
        Line::from(vec![
            Span::styled(heart, Style::default().fg(heart_color)),
            Span::styled(
                pad(&card.title, title_width),
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            pad(card.subtitle.as_deref().unwrap_or_default(), inner.width),
            Style::default().fg(theme::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The first card of the grid row that keeps `cursor` on screen.
pub fn grid_offset(cursor: usize, offset: usize, per_row: usize, rows_visible: usize) -> usize {
    let per_row = per_row.max(1);
    let rows_visible = rows_visible.max(1);
    let cursor_row = cursor / per_row;
    let mut first_row = offset / per_row;
    if cursor_row < first_row {
        first_row = cursor_row;
    } else if cursor_row >= first_row + rows_visible {
        first_row = cursor_row + 1 - rows_visible;
    }
    first_row * per_row
}

/// Lay `rows` out as a grid of cards. Each card links to its row's index.
#[allow(clippy::too_many_arguments)]
pub fn draw_grid(
    frame: &mut Frame,
    state: &AppState,
    rows: &[Row],
    cursor: &mut Cursor,
    focused: bool,
    title: &str,
    hit: &mut HitMap,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme::FOCUSED_BORDER
        } else {
            theme::BORDER
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let per_row = cards_per_row(inner.width);
    let rows_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    hit.grid = Some(GridGeometry {
        per_row,
        visible: per_row * rows_visible,
    });

    if rows.is_empty() {
        *cursor = Cursor::default();
        frame.render_widget(
            Paragraph::new("Nothing here").style(Style::default().fg(theme::DIM)),
            inner,
        );
        return;
    }
    cursor.row = cursor.row.min(rows.len() - 1);
    cursor.offset = grid_offset(cursor.row, cursor.offset, per_row, rows_visible);

    for (slot, (index, row)) in rows
        .iter()
        .enumerate()
        .skip(cursor.offset)
        .take(per_row * rows_visible)
        .enumerate()
    {
        let rect = Rect::new(
            inner.x + (slot % per_row) as u16 * CARD_WIDTH,
            inner.y + (slot / per_row) as u16 * CARD_HEIGHT,
            CARD_WIDTH.min(inner.width),
            CARD_HEIGHT.min(inner.height),
        );
        let card = Card::from_row(row);
        let selected = state.selection.is_selected(&row.unique_id);
        draw_card(frame, &card, focused && index == cursor.row, selected, rect);
        hit.links.push((rect, Link::Card(index)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_scrolls_by_whole_rows() {
        // Four cards across, two rows on screen.
        assert_eq!(grid_offset(5, 0, 4, 2), 0);
        assert_eq!(grid_offset(9, 0, 4, 2), 4);
        assert_eq!(grid_offset(2, 8, 4, 2), 0);
        assert_eq!(grid_offset(10, 8, 4, 2), 8);
    }
}
