use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use starling_core::view::table::{ContextMenu, ContextMenuItem};

use super::theme;

/// Cells before the first star of the rating item: the border and its label.
const STARS_OFFSET: u16 = 1 + "Set rating ".len() as u16;

/// Where the menu lands, kept inside `bounds`.
pub fn menu_rect(menu: &ContextMenu, bounds: Rect) -> Rect {
    let width = ContextMenu::WIDTH.min(bounds.width);
    let height = menu.height().min(bounds.height);
    let x = menu.x.min(bounds.right().saturating_sub(width));
    let y = menu.y.min(bounds.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

pub fn draw(frame: &mut Frame, menu: &ContextMenu, cursor: usize, bounds: Rect) {
    let area = menu_rect(menu, bounds);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::FOCUSED_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == cursor {
                Style::default()
                    .bg(theme::CURSOR_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT)
            };
            match item {
                ContextMenuItem::SetRating => Line::from(vec![
                    Span::styled(format!("{} ", item.label()), style),
                    Span::styled("☆☆☆☆☆", style.fg(theme::STARRED)),
                ]),
                _ => Line::from(Span::styled(item.label(), style)),
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The item under `(x, y)`. Clicking a star of the rating item also gives the
/// rating it stands for.
pub fn item_at(menu: &ContextMenu, bounds: Rect, x: u16, y: u16) -> Option<(ContextMenuItem, Option<u8>)> {
    let area = menu_rect(menu, bounds);
    if !area.contains(Position::new(x, y)) || y == area.y {
        return None;
    }
    let item = *menu.items.get((y - area.y - 1) as usize)?;
    let rating = match item {
        ContextMenuItem::SetRating => {
            let star = x.checked_sub(area.x + STARS_OFFSET)?;
            (star < 5).then_some(star as u8 + 1)
        }
        _ => None,
    };
    if item == ContextMenuItem::SetRating && rating.is_none() {
        return None;
    }
    Some((item, rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> ContextMenu {
        ContextMenu {
            x: 10,
            y: 5,
            items: vec![
                ContextMenuItem::Play,
                ContextMenuItem::SetRating,
                ContextMenuItem::ClearSelection,
            ],
        }
    }

    #[test]
    fn test_item_at_rows() {
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(item_at(&menu(), bounds, 12, 5), None);
        assert_eq!(
            item_at(&menu(), bounds, 12, 6),
            Some((ContextMenuItem::Play, None))
        );
        assert_eq!(
            item_at(&menu(), bounds, 12, 8),
            Some((ContextMenuItem::ClearSelection, None))
        );
    }

    #[test]
    fn test_stars_pick_rating() {
        let bounds = Rect::new(0, 0, 80, 24);
        let first_star = 10 + STARS_OFFSET;
        assert_eq!(
            item_at(&menu(), bounds, first_star + 2, 7),
            Some((ContextMenuItem::SetRating, Some(3)))
        );
        assert_eq!(item_at(&menu(), bounds, 12, 7), None);
    }

    #[test]
    fn test_menu_stays_on_screen() {
        let bounds = Rect::new(0, 0, 30, 6);
        let rect = menu_rect(&menu(), bounds);
        assert_eq!(rect, Rect::new(4, 1, ContextMenu::WIDTH, 5));
    }
}
