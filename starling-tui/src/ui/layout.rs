use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use starling_core::{route::Route, starling_state::ColumnKey};

// ── Main vertical layout ────────────────────────────────────────────────────

pub const TITLE_BAR_HEIGHT: u16 = 1;
pub const CONTENT_MIN_HEIGHT: u16 = 3;
pub const HELP_BAR_HEIGHT: u16 = 1;

pub struct MainLayout {
    pub title_bar: Rect,
    pub content: Rect,
    pub help_bar: Rect,
}

pub fn split_main(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Min(CONTENT_MIN_HEIGHT),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);
    MainLayout {
        title_bar: chunks[0],
        content: chunks[1],
        help_bar: chunks[2],
    }
}

pub const QUEUE_WIDTH_PERCENT: u16 = 32;

/// Splits the content area into the page and the play queue beside it.
pub fn split_content(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - QUEUE_WIDTH_PERCENT),
            Constraint::Percentage(QUEUE_WIDTH_PERCENT),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Splits a detail page into its header and the table underneath.
pub fn split_detail(area: Rect, header_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(CONTENT_MIN_HEIGHT),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

// ── Now playing ─────────────────────────────────────────────────────────────

pub const TRACK_INFO_HEIGHT: u16 = 3;
pub const BIOGRAPHY_HEIGHT: u16 = 4;
pub const STRIP_HEIGHT: u16 = 6;

pub struct NowPlayingLayout {
    pub track_info: Rect,
    pub biography: Rect,
    pub similar: Rect,
    pub strip: Rect,
}

pub fn split_now_playing(area: Rect, biography_height: u16) -> NowPlayingLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TRACK_INFO_HEIGHT),
            Constraint::Length(biography_height),
            Constraint::Min(CONTENT_MIN_HEIGHT),
            Constraint::Length(STRIP_HEIGHT),
        ])
        .split(area);
    NowPlayingLayout {
        track_info: chunks[0],
        biography: chunks[1],
        similar: chunks[2],
        strip: chunks[3],
    }
}

// ── Cards ───────────────────────────────────────────────────────────────────

pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 4;
pub const STRIP_ARROW_WIDTH: u16 = 3;

/// How many cards fit across `width`.
pub fn cards_per_row(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

// ── Hit testing ─────────────────────────────────────────────────────────────

/// Where a table was drawn, recorded so that mouse events can be mapped back
/// to rows and columns.
#[derive(Debug, Clone, Default)]
pub struct TableGeometry {
    pub header: Rect,
    pub body: Rect,
    /// `(key, x, width)` of each visible column
    pub columns: Vec<(ColumnKey, u16, u16)>,
    pub row_height: u16,
    pub offset: usize,
    pub len: usize,
}
impl TableGeometry {
    pub fn column_at(&self, x: u16, y: u16) -> Option<ColumnKey> {
        if !self.header.contains(Position::new(x, y)) {
            return None;
        }
        self.columns
            .iter()
            .find(|(_, start, width)| x >= *start && x < start + width)
            .map(|(key, ..)| *key)
    }

    /// The index of the row under `(x, y)`, if there is one.
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.body.contains(Position::new(x, y)) {
            return None;
        }
        let index = self.offset + ((y - self.body.y) / self.row_height.max(1)) as usize;
        (index < self.len).then_some(index)
    }

    /// Rows that fit in the body.
    pub fn visible_rows(&self) -> usize {
        (self.body.height / self.row_height.max(1)) as usize
    }
}

/// Where a card grid was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridGeometry {
    pub per_row: usize,
    /// Cards that fit on screen
    pub visible: usize,
}

/// Something clickable outside a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Route(Route),
    /// The card at an index of the displayed rows
    Card(usize),
    Genre(String),
    Artist,
    Album,
    FavoritePage,
    Biography,
    /// The heart of a card in the latest albums strip
    CardFavorite(usize),
    StripPrevious,
    StripNext,
    PreviousPage,
    NextPage,
}

/// Everything clickable from the last frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub table: Option<TableGeometry>,
    pub queue: Option<TableGeometry>,
    pub grid: Option<GridGeometry>,
    pub links: Vec<(Rect, Link)>,
    pub strip_per_page: usize,
}
impl HitMap {
    pub fn link_at(&self, x: u16, y: u16) -> Option<&Link> {
        self.links
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(x, y)))
            .map(|(_, link)| link)
    }
}

// ── Interaction constants ───────────────────────────────────────────────────

pub const PAGE_SCROLL_SIZE: usize = 20;
pub const SCROLL_WHEEL_STEPS: usize = 3;
pub const COLUMN_RESIZE_STEP: i16 = 2;

// ── Log view ────────────────────────────────────────────────────────────────

pub const LOG_TARGET_WIDTH: usize = 24;
pub const LOG_TARGET_SUFFIX_LEN: usize = 21;

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> TableGeometry {
        TableGeometry {
            header: Rect::new(0, 2, 40, 1),
            body: Rect::new(0, 3, 40, 10),
            columns: vec![(ColumnKey::Index, 0, 4), (ColumnKey::Title, 5, 30)],
            row_height: 2,
            offset: 4,
            len: 8,
        }
    }

    #[test]
    fn test_row_at_accounts_for_offset_and_height() {
        let g = geometry();
        assert_eq!(g.row_at(1, 3), Some(4));
        assert_eq!(g.row_at(1, 4), Some(4));
        assert_eq!(g.row_at(1, 5), Some(5));
        assert_eq!(g.row_at(1, 9), Some(7));
        assert_eq!(g.row_at(1, 11), None);
        assert_eq!(g.row_at(1, 2), None);
        assert_eq!(g.visible_rows(), 5);
    }

    #[test]
    fn test_column_at_header_only() {
        let g = geometry();
        assert_eq!(g.column_at(6, 2), Some(ColumnKey::Title));
        assert_eq!(g.column_at(4, 2), None);
        assert_eq!(g.column_at(6, 3), None);
    }
}
