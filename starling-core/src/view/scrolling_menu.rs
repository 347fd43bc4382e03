use starling_state::{ItemId, Row, RowKind};

use crate::{route::Route, util::seconds_to_hms_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPrefix {
    Album,
    Artist,
    Playlist,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: ItemId,
    pub title: String,
    pub subtitle: Option<String>,
    pub cover_art: Option<String>,
    pub starred: bool,
    pub prefix: CardPrefix,
}
impl Card {
    pub fn from_row(row: &Row) -> Self {
        let (prefix, subtitle) = match &row.kind {
            RowKind::Album(a) => (
                CardPrefix::Album,
                a.year.map(|y| y.to_string()).or_else(|| a.artist.clone()),
            ),
            RowKind::Artist(a) => (CardPrefix::Artist, Some(format!("{} albums", a.album_count))),
            RowKind::Playlist(p) => (
                CardPrefix::Playlist,
                Some(format!(
                    "{} tracks, {}",
                    p.song_count,
                    seconds_to_hms_string(p.duration)
                )),
            ),
            RowKind::Track(t) => (CardPrefix::Album, t.artist.clone()),
        };
        let id = match &row.kind {
            RowKind::Track(t) => t.album_id.clone().unwrap_or_else(|| t.id.clone()),
            _ => row.id().clone(),
        };
        Self {
            id,
            title: row.title().to_string(),
            subtitle,
            cover_art: row.cover_art().map(str::to_string),
            starred: row.starred(),
            prefix,
        }
    }

    /// Where clicking the card goes: `prefix/<id>`.
    pub fn route(&self) -> Route {
        let id = self.id.clone();
        match self.prefix {
            CardPrefix::Album => Route::Album(id),
            CardPrefix::Artist => Route::Artist(id),
            CardPrefix::Playlist => Route::Playlist(id),
        }
    }
}

/// A titled horizontal strip of cards, scrolled a page at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollingMenu {
    pub title: String,
    pub cards: Vec<Card>,
    first_visible: usize,
}
impl ScrollingMenu {
    pub fn new(title: impl Into<String>, rows: &[Row]) -> Self {
        Self {
            title: title.into(),
            cards: rows.iter().map(Card::from_row).collect(),
            first_visible: 0,
        }
    }

    /// The cards that fit when `per_page` are shown at once.
    pub fn visible(&self, per_page: usize) -> &[Card] {
        let start = self.first_visible.min(self.cards.len());
        let end = (start + per_page).min(self.cards.len());
        &self.cards[start..end]
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// The left arrow is disabled while the first card is visible.
    pub fn can_scroll_prev(&self) -> bool {
        self.first_visible > 0
    }

    /// The right arrow is disabled while the last card is visible.
    pub fn can_scroll_next(&self, per_page: usize) -> bool {
        self.first_visible + per_page < self.cards.len()
    }

    pub fn scroll_prev(&mut self, per_page: usize) {
        self.first_visible = self.first_visible.saturating_sub(per_page.max(1));
    }

    pub fn scroll_next(&mut self, per_page: usize) {
        if self.can_scroll_next(per_page) {
            let last_start = self.cards.len().saturating_sub(per_page);
            self.first_visible = (self.first_visible + per_page.max(1)).min(last_start);
        }
    }

    /// The card at `index` within the visible page.
    pub fn click(&self, per_page: usize, index: usize) -> Option<Route> {
        self.visible(per_page).get(index).map(Card::route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starling_state::Album;

    fn menu(n: usize) -> ScrollingMenu {
        let rows: Vec<Row> = (0..n)
            .map(|i| Row::new(RowKind::Album(Album::new(format!("al{i}"), format!("Album {i}")))))
            .collect();
        ScrollingMenu::new("Latest albums", &rows)
    }

    #[test]
    fn test_arrows_follow_visibility() {
        let mut menu = menu(7);
        assert!(!menu.can_scroll_prev());
        assert!(menu.can_scroll_next(3));

        menu.scroll_next(3);
        assert_eq!(menu.first_visible(), 3);
        menu.scroll_next(3);
        assert_eq!(menu.first_visible(), 4);
        assert!(!menu.can_scroll_next(3));
        assert_eq!(menu.visible(3).len(), 3);

        menu.scroll_prev(3);
        menu.scroll_prev(3);
        assert_eq!(menu.first_visible(), 0);
        assert!(!menu.can_scroll_prev());
    }

    #[test]
    fn test_short_strip_has_no_arrows() {
        let menu = menu(2);
        assert!(!menu.can_scroll_prev());
        assert!(!menu.can_scroll_next(5));
        assert_eq!(
            menu.click(5, 1),
            Some(Route::Album(ItemId::from("al1")))
        );
        assert_eq!(menu.click(5, 2), None);
    }
}
