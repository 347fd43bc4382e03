use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use starling_core::view::NowPlayingView;

use super::{
    LinkLine, cards,
    layout::{
        BIOGRAPHY_HEIGHT, CARD_HEIGHT, CARD_WIDTH, Link, STRIP_ARROW_WIDTH, split_now_playing,
    },
    link_style,
    pages::{PageContext, draw_placeholder, header_line},
    theme,
};

/// How much taller the biography gets when expanded.
const EXPANDED_BIOGRAPHY_FACTOR: u16 = 3;

pub fn draw(frame: &mut Frame, ctx: &mut PageContext, view: &NowPlayingView, area: Rect) {
    let Some(track) = NowPlayingView::current_track(ctx.state) else {
        frame.render_widget(
            Paragraph::new("Nothing is playing. Double-click a track to start.")
                .style(Style::default().fg(theme::DIM)),
            area,
        );
        return;
    };

    let biography_height = if view.expanded_biography {
        BIOGRAPHY_HEIGHT * EXPANDED_BIOGRAPHY_FACTOR
    } else {
        BIOGRAPHY_HEIGHT
    };
    let layout = split_now_playing(area, biography_height);

    // Track info
    let heart = if track.starred { "♥ " } else { "" };
    LinkLine::new()
        .text(format!(" {heart}"), Style::default().fg(theme::STARRED))
        .text(
            track.title.clone(),
            Style::default()
                .fg(theme::PLAYING)
                .add_modifier(Modifier::BOLD),
        )
        .text(
            format!("   {}", track.artist.as_deref().unwrap_or("Unknown artist")),
            Style::default().fg(theme::TEXT),
        )
        .draw(frame, ctx.hit, header_line(layout.track_info, 0));

    let mut details = LinkLine::new().text(" ", Style::default());
    if let Some(album) = &track.album {
        details = details
            .link(album.clone(), link_style(), Link::Album)
            .text("  ", Style::default());
    }
    if let Some(genre) = &track.genre {
        details = details
            .link(genre.clone(), link_style(), Link::Genre(genre.clone()))
            .text("  ", Style::default());
    }
    if let Some(year) = track.year {
        details = details.text(year.to_string(), Style::default().fg(theme::DIM));
    }
    details.draw(frame, ctx.hit, header_line(layout.track_info, 1));

    // Biography
    let toggle = if view.expanded_biography {
        " Biography (less) "
    } else {
        " Biography (more) "
    };
    let block = Block::default()
        .title(toggle)
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme::BORDER));
    let bio_inner = block.inner(layout.biography);
    frame.render_widget(block, layout.biography);
    ctx.hit.links.push((
        Rect::new(
            layout.biography.x,
            layout.biography.y,
            (toggle.len() as u16).min(layout.biography.width),
            layout.biography.height.min(1),
        ),
        Link::Biography,
    ));
    match view.biography(ctx.state) {
        Some(text) => draw_biography(frame, text, bio_inner),
        None => {
            let placeholder = view
                .artist_status(ctx.state)
                .is_some_and(|status| draw_placeholder(frame, status, bio_inner));
            if !placeholder {
                draw_biography(frame, "No biography available.".to_string(), bio_inner);
            }
        }
    }

    // Similar songs
    let rows = view.similar_rows(ctx.state);
    ctx.draw_table(
        frame,
        &view.similar,
        &rows,
        "Similar songs",
        "No similar songs",
        layout.similar,
    );

    draw_strip(frame, ctx, view, layout.strip);
}

fn draw_biography(frame: &mut Frame, text: String, area: Rect) {
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme::TEXT))
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Cards that fit beside the two arrows.
pub fn strip_per_page(width: u16) -> usize {
    (width.saturating_sub(2 * STRIP_ARROW_WIDTH) / CARD_WIDTH).max(1) as usize
}

fn draw_strip(frame: &mut Frame, ctx: &mut PageContext, view: &NowPlayingView, area: Rect) {
    let menu = &view.latest_albums;
    let block = Block::default()
        .title(format!(" {} ", menu.title))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if menu.cards.is_empty() {
        return;
    }

    let per_page = strip_per_page(inner.width);
    ctx.hit.strip_per_page = per_page;

    let arrow_y = inner.y + inner.height / 2;
    let arrow = |enabled: bool, text: &'static str| {
        let style = if enabled {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM)
        };
        Paragraph::new(Line::styled(text, style))
    };
    let left = Rect::new(inner.x, arrow_y, STRIP_ARROW_WIDTH, inner.height.min(1));
    let right = Rect::new(
        inner.right().saturating_sub(STRIP_ARROW_WIDTH),
        arrow_y,
        STRIP_ARROW_WIDTH,
        inner.height.min(1),
    );
    frame.render_widget(arrow(menu.can_scroll_prev(), " ◀ "), left);
    frame.render_widget(arrow(menu.can_scroll_next(per_page), " ▶ "), right);
    if menu.can_scroll_prev() {
        ctx.hit.links.push((left, Link::StripPrevious));
    }
    if menu.can_scroll_next(per_page) {
        ctx.hit.links.push((right, Link::StripNext));
    }

    for (i, card) in menu.visible(per_page).iter().enumerate() {
        let rect = Rect::new(
            inner.x + STRIP_ARROW_WIDTH + i as u16 * CARD_WIDTH,
            inner.y,
            CARD_WIDTH,
            CARD_HEIGHT.min(inner.height),
        );
        cards::draw_card(frame, card, false, false, rect);
        // The heart corner stars the album, the rest opens it.
        let heart = Rect::new(rect.x + 1, rect.y + 1, 2, rect.height.min(1));
        ctx.hit
            .links
            .push((heart, Link::CardFavorite(menu.first_visible() + i)));
        ctx.hit.links.push((rect, Link::Route(card.route())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fits_cards_between_arrows() {
        assert_eq!(strip_per_page(2 * STRIP_ARROW_WIDTH + 3 * CARD_WIDTH + 5), 3);
        assert_eq!(strip_per_page(10), 1);
    }
}
