use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{keys::Action, log_buffer::LogBuffer};

use super::{
    layout::{LOG_TARGET_SUFFIX_LEN, LOG_TARGET_WIDTH, PAGE_SCROLL_SIZE},
    theme,
};

pub struct LogsState {
    pub log_buffer: LogBuffer,
    pub scroll_offset: usize,
}
impl LogsState {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            log_buffer,
            scroll_offset: 0,
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = self.log_buffer.len().saturating_sub(1);
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.log_buffer.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
    }
}

pub fn draw(frame: &mut Frame, logs: &mut LogsState, area: Rect) {
    let entries = logs.log_buffer.get_entries();

    let block = Block::default()
        .title(format!(" Logs ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::FOCUSED_BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new("No log entries").style(Style::default().fg(theme::DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let (level_str, level_color) = match entry.level {
                tracing::Level::ERROR => ("ERR", Color::Red),
                tracing::Level::WARN => ("WRN", Color::Yellow),
                tracing::Level::INFO => ("INF", Color::Cyan),
                tracing::Level::DEBUG => ("DBG", Color::Green),
                tracing::Level::TRACE => ("TRC", theme::DIM),
            };

            let target = truncate_target(&entry.target);

            let line = Line::from(vec![
                Span::styled(
                    level_str,
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{target:width$}", width = LOG_TARGET_WIDTH),
                    Style::default().fg(theme::DIM),
                ),
                Span::raw(" "),
                Span::styled(entry.message.clone(), Style::default().fg(theme::TEXT)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(theme::CURSOR_BG)
            .add_modifier(Modifier::BOLD),
    );

    let max_offset = entries.len().saturating_sub(1);
    logs.scroll_offset = logs.scroll_offset.min(max_offset);

    let mut state = ListState::default();
    state.select(Some(logs.scroll_offset));
    frame.render_stateful_widget(list, inner, &mut state);
}

/// Keep the end of long module paths, which is the informative part.
fn truncate_target(target: &str) -> String {
    if target.len() <= LOG_TARGET_WIDTH {
        return target.to_string();
    }
    let mut start = target.len() - LOG_TARGET_SUFFIX_LEN;
    while !target.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &target[start..])
}

pub enum LogsAction {
    SwitchPanel,
    Quit,
}

pub fn handle_key(logs: &mut LogsState, action: Action) -> Option<LogsAction> {
    let page = PAGE_SCROLL_SIZE as isize;
    match action {
        Action::SwitchPanel => return Some(LogsAction::SwitchPanel),
        Action::Quit => return Some(LogsAction::Quit),
        Action::MoveUp => logs.scroll_by(-1),
        Action::MoveDown => logs.scroll_by(1),
        Action::PageUp => logs.scroll_by(-page),
        Action::PageDown => logs.scroll_by(page),
        Action::GotoTop => logs.scroll_offset = 0,
        Action::GotoBottom => logs.scroll_to_end(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_targets_keep_their_suffix() {
        assert_eq!(truncate_target("starling_core"), "starling_core");
        let long = "starling_core::view::now_playing::strip";
        let truncated = truncate_target(long);
        assert_eq!(truncated.len(), LOG_TARGET_SUFFIX_LEN + 3);
        assert!(truncated.ends_with("now_playing::strip"));
    }

    #[test]
    fn test_scroll_clamps_to_entries() {
        let mut logs = LogsState::new(LogBuffer::new());
        logs.scroll_by(5);
        assert_eq!(logs.scroll_offset, 0);
        assert!(handle_key(&mut logs, Action::Quit).is_some());
        assert!(handle_key(&mut logs, Action::PageDown).is_none());
    }
}
