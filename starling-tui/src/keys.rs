use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smol_str::{SmolStr, ToSmolStr};

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    ColumnLeft,
    ColumnRight,
    Sort,
    SortDirection,
    ClearSort,
    WidenColumn,
    NarrowColumn,
    RowHeight,
    Select,
    ToggleSelect,
    SelectAll,
    Back,
    GoBack,
    Favorite,
    FavoritePage,
    Rate(u8),
    Play,
    PlayNext,
    PlayLater,
    PlayPause,
    NextTrack,
    PreviousTrack,
    Download,
    CopyLinks,
    Search,
    ViewType,
    NewPlaylist,
    SwitchPanel,
    ContextMenu,
    Albums,
    Playlists,
    NowPlaying,
    CycleFilter,
    PreviousPage,
    NextPage,
    Refresh,
    Genre,
    Artist,
    Album,
    Biography,
    ClearLine,
    Char(char),
    DeleteChar,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_GO_BACK: KeyCode = KeyCode::Backspace;
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_LEFT: KeyCode = KeyCode::Left;
pub const KEY_RIGHT: KeyCode = KeyCode::Right;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;
pub const KEY_SWITCH_PANEL: KeyCode = KeyCode::Tab;
pub const KEY_DELETE_CHAR: KeyCode = KeyCode::Backspace;
pub const KEY_SORT: KeyCode = KeyCode::Char('o');
pub const KEY_SORT_DIRECTION: KeyCode = KeyCode::Char('O');
pub const KEY_CLEAR_SORT: KeyCode = KeyCode::Char('u');
pub const KEY_WIDEN: KeyCode = KeyCode::Char(']');
pub const KEY_NARROW: KeyCode = KeyCode::Char('[');
pub const KEY_ROW_HEIGHT: KeyCode = KeyCode::Char('H');
pub const KEY_TOGGLE_SELECT: KeyCode = KeyCode::Char('s');
pub const KEY_FAVORITE: KeyCode = KeyCode::Char('f');
pub const KEY_FAVORITE_PAGE: KeyCode = KeyCode::Char('F');
pub const KEY_PLAY: KeyCode = KeyCode::Char('p');
pub const KEY_PLAY_NEXT: KeyCode = KeyCode::Char('n');
pub const KEY_PLAY_LATER: KeyCode = KeyCode::Char('l');
pub const KEY_PLAY_PAUSE: KeyCode = KeyCode::Char(' ');
pub const KEY_NEXT_TRACK: KeyCode = KeyCode::Char('>');
pub const KEY_PREVIOUS_TRACK: KeyCode = KeyCode::Char('<');
pub const KEY_DOWNLOAD: KeyCode = KeyCode::Char('d');
pub const KEY_COPY_LINKS: KeyCode = KeyCode::Char('c');
pub const KEY_SEARCH: KeyCode = KeyCode::Char('/');
pub const KEY_VIEW_TYPE: KeyCode = KeyCode::Char('v');
pub const KEY_NEW_PLAYLIST: KeyCode = KeyCode::Char('N');
pub const KEY_CONTEXT_MENU: KeyCode = KeyCode::Char('m');
pub const KEY_ALBUMS: KeyCode = KeyCode::Char('a');
pub const KEY_PLAYLISTS: KeyCode = KeyCode::Char('P');
pub const KEY_NOW_PLAYING: KeyCode = KeyCode::Char('i');
pub const KEY_CYCLE_FILTER: KeyCode = KeyCode::Char('t');
pub const KEY_PREVIOUS_PAGE: KeyCode = KeyCode::Char(',');
pub const KEY_NEXT_PAGE: KeyCode = KeyCode::Char('.');
pub const KEY_REFRESH: KeyCode = KeyCode::Char('R');
pub const KEY_GENRE: KeyCode = KeyCode::Char('g');
pub const KEY_ARTIST: KeyCode = KeyCode::Char('A');
pub const KEY_ALBUM: KeyCode = KeyCode::Char('B');
pub const KEY_BIOGRAPHY: KeyCode = KeyCode::Char('b');

/// Resolve a key event into an action while browsing a page or the queue.
pub fn browse_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => Some(Action::SelectAll),
            _ => None,
        };
    }
    Some(match key.code {
        KEY_QUIT => Action::Quit,
        KEY_UP => Action::MoveUp,
        KEY_DOWN => Action::MoveDown,
        KEY_LEFT => Action::ColumnLeft,
        KEY_RIGHT => Action::ColumnRight,
        KEY_PAGE_UP => Action::PageUp,
        KEY_PAGE_DOWN => Action::PageDown,
        KEY_GOTO_TOP => Action::GotoTop,
        KEY_GOTO_BOTTOM => Action::GotoBottom,
        KEY_SELECT => Action::Select,
        KEY_BACK => Action::Back,
        KEY_GO_BACK => Action::GoBack,
        KEY_SWITCH_PANEL => Action::SwitchPanel,
        KEY_SORT => Action::Sort,
        KEY_SORT_DIRECTION => Action::SortDirection,
        KEY_CLEAR_SORT => Action::ClearSort,
        KEY_WIDEN => Action::WidenColumn,
        KEY_NARROW => Action::NarrowColumn,
        KEY_ROW_HEIGHT => Action::RowHeight,
        KEY_TOGGLE_SELECT => Action::ToggleSelect,
        KEY_FAVORITE => Action::Favorite,
        KEY_FAVORITE_PAGE => Action::FavoritePage,
        KEY_PLAY => Action::Play,
        KEY_PLAY_NEXT => Action::PlayNext,
        KEY_PLAY_LATER => Action::PlayLater,
        KEY_PLAY_PAUSE => Action::PlayPause,
        KEY_NEXT_TRACK => Action::NextTrack,
        KEY_PREVIOUS_TRACK => Action::PreviousTrack,
        KEY_DOWNLOAD => Action::Download,
        KEY_COPY_LINKS => Action::CopyLinks,
        KEY_SEARCH => Action::Search,
        KEY_VIEW_TYPE => Action::ViewType,
        KEY_NEW_PLAYLIST => Action::NewPlaylist,
        KEY_CONTEXT_MENU => Action::ContextMenu,
        KEY_ALBUMS => Action::Albums,
        KEY_PLAYLISTS => Action::Playlists,
        KEY_NOW_PLAYING => Action::NowPlaying,
        KEY_CYCLE_FILTER => Action::CycleFilter,
        KEY_PREVIOUS_PAGE => Action::PreviousPage,
        KEY_NEXT_PAGE => Action::NextPage,
        KEY_REFRESH => Action::Refresh,
        KEY_GENRE => Action::Genre,
        KEY_ARTIST => Action::Artist,
        KEY_ALBUM => Action::Album,
        KEY_BIOGRAPHY => Action::Biography,
        KeyCode::Char(c @ '0'..='5') => Action::Rate(c as u8 - b'0'),
        _ => return None,
    })
}

/// Resolve a key event into an action while typing into a text box.
pub fn input_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK => Some(Action::Back),
        KEY_SELECT => Some(Action::Select),
        KEY_DELETE_CHAR => Some(Action::DeleteChar),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                Some(Action::ClearLine)
            } else {
                Some(Action::Char(c))
            }
        }
        _ => None,
    }
}

/// Resolve a key event into an action while a context menu is open.
pub fn menu_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_CONTEXT_MENU => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_SELECT => Some(Action::Select),
        KeyCode::Char(c @ '0'..='5') => Some(Action::Rate(c as u8 - b'0')),
        _ => None,
    }
}

/// Resolve a key event into an action in the logs panel.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_SWITCH_PANEL => Some(Action::SwitchPanel),
        KEY_QUIT => Some(Action::Quit),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

impl Action {
    /// Label shown in the help bar. Returns `None` for actions that
    /// shouldn't appear (navigation, text input, etc.).
    pub fn help_label(&self) -> Option<(SmolStr, &'static str)> {
        let (key, desc) = match self {
            Action::Quit => (KEY_QUIT, "quit"),
            Action::Select => (KEY_SELECT, "play/open"),
            Action::Back => (KEY_BACK, "clear/back"),
            Action::SwitchPanel => (KEY_SWITCH_PANEL, "panel"),
            Action::Sort => (KEY_SORT, "sort"),
            Action::Favorite => (KEY_FAVORITE, "fav"),
            Action::Rate(_) => return Some(("0-5".into(), "rate")),
            Action::Play => (KEY_PLAY, "play"),
            Action::PlayNext => (KEY_PLAY_NEXT, "next"),
            Action::PlayLater => (KEY_PLAY_LATER, "later"),
            Action::Download => (KEY_DOWNLOAD, "download"),
            Action::CopyLinks => (KEY_COPY_LINKS, "copy links"),
            Action::Search => (KEY_SEARCH, "search"),
            Action::ViewType => (KEY_VIEW_TYPE, "view"),
            Action::NewPlaylist => (KEY_NEW_PLAYLIST, "new playlist"),
            Action::ContextMenu => (KEY_CONTEXT_MENU, "menu"),
            Action::Albums => (KEY_ALBUMS, "albums"),
            Action::Playlists => (KEY_PLAYLISTS, "playlists"),
            Action::NowPlaying => (KEY_NOW_PLAYING, "now playing"),
            Action::CycleFilter => (KEY_CYCLE_FILTER, "filter"),
            Action::NextPage => (KEY_NEXT_PAGE, "page+"),
            Action::PreviousPage => (KEY_PREVIOUS_PAGE, "page-"),
            Action::Genre => (KEY_GENRE, "genre"),
            Action::Artist => (KEY_ARTIST, "artist"),
            Action::Album => (KEY_ALBUM, "album"),
            Action::Biography => (KEY_BIOGRAPHY, "bio"),
            Action::MoveUp => (KEY_UP, "up"),
            Action::MoveDown => (KEY_DOWN, "down"),
            _ => return None,
        };
        let key = match key {
            KeyCode::Char(' ') => "space".into(),
            KeyCode::Enter => "enter".into(),
            KeyCode::Esc => "esc".into(),
            KeyCode::Tab => "tab".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => other.to_smolstr(),
        };
        Some((key, desc))
    }
}

pub const ALBUM_LIST_HELP: &[Action] = &[
    Action::Quit,
    Action::Select,
    Action::CycleFilter,
    Action::PreviousPage,
    Action::NextPage,
    Action::ViewType,
    Action::Favorite,
    Action::Search,
    Action::Playlists,
    Action::NowPlaying,
    Action::SwitchPanel,
];

pub const TRACK_LIST_HELP: &[Action] = &[
    Action::Quit,
    Action::Back,
    Action::Select,
    Action::Play,
    Action::PlayNext,
    Action::PlayLater,
    Action::Favorite,
    Action::Rate(0),
    Action::Sort,
    Action::ContextMenu,
    Action::Search,
    Action::SwitchPanel,
];

pub const ALBUM_HELP: &[Action] = &[
    Action::Quit,
    Action::Back,
    Action::Select,
    Action::Play,
    Action::Favorite,
    Action::Rate(0),
    Action::Download,
    Action::CopyLinks,
    Action::Genre,
    Action::Artist,
    Action::ContextMenu,
    Action::SwitchPanel,
];

pub const PLAYLIST_LIST_HELP: &[Action] = &[
    Action::Quit,
    Action::Select,
    Action::NewPlaylist,
    Action::ViewType,
    Action::Sort,
    Action::Search,
    Action::Albums,
    Action::NowPlaying,
    Action::SwitchPanel,
];

pub const NOW_PLAYING_HELP: &[Action] = &[
    Action::Quit,
    Action::Back,
    Action::Select,
    Action::Favorite,
    Action::Biography,
    Action::PreviousPage,
    Action::NextPage,
    Action::Genre,
    Action::Album,
    Action::ContextMenu,
    Action::SwitchPanel,
];

pub const INPUT_HELP: &[Action] = &[Action::Back, Action::Select];

pub const MENU_HELP: &[Action] = &[
    Action::Back,
    Action::MoveUp,
    Action::MoveDown,
    Action::Select,
    Action::Rate(0),
];

pub const LOGS_HELP: &[Action] = &[
    Action::SwitchPanel,
    Action::MoveUp,
    Action::MoveDown,
    Action::Quit,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_rate() {
        assert_eq!(
            browse_action(&key(KeyCode::Char('4'))),
            Some(Action::Rate(4))
        );
        assert_eq!(browse_action(&key(KeyCode::Char('6'))), None);
    }

    #[test]
    fn test_ctrl_a_selects_all() {
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(browse_action(&event), Some(Action::SelectAll));
        assert_eq!(
            browse_action(&key(KeyCode::Char('a'))),
            Some(Action::Albums)
        );
    }

    #[test]
    fn test_input_takes_command_letters() {
        assert_eq!(
            input_action(&key(KeyCode::Char('q'))),
            Some(Action::Char('q'))
        );
        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input_action(&clear), Some(Action::ClearLine));
    }
}
