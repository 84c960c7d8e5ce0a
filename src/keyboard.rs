// Keyboard handling: terminal keys to session actions
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::screen_mode::ScreenMode;
use crate::session::Action;

pub fn map_key(screen: ScreenMode, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Global commands that work from ANY screen
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::F(2) => return Some(Action::ToggleScreen),
        KeyCode::Char('q') => return Some(Action::Quit),
        _ => {}
    }

    match screen {
        ScreenMode::Viewer => map_viewer_key(key),
        ScreenMode::Log => map_log_key(key),
    }
}

fn map_viewer_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Tab => Some(Action::NextDocument),
        KeyCode::BackTab => Some(Action::PrevDocument),
        KeyCode::Char(d) if d.is_ascii_digit() && key.modifiers.contains(KeyModifiers::ALT) => {
            d.to_digit(10).map(|n| Action::SelectDocument(n as usize))
        }
        KeyCode::Char(d) if d.is_ascii_digit() => Some(Action::InputDigit(d)),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Enter => Some(Action::CommitInput),
        KeyCode::Esc => Some(Action::CancelInput),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => Some(Action::NextPage),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => Some(Action::PrevPage),
        KeyCode::Home => Some(Action::FirstPage),
        KeyCode::End => Some(Action::LastPage),
        _ => None,
    }
}

fn map_log_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up => Some(Action::ScrollLog(-1)),
        KeyCode::Down => Some(Action::ScrollLog(1)),
        KeyCode::PageUp => Some(Action::ScrollLog(-10)),
        KeyCode::PageDown => Some(Action::ScrollLog(10)),
        KeyCode::Esc => Some(Action::ToggleScreen),
        _ => None,
    }
}
