/// Keyboard and mouse event to action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::trace;

use super::action::Action;

/// Convert a key press into an action
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    trace!("KEY: {:?}", key);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') | KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('u') | KeyCode::Char('b') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp(1)),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),

        KeyCode::Char(']') | KeyCode::Char('n') | KeyCode::Tab => Some(Action::NextSection),
        KeyCode::Char('[') | KeyCode::Char('p') | KeyCode::BackTab => Some(Action::PreviousSection),

        _ => None,
    }
}

/// Convert a mouse wheel event into a scroll action
pub fn mouse_to_action(mouse: MouseEvent, scroll_lines: u16) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::ScrollDown(scroll_lines)),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp(scroll_lines)),
        _ => None,
    }
}
