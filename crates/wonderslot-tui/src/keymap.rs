//! Keyboard shortcut handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Spin,
    Quit,
    Cancel,
    ToggleLogs,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    None,
}

/// Map a key event to an action.
///
/// Release events are ignored so a single press never spins twice on
/// terminals that report both edges.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Cancel,
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Spin,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('l') => KeyAction::ToggleLogs,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        _ => KeyAction::None,
    }
}
