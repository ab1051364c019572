//! TUI message types (Elm Messages).

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// Log line for the log panel.
    Log(String),
    /// Quit the application.
    Quit,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(KeyAction),
}
