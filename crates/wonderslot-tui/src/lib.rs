//! # wonderslot-tui
//!
//! Interactive slot machine dashboard using ratatui with Elm architecture.

pub mod controls;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod reels;
pub mod styles;

pub use keymap::KeyAction;
pub use logs::LogScrollState;
pub use messages::TuiMessage;
pub use model::SlotApp;
pub use styles::ColorTheme;
