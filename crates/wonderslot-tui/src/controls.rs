//! Outcome message region and the spin control.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use wonderslot_core::{Locale, Message};

use crate::styles::ColorTheme;

/// What the spin control should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinControl {
    pub enabled: bool,
    pub spinning: bool,
    pub cost: u32,
}

impl SpinControl {
    /// Text on the control: "ready" or "spinning" variant.
    #[must_use]
    pub fn label(&self, locale: Locale) -> String {
        let strings = locale.strings();
        if self.spinning {
            strings.spinning.to_string()
        } else {
            strings.spin_label(self.cost)
        }
    }
}

/// Render the win/loss line, or nothing.
pub fn render_message(
    frame: &mut Frame,
    area: Rect,
    message: Option<Message>,
    locale: Locale,
    theme: &ColorTheme,
) {
    let Some(message) = message else {
        return;
    };
    let style = match message {
        Message::Win => theme.success_style(),
        Message::Loss => theme.error_style(),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(message.text(locale), style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the spin control.
pub fn render_spin_button(
    frame: &mut Frame,
    area: Rect,
    control: SpinControl,
    locale: Locale,
    theme: &ColorTheme,
) {
    let icon = if control.spinning { "↻" } else { "▶" };
    let style = theme.button_style(control.enabled);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);

    let width = u16::try_from(control.label(locale).chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .min(area.width);
    let button = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(format!("{icon} "), style),
        Span::styled(control.label(locale), style),
    ]))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, button);
}
