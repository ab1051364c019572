//! TUI header panel: title and balance.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use wonderslot_core::Strings;

use crate::styles::ColorTheme;

/// Render the header panel.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    strings: &Strings,
    balance: u32,
    theme: &ColorTheme,
) {
    let text = vec![Line::from(vec![
        Span::raw(format!("{}: ", strings.balance)),
        Span::styled(balance.to_string(), theme.balance_style()),
        Span::raw(format!(" {}", strings.points)),
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .title(Span::styled(
            format!(" ✦ {} ✦ ", strings.title),
            theme.header_style(),
        ))
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
