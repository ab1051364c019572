//! The three reel boxes.

use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use wonderslot_core::ReelView;

use crate::styles::ColorTheme;

/// Width of one reel box including borders.
pub const REEL_WIDTH: u16 = 9;

/// Split `area` into one centered column per reel.
#[must_use]
pub fn reel_columns(area: Rect, count: usize) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .spacing(2)
        .constraints(vec![Constraint::Length(REEL_WIDTH); count])
        .split(area)
        .to_vec()
}

/// Render every reel. Moving reels are drawn blurred, settled ones bold.
pub fn render_reels(frame: &mut Frame, area: Rect, views: &[ReelView], theme: &ColorTheme) {
    for (view, column) in views.iter().zip(reel_columns(area, views.len())) {
        let animating = view.is_animating();
        let digit_style = if animating {
            theme.reel_blurred_style()
        } else {
            theme.reel_settled_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.reel_border_style(animating));

        let inner_height = column.height.saturating_sub(2);
        let mut lines = vec![Line::raw(""); usize::from(inner_height / 2)];
        lines.push(Line::from(Span::styled(
            view.displayed().to_string(),
            digit_style,
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, column);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::style::Modifier;
    use ratatui::Terminal;
    use wonderslot_core::{GameRules, RandomSource, ScriptedSource, SlotMachine};

    fn machine(script: &[u8]) -> SlotMachine {
        SlotMachine::with_sources(
            GameRules::default(),
            Box::new(ScriptedSource::from_values(script).unwrap()),
            Box::new(RandomSource::seeded(5)),
        )
    }

    fn draw(machine: &SlotMachine) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(40, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        let buffer = terminal
            .draw(|frame| {
                let area = frame.area();
                render_reels(frame, area, machine.reel_views(), &ColorTheme::default());
            })
            .unwrap()
            .buffer
            .clone();
        buffer
    }

    fn row(buf: &ratatui::buffer::Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn columns_are_centered() {
        let cols = reel_columns(Rect::new(0, 0, 40, 7), 3);
        assert_eq!(cols.len(), 3);
        assert!(cols.iter().all(|c| c.width == REEL_WIDTH));
        assert!(cols[0].x > 0);
        assert!(cols[2].x + cols[2].width < 40);
    }

    #[test]
    fn settled_reels_show_targets() {
        let mut m = machine(&[3, 7, 2]);
        m.request_spin(Duration::ZERO).unwrap();
        m.advance(Duration::from_secs(3));
        let buf = draw(&m);
        let middle = row(&buf, 3);
        let digits: String = middle.chars().filter(char::is_ascii_digit).collect();
        assert_eq!(digits, "372");
    }

    #[test]
    fn spinning_reels_are_blurred() {
        let mut m = machine(&[1, 1, 1]);
        m.request_spin(Duration::ZERO).unwrap();
        let buf = draw(&m);
        let col = reel_columns(Rect::new(0, 0, 40, 7), 3)[0];
        let cell = &buf[(col.x + REEL_WIDTH / 2, 3)];
        assert!(cell.modifier.contains(Modifier::ITALIC));
    }
}
