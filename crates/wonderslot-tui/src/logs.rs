//! Scrollable log panel with navigation.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Scroll state for the log panel.
#[derive(Debug, Clone)]
pub struct LogScrollState {
    /// First visible line index.
    pub offset: usize,
    /// Whether auto-scroll to bottom is enabled.
    pub auto_scroll: bool,
}

impl LogScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Follow the newest line if auto-scroll is on.
    pub fn on_new_message(&mut self, total_logs: usize) {
        if self.auto_scroll {
            self.offset = total_logs.saturating_sub(1);
        }
    }

    /// Keep the offset pointing at the same line after `removed` lines were
    /// dropped from the front.
    pub fn on_trimmed(&mut self, removed: usize) {
        self.offset = self.offset.saturating_sub(removed);
    }

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, total_logs: usize) {
        self.offset = (self.offset + 1).min(total_logs.saturating_sub(1));
        if self.offset >= total_logs.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize, total_logs: usize) {
        self.offset = (self.offset + page_size).min(total_logs.saturating_sub(1));
        if self.offset >= total_logs.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    /// Jump to top.
    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    /// Jump to bottom.
    pub fn end(&mut self, total_logs: usize) {
        self.auto_scroll = true;
        self.offset = total_logs.saturating_sub(1);
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the scrollable log panel.
///
/// The offset points at the line the view is anchored on; the panel shows
/// the page ending at that line so the newest entry stays visible while
/// following.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &[String], scroll_offset: usize) {
    let visible_height = area.height.saturating_sub(2) as usize; // account for borders
    let total = logs.len();
    let first = (scroll_offset + 1).saturating_sub(visible_height);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(first)
        .take(visible_height)
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                Style::default().fg(Color::Red)
            } else if log.starts_with("[WIN]") {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let title = if total > visible_height {
        let pct = (scroll_offset * 100) / total.saturating_sub(1).max(1);
        format!(" Log ({pct}%) ")
    } else {
        " Log ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}
