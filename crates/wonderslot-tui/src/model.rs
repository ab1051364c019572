//! TUI application model (Elm architecture).

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use wonderslot_core::{Locale, Message, SlotMachine, SpinOutcome};

use crate::controls::{render_message, render_spin_button, SpinControl};
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogScrollState};
use crate::messages::TuiMessage;
use crate::reels::render_reels;
use crate::styles::ColorTheme;

/// Log lines kept in memory.
const MAX_LOGS: usize = 500;

/// How often the event loop wakes up to advance timers and redraw.
const FRAME_INTERVAL: Duration = Duration::from_millis(25);

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub reels: Rect,
    pub message: Rect,
    pub button: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

/// TUI application state (Elm Model).
pub struct SlotApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Log lines shown in the log panel.
    pub logs: Vec<String>,
    pub log_scroll: LogScrollState,
    pub show_logs: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    machine: SlotMachine,
    locale: Locale,
    theme: ColorTheme,
    /// Time since the app started, as last seen by `tick`.
    clock: Duration,
    last_logged_spin: u64,
    game_over_logged: bool,
    rx: Receiver<TuiMessage>,
}

impl SlotApp {
    #[must_use]
    pub fn new(machine: SlotMachine, locale: Locale, rx: Receiver<TuiMessage>) -> Self {
        let mut app = Self {
            should_quit: false,
            logs: Vec::new(),
            log_scroll: LogScrollState::new(),
            show_logs: true,
            terminal_width: 80,
            terminal_height: 24,
            machine,
            locale,
            theme: ColorTheme::default(),
            clock: Duration::ZERO,
            last_logged_spin: 0,
            game_over_logged: false,
            rx,
        };
        app.note_game_over();
        app
    }

    #[must_use]
    pub fn machine(&self) -> &SlotMachine {
        &self.machine
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// State of the spin control.
    #[must_use]
    pub fn spin_control(&self) -> SpinControl {
        SpinControl {
            enabled: self.machine.can_spin() && !self.machine.is_game_over(),
            spinning: self.machine.is_spinning(),
            cost: self.machine.rules().spin_cost,
        }
    }

    /// Drain pending messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Log(line) => self.push_log(line),
            TuiMessage::Quit => self.should_quit = true,
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
        }
    }

    /// Bring the clock up to `now`, then handle `msg`.
    ///
    /// Input read after the frame wait must see the time it arrived at, so a
    /// spin settles a full delay after the key press.
    pub fn handle_message_at(&mut self, now: Duration, msg: TuiMessage) {
        self.tick(now);
        self.handle_message(msg);
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Spin => self.spin(),
            KeyAction::Quit | KeyAction::Cancel => self.should_quit = true,
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ScrollUp => self.log_scroll.scroll_up(),
            KeyAction::ScrollDown => self.log_scroll.scroll_down(self.logs.len()),
            KeyAction::PageUp => self.log_scroll.page_up(10),
            KeyAction::PageDown => self.log_scroll.page_down(10, self.logs.len()),
            KeyAction::Home => self.log_scroll.home(),
            KeyAction::End => self.log_scroll.end(self.logs.len()),
            KeyAction::None => {}
        }
    }

    /// Request a spin at the current clock. Refusals are expected while the
    /// control is disabled and only traced.
    fn spin(&mut self) {
        match self.machine.request_spin(self.clock) {
            Ok(_) => {
                let balance = self.machine.balance();
                self.push_log(format!("spin {}: balance {balance}", self.last_logged_spin + 1));
            }
            Err(reason) => debug!(%reason, "spin ignored"),
        }
    }

    /// Advance game time to `now` and log anything that settled.
    pub fn tick(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
        self.machine.advance(self.clock);

        if let Some(outcome) = self.machine.last_outcome() {
            if outcome.sequence > self.last_logged_spin {
                self.last_logged_spin = outcome.sequence;
                self.push_log(format_outcome(&outcome));
            }
        }
        self.note_game_over();
    }

    fn note_game_over(&mut self) {
        if !self.game_over_logged && self.machine.message() == Some(Message::Loss) {
            self.game_over_logged = true;
            self.push_log(format!("[ERROR] {}", Message::Loss.text(self.locale)));
        }
    }

    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
            self.log_scroll.on_trimmed(1);
        }
        self.log_scroll.on_new_message(self.logs.len());
    }

    /// Compute the dashboard layout.
    #[must_use]
    pub fn compute_layout(area: Rect) -> AppLayout {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(7), // reels
                Constraint::Length(1), // message
                Constraint::Length(3), // spin control
                Constraint::Min(0),    // logs
                Constraint::Length(2), // footer
            ])
            .split(area);

        AppLayout {
            header: rows[0],
            reels: rows[1],
            message: rows[2],
            button: rows[3],
            logs: rows[4],
            footer: rows[5],
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let layout = Self::compute_layout(frame.area());
        let strings = self.locale.strings();

        render_header(
            frame,
            layout.header,
            strings,
            self.machine.balance(),
            &self.theme,
        );
        render_reels(frame, layout.reels, self.machine.reel_views(), &self.theme);
        render_message(
            frame,
            layout.message,
            self.machine.message(),
            self.locale,
            &self.theme,
        );
        render_spin_button(
            frame,
            layout.button,
            self.spin_control(),
            self.locale,
            &self.theme,
        );
        if self.show_logs && layout.logs.height > 2 {
            render_logs(frame, layout.logs, &self.logs, self.log_scroll.offset);
        }
        render_footer(frame, layout.footer);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        self.machine.teardown();
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let started = Instant::now();
        loop {
            self.tick(started.elapsed());

            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key_event) => {
                        let msg = TuiMessage::KeyPress(map_key(key_event));
                        self.handle_message_at(started.elapsed(), msg);
                    }
                    Event::Resize(w, h) => {
                        self.handle_message(TuiMessage::Resize {
                            width: w,
                            height: h,
                        });
                    }
                    _ => {}
                }
            }

            // Messages from outside the loop (Ctrl+C handler)
            self.update();
        }
    }
}

fn format_outcome(outcome: &SpinOutcome) -> String {
    let [a, b, c] = outcome.targets;
    let prefix = if outcome.won { "[WIN] " } else { "" };
    format!(
        "{prefix}spin {}: {a} {b} {c} -> balance {}",
        outcome.sequence, outcome.balance_after
    )
}
