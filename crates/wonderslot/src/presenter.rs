//! Headless result presenter.

use serde::Serialize;

use wonderslot_core::{AutoplaySummary, Locale, Message, SpinObserver, SpinOutcome, SpinRejected};

/// One JSON line of headless output.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Record<'a> {
    Spin(&'a SpinOutcome),
    Summary(&'a AutoplaySummary),
}

/// Prints autoplay progress to stdout, as text or JSON lines.
pub struct HeadlessPresenter {
    locale: Locale,
    json: bool,
}

impl HeadlessPresenter {
    #[must_use]
    pub fn new(locale: Locale, json: bool) -> Self {
        Self { locale, json }
    }

    /// Print the final summary line.
    pub fn present_summary(&self, summary: &AutoplaySummary) {
        if self.json {
            print_json(&Record::Summary(summary));
        } else {
            println!("{}", format_summary(summary, self.locale));
        }
    }
}

impl SpinObserver for HeadlessPresenter {
    fn on_spin(&self, outcome: &SpinOutcome) {
        if self.json {
            print_json(&Record::Spin(outcome));
        } else {
            println!("{}", format_spin(outcome, self.locale));
        }
    }

    fn on_rejected(&self, reason: &SpinRejected) {
        tracing::info!(%reason, "headless play finished");
    }
}

fn print_json(record: &Record<'_>) {
    match serde_json::to_string(record) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!(%err, "cannot serialize record"),
    }
}

/// Text line for one settled spin, e.g. `#3   4 4 4  Balance: 100 points  Congratulations! You won!`.
#[must_use]
pub fn format_spin(outcome: &SpinOutcome, locale: Locale) -> String {
    let strings = locale.strings();
    let [a, b, c] = outcome.targets;
    let mut line = format!(
        "#{:<3} {a} {b} {c}  {}",
        outcome.sequence,
        strings.balance_line(outcome.balance_after)
    );
    if outcome.won {
        line.push_str("  ");
        line.push_str(Message::Win.text(locale));
    }
    line
}

/// Closing line of a headless session.
#[must_use]
pub fn format_summary(summary: &AutoplaySummary, locale: Locale) -> String {
    let strings = locale.strings();
    let mut line = format!(
        "spins: {}, wins: {}, {}",
        summary.spins,
        summary.wins,
        strings.balance_line(summary.final_balance)
    );
    if summary.game_over {
        line.push_str(". ");
        line.push_str(Message::Loss.text(locale));
    }
    line
}
