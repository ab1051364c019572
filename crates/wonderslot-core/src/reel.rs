//! Reel state owned by the machine and the per-reel animation view.

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use crate::digit::{Digit, DigitSource};
use crate::timer::{TimerEvent, TimerGuard, TimerQueue};

/// What the machine knows about one reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReelState {
    pub is_animating: bool,
    pub displayed_digit: Digit,
    /// Digit the reel lands on once the spin settles.
    pub target_digit: Digit,
}

impl Default for ReelState {
    fn default() -> Self {
        Self {
            is_animating: false,
            displayed_digit: Digit::ONE,
            target_digit: Digit::ONE,
        }
    }
}

/// Visible face of one reel.
///
/// While its parent state says the reel is animating, the view resamples its
/// own digit on a repeating timer, independently of the target. The shown
/// digits are cosmetic; only the target decides the outcome.
#[derive(Debug)]
pub struct ReelView {
    index: usize,
    displayed: Digit,
    animating: bool,
    ticker: Option<TimerGuard>,
}

impl ReelView {
    /// Create the view for reel `index`, showing the parent's current digit.
    #[must_use]
    pub fn new(index: usize, state: &ReelState) -> Self {
        Self {
            index,
            displayed: state.displayed_digit,
            animating: false,
            ticker: None,
        }
    }

    /// Apply the parent's state.
    ///
    /// The running ticker is always cancelled first, so at most one
    /// repeating timer per reel exists at any time.
    pub fn sync(&mut self, state: &ReelState, timers: &TimerQueue, now: Duration, tick: Duration) {
        self.ticker = None;
        self.animating = state.is_animating;
        if state.is_animating {
            self.ticker = Some(timers.schedule_every(
                now,
                tick,
                TimerEvent::ReelTick { reel: self.index },
            ));
        } else {
            self.displayed = state.target_digit;
        }
    }

    /// Resample the displayed digit. Ignored once the reel has stopped.
    pub fn on_tick(&mut self, source: &mut dyn DigitSource) {
        if self.animating {
            self.displayed = source.next_digit();
            trace!(reel = self.index, digit = %self.displayed, "reel tick");
        }
    }

    /// Stop animating and release the ticker without changing the digit.
    pub fn stop(&mut self) {
        self.ticker = None;
        self.animating = false;
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn displayed(&self) -> Digit {
        self.displayed
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether a resampling timer is currently scheduled.
    #[must_use]
    pub fn has_active_timer(&self) -> bool {
        self.ticker.as_ref().is_some_and(TimerGuard::is_active)
    }
}
