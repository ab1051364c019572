//! Headless play on a virtual clock.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::machine::{SlotMachine, SpinOutcome, SpinRejected};

/// Receives events as autoplay runs.
pub trait SpinObserver {
    /// A spin has settled.
    fn on_spin(&self, outcome: &SpinOutcome);

    /// Autoplay stopped because a spin was refused.
    fn on_rejected(&self, _reason: &SpinRejected) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SpinObserver for NoOpObserver {
    fn on_spin(&self, _outcome: &SpinOutcome) {}
}

/// Totals of an autoplay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoplaySummary {
    pub spins: u64,
    pub wins: u64,
    pub final_balance: u32,
    pub game_over: bool,
}

/// Spin back to back until the machine refuses or `max_spins` is reached.
///
/// Time is virtual: after each accepted spin the clock jumps by the settle
/// delay, so reel animation and settlement run exactly as they would live
/// without waiting.
pub fn autoplay(
    machine: &mut SlotMachine,
    max_spins: Option<u64>,
    observer: &dyn SpinObserver,
) -> AutoplaySummary {
    let mut clock = Duration::ZERO;
    let mut spins = 0u64;
    let mut wins = 0u64;

    while max_spins.map_or(true, |max| spins < max) {
        if let Err(reason) = machine.request_spin(clock) {
            debug!(%reason, "autoplay stopped");
            observer.on_rejected(&reason);
            break;
        }
        clock = clock.saturating_add(machine.rules().settle_delay);
        machine.advance(clock);

        if let Some(outcome) = machine.last_outcome() {
            spins += 1;
            if outcome.won {
                wins += 1;
            }
            observer.on_spin(&outcome);
        }
    }

    AutoplaySummary {
        spins,
        wins,
        final_balance: machine.balance(),
        game_over: machine.is_game_over(),
    }
}
