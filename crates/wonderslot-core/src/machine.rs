//! The slot machine: balance, spin lifecycle and settlement.
//!
//! All mutation happens through [`SlotMachine::request_spin`] and
//! [`SlotMachine::advance`], both called from the owner's thread with a
//! monotonic `now`. The settlement of a spin is a one-shot timer carrying the
//! targets sampled when the spin was accepted.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::REEL_COUNT;
use crate::digit::{Digit, DigitSource, RandomSource};
use crate::locale::Locale;
use crate::reel::{ReelState, ReelView};
use crate::rules::GameRules;
use crate::timer::{TimerEvent, TimerGuard, TimerQueue};

/// Why a spin request was turned down. The machine is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpinRejected {
    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error("balance {balance} is below the spin cost {cost}")]
    InsufficientBalance { balance: u32, cost: u32 },
}

/// Outcome text shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Message {
    Win,
    Loss,
}

impl Message {
    #[must_use]
    pub fn text(self, locale: Locale) -> &'static str {
        let strings = locale.strings();
        match self {
            Self::Win => strings.win,
            Self::Loss => strings.loss,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text(Locale::En))
    }
}

/// Where the game currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready for the first spin.
    Idle,
    Spinning,
    /// The last spin settled and another one can be requested.
    Settled,
    /// Balance can no longer cover a spin.
    GameOver,
}

/// Record of one settled spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinOutcome {
    /// 1-based spin number.
    pub sequence: u64,
    pub targets: [Digit; REEL_COUNT],
    pub won: bool,
    pub balance_before: u32,
    pub balance_after: u32,
}

#[derive(Debug, Clone, Copy)]
struct PendingSpin {
    sequence: u64,
    balance_before: u32,
}

/// Whether every reel landed on the same digit.
#[must_use]
pub fn is_jackpot(targets: &[Digit; REEL_COUNT]) -> bool {
    targets.iter().all(|&d| d == targets[0])
}

/// Game state plus the timers that animate and settle it.
pub struct SlotMachine {
    rules: GameRules,
    balance: u32,
    spinning: bool,
    message: Option<Message>,
    reels: [ReelState; REEL_COUNT],
    views: [ReelView; REEL_COUNT],
    timers: TimerQueue,
    settle_timer: Option<TimerGuard>,
    outcome_source: Box<dyn DigitSource>,
    cosmetic_source: Box<dyn DigitSource>,
    pending: Option<PendingSpin>,
    last_outcome: Option<SpinOutcome>,
    spins_played: u64,
}

impl SlotMachine {
    /// Machine with default rules and entropy-seeded randomness.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(
            GameRules::default(),
            Box::new(RandomSource::from_entropy()),
            Box::new(RandomSource::from_entropy()),
        )
    }

    /// Reproducible machine: outcomes and animation both derive from `seed`.
    #[must_use]
    pub fn seeded(rules: GameRules, seed: u64) -> Self {
        Self::with_sources(
            rules,
            Box::new(RandomSource::seeded(seed)),
            Box::new(RandomSource::seeded(seed.wrapping_add(1))),
        )
    }

    /// Machine drawing spin targets from `outcome_source` and animation frames
    /// from `cosmetic_source`.
    #[must_use]
    pub fn with_sources(
        rules: GameRules,
        outcome_source: Box<dyn DigitSource>,
        cosmetic_source: Box<dyn DigitSource>,
    ) -> Self {
        let reels = [ReelState::default(); REEL_COUNT];
        let views = std::array::from_fn(|i| ReelView::new(i, &reels[i]));
        let mut machine = Self {
            rules,
            balance: rules.starting_balance,
            spinning: false,
            message: None,
            reels,
            views,
            timers: TimerQueue::new(),
            settle_timer: None,
            outcome_source,
            cosmetic_source,
            pending: None,
            last_outcome: None,
            spins_played: 0,
        };
        machine.refresh_status();
        machine
    }

    /// Start a spin at `now`.
    ///
    /// On success the cost is already deducted and the returned targets are
    /// the digits the reels will settle on after `settle_delay`.
    pub fn request_spin(&mut self, now: Duration) -> Result<[Digit; REEL_COUNT], SpinRejected> {
        if self.spinning {
            debug!("spin rejected: already spinning");
            return Err(SpinRejected::AlreadySpinning);
        }
        if self.balance < self.rules.spin_cost {
            debug!(balance = self.balance, "spin rejected: insufficient balance");
            return Err(SpinRejected::InsufficientBalance {
                balance: self.balance,
                cost: self.rules.spin_cost,
            });
        }

        let balance_before = self.balance;
        self.balance -= self.rules.spin_cost;
        self.spinning = true;
        self.message = None;

        let source = &mut self.outcome_source;
        let targets: [Digit; REEL_COUNT] = std::array::from_fn(|_| source.next_digit());
        for (reel, &target) in self.reels.iter_mut().zip(&targets) {
            reel.is_animating = true;
            reel.target_digit = target;
        }
        self.sync_views(now);

        self.settle_timer = Some(self.timers.schedule_once(
            now,
            self.rules.settle_delay,
            TimerEvent::Settle { targets },
        ));
        self.pending = Some(PendingSpin {
            sequence: self.spins_played + 1,
            balance_before,
        });

        info!(
            balance = self.balance,
            targets = ?targets.map(Digit::get),
            "spin accepted"
        );
        self.refresh_status();
        Ok(targets)
    }

    /// Run every timer due at or before `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(event) = self.timers.pop_due(now) {
            match event {
                TimerEvent::Settle { targets } => self.settle(targets, now),
                TimerEvent::ReelTick { reel } => {
                    if let Some(view) = self.views.get_mut(reel) {
                        view.on_tick(self.cosmetic_source.as_mut());
                    }
                }
            }
        }
    }

    fn settle(&mut self, targets: [Digit; REEL_COUNT], now: Duration) {
        self.settle_timer = None;
        for (reel, &target) in self.reels.iter_mut().zip(&targets) {
            reel.is_animating = false;
            reel.displayed_digit = target;
            reel.target_digit = target;
        }
        self.sync_views(now);

        let won = is_jackpot(&targets);
        if won {
            self.balance += self.rules.win_bonus;
            self.message = Some(Message::Win);
        }
        self.spinning = false;

        let pending = self.pending.take().unwrap_or(PendingSpin {
            sequence: self.spins_played + 1,
            balance_before: self.balance,
        });
        self.spins_played = pending.sequence;
        let outcome = SpinOutcome {
            sequence: pending.sequence,
            targets,
            won,
            balance_before: pending.balance_before,
            balance_after: self.balance,
        };
        self.last_outcome = Some(outcome);
        info!(
            sequence = outcome.sequence,
            won,
            balance = self.balance,
            "spin settled"
        );
        self.refresh_status();
    }

    fn sync_views(&mut self, now: Duration) {
        for (view, reel) in self.views.iter_mut().zip(&self.reels) {
            view.sync(reel, &self.timers, now, self.rules.reel_tick);
        }
    }

    /// Re-derive the game-over message from balance and spin state.
    fn refresh_status(&mut self) {
        if self.is_game_over() && self.message != Some(Message::Loss) {
            warn!(balance = self.balance, "game over");
            self.message = Some(Message::Loss);
        }
    }

    /// Cancel every outstanding timer and freeze the reels.
    pub fn teardown(&mut self) {
        self.settle_timer = None;
        for view in &mut self.views {
            view.stop();
        }
    }

    #[must_use]
    pub fn balance(&self) -> u32 {
        self.balance
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    #[must_use]
    pub fn can_spin(&self) -> bool {
        self.balance >= self.rules.spin_cost && !self.spinning
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.balance < self.rules.spin_cost && !self.spinning
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.spinning {
            Phase::Spinning
        } else if self.balance < self.rules.spin_cost {
            Phase::GameOver
        } else if self.last_outcome.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<Message> {
        self.message
    }

    #[must_use]
    pub fn reels(&self) -> &[ReelState; REEL_COUNT] {
        &self.reels
    }

    #[must_use]
    pub fn reel_views(&self) -> &[ReelView; REEL_COUNT] {
        &self.views
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<SpinOutcome> {
        self.last_outcome
    }

    #[must_use]
    pub fn spins_played(&self) -> u64 {
        self.spins_played
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Number of scheduled timers, settlement and reel ticks together.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit::ScriptedSource;

    const SETTLE: Duration = Duration::from_millis(3000);

    fn scripted(rules: GameRules, targets: &[u8]) -> SlotMachine {
        SlotMachine::with_sources(
            rules,
            Box::new(ScriptedSource::from_values(targets).unwrap()),
            Box::new(RandomSource::seeded(99)),
        )
    }

    fn digits(values: [u8; 3]) -> [Digit; 3] {
        values.map(|v| Digit::new(v).unwrap())
    }

    #[test]
    fn fresh_machine() {
        let machine = scripted(GameRules::default(), &[1]);
        assert_eq!(machine.balance(), 100);
        assert!(machine.can_spin());
        assert!(!machine.is_game_over());
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.message(), None);
        assert!(machine.reels().iter().all(|r| *r == ReelState::default()));
        assert_eq!(machine.pending_timers(), 0);
    }

    #[test]
    fn spin_deducts_immediately_and_blocks_reentry() {
        let mut machine = scripted(GameRules::default(), &[4, 4, 4]);
        let targets = machine.request_spin(Duration::ZERO).unwrap();
        assert_eq!(targets, digits([4, 4, 4]));
        assert_eq!(machine.balance(), 90);
        assert_eq!(machine.phase(), Phase::Spinning);
        assert!(!machine.can_spin());
        assert!(machine.reels().iter().all(|r| r.is_animating));
        // settlement timer plus one ticker per reel
        assert_eq!(machine.pending_timers(), 4);

        assert_eq!(
            machine.request_spin(Duration::from_millis(10)),
            Err(SpinRejected::AlreadySpinning)
        );
        assert_eq!(machine.balance(), 90);
    }

    #[test]
    fn triple_wins_bonus() {
        let mut machine = scripted(GameRules::default(), &[4, 4, 4]);
        machine.request_spin(Duration::ZERO).unwrap();
        machine.advance(SETTLE - Duration::from_millis(1));
        assert!(machine.is_spinning());
        assert_eq!(machine.balance(), 90);

        machine.advance(SETTLE);
        assert!(!machine.is_spinning());
        assert_eq!(machine.balance(), 100);
        assert_eq!(machine.message(), Some(Message::Win));
        assert_eq!(machine.phase(), Phase::Settled);
        assert_eq!(machine.pending_timers(), 0);
        for (view, reel) in machine.reel_views().iter().zip(machine.reels()) {
            assert_eq!(view.displayed(), Digit::new(4).unwrap());
            assert_eq!(reel.displayed_digit, reel.target_digit);
            assert!(!view.is_animating());
        }
        let outcome = machine.last_outcome().unwrap();
        assert!(outcome.won);
        assert_eq!((outcome.balance_before, outcome.balance_after), (100, 100));
    }

    #[test]
    fn mismatch_costs_the_spin() {
        let mut machine = scripted(GameRules::default(), &[3, 7, 2]);
        machine.request_spin(Duration::ZERO).unwrap();
        machine.advance(SETTLE);
        assert_eq!(machine.balance(), 90);
        assert_eq!(machine.message(), None);
        assert!(!machine.last_outcome().unwrap().won);
    }

    #[test]
    fn running_out_ends_the_game() {
        let rules = GameRules::default().with_starting_balance(20);
        let mut machine = scripted(rules, &[3, 7, 2]);

        machine.request_spin(Duration::ZERO).unwrap();
        machine.advance(SETTLE);
        assert_eq!(machine.balance(), 10);
        assert_eq!(machine.message(), None);

        machine.request_spin(SETTLE).unwrap();
        assert_eq!(machine.balance(), 0);
        assert!(!machine.is_game_over());
        machine.advance(SETTLE * 2);

        assert!(machine.is_game_over());
        assert_eq!(machine.phase(), Phase::GameOver);
        assert_eq!(machine.message(), Some(Message::Loss));
        assert_eq!(
            machine.request_spin(SETTLE * 3),
            Err(SpinRejected::InsufficientBalance {
                balance: 0,
                cost: 10
            })
        );
        assert_eq!(machine.spins_played(), 2);
    }

    #[test]
    fn broke_from_the_start() {
        let machine = scripted(GameRules::default().with_starting_balance(5), &[1]);
        assert!(machine.is_game_over());
        assert_eq!(machine.message(), Some(Message::Loss));
    }

    #[test]
    fn message_cleared_on_new_spin() {
        let mut machine = scripted(GameRules::default(), &[5, 5, 5, 1, 2, 3]);
        machine.request_spin(Duration::ZERO).unwrap();
        machine.advance(SETTLE);
        assert_eq!(machine.message(), Some(Message::Win));
        machine.request_spin(SETTLE).unwrap();
        assert_eq!(machine.message(), None);
    }

    #[test]
    fn settlement_uses_targets_fixed_at_spin_start() {
        let mut machine = scripted(GameRules::default(), &[6, 2, 9]);
        let targets = machine.request_spin(Duration::ZERO).unwrap();
        machine.advance(Duration::from_millis(1500));
        machine.advance(SETTLE);
        let shown: Vec<Digit> = machine.reel_views().iter().map(ReelView::displayed).collect();
        assert_eq!(shown, targets.to_vec());
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut machine = scripted(GameRules::default(), &[1, 2, 3]);
        machine.request_spin(Duration::ZERO).unwrap();
        machine.teardown();
        assert_eq!(machine.pending_timers(), 0);
        assert!(machine.reel_views().iter().all(|v| !v.has_active_timer()));
    }

    #[test]
    fn jackpot_detection() {
        assert!(is_jackpot(&digits([9, 9, 9])));
        assert!(!is_jackpot(&digits([9, 9, 1])));
        assert!(!is_jackpot(&digits([1, 9, 9])));
    }

    #[test]
    fn message_text_by_locale() {
        assert_eq!(Message::Win.text(Locale::Ru), "Поздравляем! Вы выиграли!");
        assert_eq!(Message::Loss.to_string(), "You lost");
    }
}
