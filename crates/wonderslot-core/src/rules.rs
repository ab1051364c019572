//! Tunable game rules.

use std::time::Duration;

use crate::constants::{REEL_TICK, SETTLE_DELAY, SPIN_COST, STARTING_BALANCE, WIN_BONUS};

/// Rule validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("spin cost must be positive")]
    ZeroSpinCost,

    #[error("reel tick interval must be positive")]
    ZeroReelTick,
}

/// Economy and timing of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub starting_balance: u32,
    pub spin_cost: u32,
    pub win_bonus: u32,
    /// How long a spin animates before it settles.
    pub settle_delay: Duration,
    /// Resampling interval of an animating reel.
    pub reel_tick: Duration,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            spin_cost: SPIN_COST,
            win_bonus: WIN_BONUS,
            settle_delay: SETTLE_DELAY,
            reel_tick: REEL_TICK,
        }
    }
}

impl GameRules {
    /// Same rules with a different starting balance.
    #[must_use]
    pub fn with_starting_balance(mut self, balance: u32) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Check that the rules describe a game that can end and animate.
    pub fn validate(self) -> Result<Self, RulesError> {
        if self.spin_cost == 0 {
            return Err(RulesError::ZeroSpinCost);
        }
        if self.reel_tick.is_zero() {
            return Err(RulesError::ZeroReelTick);
        }
        Ok(self)
    }
}
