//! # wonderslot-core
//!
//! Game core of the wonderslot three-reel slot machine: digits, rules, a
//! cooperative timer queue, reel animation and spin settlement. No terminal
//! or rendering code lives here.

pub mod autoplay;
pub mod constants;
pub mod digit;
pub mod locale;
pub mod machine;
pub mod reel;
pub mod rules;
pub mod timer;

// Re-exports
pub use autoplay::{autoplay, AutoplaySummary, NoOpObserver, SpinObserver};
pub use constants::{exit_codes, REEL_COUNT, SPIN_COST, STARTING_BALANCE, WIN_BONUS};
pub use digit::{Digit, DigitError, DigitSource, RandomSource, ScriptedSource};
pub use locale::{Locale, Strings};
pub use machine::{Message, Phase, SlotMachine, SpinOutcome, SpinRejected};
pub use reel::{ReelState, ReelView};
pub use rules::{GameRules, RulesError};
pub use timer::{TimerEvent, TimerGuard, TimerQueue};
