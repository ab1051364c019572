//! Game constants and process exit codes.

use std::time::Duration;

/// Number of reels on the machine.
pub const REEL_COUNT: usize = 3;

/// Balance a fresh game starts with.
pub const STARTING_BALANCE: u32 = 100;

/// Points deducted for every accepted spin.
pub const SPIN_COST: u32 = 10;

/// Points awarded when all three reels settle on the same digit.
pub const WIN_BONUS: u32 = 10;

/// Delay between an accepted spin and its settlement.
pub const SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// Interval at which an animating reel resamples its displayed digit.
pub const REEL_TICK: Duration = Duration::from_millis(100);

/// Shortest period accepted for a repeating timer.
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Interrupted by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
