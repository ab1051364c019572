//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use wonderslot_core::{GameRules, Locale, RulesError};

/// Configuration errors surfaced before the game starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid duration '{value}' for --{flag} (expected e.g. 500ms, 3s, 1m)")]
    InvalidDuration { flag: &'static str, value: String },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Field of Wonders: a three-reel slot machine for the terminal.
#[derive(Parser, Debug)]
#[command(name = "wonderslot", version, about)]
pub struct AppConfig {
    /// Seed for reproducible spins.
    #[arg(long, env = "WONDERSLOT_SEED")]
    pub seed: Option<u64>,

    /// Display language: en or ru.
    #[arg(long, default_value = "en", env = "WONDERSLOT_LANG")]
    pub lang: Locale,

    /// Play automatically without a terminal UI.
    #[arg(long)]
    pub headless: bool,

    /// Stop headless play after this many spins.
    #[arg(long, requires = "headless")]
    pub max_spins: Option<u64>,

    /// Print headless results as JSON lines.
    #[arg(long, requires = "headless")]
    pub json: bool,

    /// How long a spin animates before settling (e.g. "3s", "500ms").
    #[arg(long, default_value = "3s")]
    pub settle_delay: String,

    /// Interval between reel animation frames.
    #[arg(long, default_value = "100ms")]
    pub reel_tick: String,

    /// Write diagnostic logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Game rules with the configured timings.
    pub fn rules(&self) -> Result<GameRules, ConfigError> {
        let settle_delay = parse_duration(&self.settle_delay).ok_or_else(|| {
            ConfigError::InvalidDuration {
                flag: "settle-delay",
                value: self.settle_delay.clone(),
            }
        })?;
        let reel_tick =
            parse_duration(&self.reel_tick).ok_or_else(|| ConfigError::InvalidDuration {
                flag: "reel-tick",
                value: self.reel_tick.clone(),
            })?;

        GameRules {
            settle_delay,
            reel_tick,
            ..GameRules::default()
        }
        .validate()
        .map_err(ConfigError::from)
    }
}

/// Parse a duration string like "5m", "1h", "30s", "500ms" or bare seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}
