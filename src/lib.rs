//! Scenario replay support for the cross-crate golden tests.
//!
//! A scenario fixes the outcome digits, plays a sequence of spin requests on
//! a virtual clock and records what the machine reported after each one.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use wonderslot_core::{Digit, GameRules, Message, RandomSource, ScriptedSource, SlotMachine};

/// Errors loading golden data.
#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid golden data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scenario '{0}' has an invalid script")]
    Script(String),
}

/// Contents of a golden scenario file.
#[derive(Debug, Deserialize)]
pub struct GoldenFile {
    pub description: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub starting_balance: u32,
    /// Outcome digits, consumed three per accepted spin.
    pub script: Vec<u8>,
    pub steps: Vec<Step>,
}

/// Observed state after one spin request and the settle delay that follows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    pub accepted: bool,
    /// Balance right after the request, before settlement.
    pub balance_while_spinning: u32,
    pub targets: Option<[u8; 3]>,
    pub balance_after: u32,
    /// "win", "loss" or absent.
    pub message: Option<String>,
}

/// Load a golden file.
pub fn load(path: impl AsRef<Path>) -> Result<GoldenFile, GoldenError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|source| GoldenError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

fn message_name(message: Option<Message>) -> Option<String> {
    message.map(|m| match m {
        Message::Win => "win".to_string(),
        Message::Loss => "loss".to_string(),
    })
}

/// Play `scenario.steps.len()` spin requests and record each result.
pub fn replay(scenario: &Scenario) -> Result<Vec<Step>, GoldenError> {
    let outcomes = ScriptedSource::from_values(&scenario.script)
        .map_err(|_| GoldenError::Script(scenario.name.clone()))?;
    let rules = GameRules::default().with_starting_balance(scenario.starting_balance);
    let mut machine = SlotMachine::with_sources(
        rules,
        Box::new(outcomes),
        Box::new(RandomSource::seeded(0)),
    );

    let mut clock = Duration::ZERO;
    let mut steps = Vec::with_capacity(scenario.steps.len());
    for _ in &scenario.steps {
        let accepted = machine.request_spin(clock).is_ok();
        let balance_while_spinning = machine.balance();

        clock += rules.settle_delay;
        machine.advance(clock);

        let targets = if accepted {
            machine
                .last_outcome()
                .map(|outcome| outcome.targets.map(Digit::get))
        } else {
            None
        };
        steps.push(Step {
            accepted,
            balance_while_spinning,
            targets,
            balance_after: machine.balance(),
            message: message_name(machine.message()),
        });
    }
    Ok(steps)
}
