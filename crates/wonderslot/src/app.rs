//! Application entry point and dispatch.

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use tracing::info;

use wonderslot_core::{autoplay, GameRules, RandomSource, SlotMachine};
use wonderslot_tui::{SlotApp, TuiMessage};

use crate::config::AppConfig;
use crate::presenter::HeadlessPresenter;
use crate::version::full_version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "wonderslot", &mut std::io::stdout());
        return Ok(());
    }

    let rules = config.rules()?;

    if config.headless {
        return run_headless(config, rules);
    }

    run_tui(config, rules)
}

/// Seeded machine when a seed is configured, entropy otherwise.
#[must_use]
pub fn build_machine(rules: GameRules, seed: Option<u64>) -> SlotMachine {
    match seed {
        Some(seed) => SlotMachine::seeded(rules, seed),
        None => SlotMachine::with_sources(
            rules,
            Box::new(RandomSource::from_entropy()),
            Box::new(RandomSource::from_entropy()),
        ),
    }
}

fn run_headless(config: &AppConfig, rules: GameRules) -> Result<()> {
    let mut machine = build_machine(rules, config.seed);
    let presenter = HeadlessPresenter::new(config.lang, config.json);

    let summary = autoplay(&mut machine, config.max_spins, &presenter);
    presenter.present_summary(&summary);
    info!(
        spins = summary.spins,
        wins = summary.wins,
        balance = summary.final_balance,
        "headless session complete"
    );
    Ok(())
}

fn run_tui(config: &AppConfig, rules: GameRules) -> Result<()> {
    let machine = build_machine(rules, config.seed);

    // Create crossbeam channel for TUI messages
    let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();

    // Set up Ctrl+C handler
    ctrlc_handler(tx.clone())?;

    let mut app = SlotApp::new(machine, config.lang, rx);
    info!(version = %full_version(), locale = %config.lang, "starting dashboard");
    let _ = tx.send(TuiMessage::Log(format!(
        "{} started. Press space to spin.",
        full_version()
    )));

    // Run TUI event loop on the main thread
    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    Ok(())
}

fn ctrlc_handler(tx: Sender<TuiMessage>) -> Result<()> {
    ctrlc::set_handler(move || {
        let _ = tx.send(TuiMessage::Quit);
    })
    .context("Error setting Ctrl+C handler")
}
