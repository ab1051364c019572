//! Tracing subscriber setup.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
}

/// Install the global subscriber.
///
/// The dashboard owns the terminal, so in TUI mode diagnostics go to
/// `--log-file` or nowhere. Headless mode logs to stderr unless a file is
/// given.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if config.headless || config.completion.is_some() {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::sink).init();
    }
    Ok(())
}
