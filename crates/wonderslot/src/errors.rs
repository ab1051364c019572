//! Error handling and exit codes.

use wonderslot_core::exit_codes;

use crate::config::ConfigError;

/// Map an application error to the process exit code.
///
/// Rule violations reach here wrapped in [`ConfigError`]; a bad `--lang` is
/// rejected by clap before the app runs.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}
