//! wonderslot: Field of Wonders slot machine.

use std::process::ExitCode;

use wonderslot_lib::{app, config, errors, logging};

fn main() -> ExitCode {
    // Parse CLI args and run
    let config = config::AppConfig::parse();

    let result = logging::init_tracing(&config).and_then(|()| app::run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = u8::try_from(errors::exit_code(&err)).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
