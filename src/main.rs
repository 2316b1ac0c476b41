/// Command line options.
mod config;

/// The interactive console and script runner.
mod console;

/// Installing the log subscriber.
mod logging;

use clap::Parser;
use config::Cli;
use console::{Console, run_script};
use lforth::ForthInterpreter;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.log_level.as_deref());

    // Create the session, then bind the variables given on the command line.
    let mut interpreter = ForthInterpreter::new();

    for definition in &cli.definitions {
        let address = interpreter.define_variable(&definition.name, definition.value);
        debug!(target: "lforth::cli", "{} = {} at {}", definition.name, definition.value, address);
    }

    match &cli.script {
        Some(path) => match run_script(&mut interpreter, path) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(err) => {
                eprintln!("Could not run {}: {}", path.display(), err);
                ExitCode::FAILURE
            }
        },

        None => match Console::new(cli.history, !cli.no_clear).run(&mut interpreter) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Console failed: {}", err);
                ExitCode::FAILURE
            }
        },
    }
}
