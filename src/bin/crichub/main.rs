//! CricHub storefront and scoring CLI

use std::{io, process::ExitCode};

use crate::config::AppConfig;

mod cli;
mod config;
mod logging;

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            // Help and version requests also come through here.
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(init_error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("failed to initialise logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let mut out = io::stdout().lock();

    match config.command.run(&config.store, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            #[expect(clippy::print_stderr, reason = "command errors are shown to the user")]
            {
                eprintln!("{run_error:#}");
            }

            ExitCode::FAILURE
        }
    }
}
