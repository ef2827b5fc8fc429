use pagewarm_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Logging first; init() falls back to stderr on its own.
    logging::init();

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("pagewarm error: {:#}", err);
        std::process::exit(1);
    }
}
