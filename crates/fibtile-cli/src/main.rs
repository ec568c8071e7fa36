use std::process::ExitCode;

use env_logger::Env;
use fibtile_evaluator::WeightFileError;

mod command;
mod schema;
mod statistics;
mod util;

/// Exit status for unreadable or unwritable weight files (`EX_IOERR`).
const EXIT_WEIGHT_FILE: u8 = 74;

/// Exit status for every other failure.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match command::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Maps a failure to the process exit status.
///
/// A weight file error anywhere in the chain is reported as [`EXIT_WEIGHT_FILE`].
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<WeightFileError>()) {
        EXIT_WEIGHT_FILE
    } else {
        EXIT_FAILURE
    }
}
