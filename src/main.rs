//! pairsort - Interactive pairwise sorting

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pairsort::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
