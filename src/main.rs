//! Terra - one binary, many plugins

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = terra_host::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
