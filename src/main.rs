//! todoq - a terminal to-do queue

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todo_queue::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
