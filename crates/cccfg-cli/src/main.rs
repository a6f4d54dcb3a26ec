use cccfg_core::{LoggingDestination, init_logging};

fn main() {
    // Logs go to the file only; stdout/stderr stay free for command output.
    if let Err(err) = init_logging(LoggingDestination::FileOnly) {
        eprintln!("Warning: structured logging unavailable: {err}");
    }

    if let Err(err) = cccfg_cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
