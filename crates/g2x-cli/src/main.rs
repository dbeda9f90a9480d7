use g2x_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unusable.
    if logging::init_file_logging().is_err() {
        logging::init_stderr_logging();
    }

    // Parse CLI and run the startup flow.
    if let Err(err) = cli::run() {
        eprintln!("g2x error: {:#}", err);
        std::process::exit(1);
    }
}
