//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,g2x_core=debug,g2x_cli=debug"))
}

/// Initialize structured logging to `~/.local/state/g2x/g2x.log`.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall
/// back to stderr.
pub fn init_file_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("g2x")?;
    let path: PathBuf = xdg_dirs.place_state_file("g2x.log")?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    // Each log line gets its own writer; if the clone fails mid-run the line
    // goes to stderr instead of being lost.
    let writer = BoxMakeWriter::new(move || -> Box<dyn io::Write> {
        match file.try_clone() {
            Ok(clone) => Box::new(clone),
            Err(_) => Box::new(io::stderr()),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("g2x logging initialized at {}", path.display());

    Ok(path)
}

/// Initialize logging to stderr only (no file). Use when init_file_logging()
/// fails so the CLI doesn't crash.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
