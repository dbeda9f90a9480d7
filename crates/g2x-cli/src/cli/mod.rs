//! CLI for the g2x entity-resolution explorer.

mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Top-level CLI. The explorer takes flags only; after a successful startup
/// it reports readiness.
#[derive(Debug, Parser)]
#[command(name = "g2x")]
#[command(about = "g2x: exploratory data analysis for an entity-resolution repository", long_about = None)]
pub struct Cli {
    /// Path of an optional engine configuration INI file.
    #[arg(short = 'c', long = "config-file", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Statistics snapshot JSON file to explore.
    #[arg(short = 's', long = "snapshot-file", value_name = "PATH")]
    pub snapshot_file: Option<PathBuf>,

    /// Audit statistics JSON file to explore.
    #[arg(short = 'a', long = "audit-file", value_name = "PATH")]
    pub audit_file: Option<PathBuf>,

    /// Echo raw SDK JSON responses to `screen` or append them to a file.
    #[arg(short = 'D', long = "debug-output", value_name = "TARGET")]
    pub debug_output: Option<String>,

    /// Ask the SDK engine for verbose trace output.
    #[arg(short = 't', long = "debug-trace")]
    pub debug_trace: bool,
}

pub fn run() -> Result<()> {
    run::run(Cli::parse())
}
