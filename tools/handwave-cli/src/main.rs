//! Handwave CLI — Command-line interface for gesture-driven input control.
//!
//! Usage:
//!   handwave run [OPTIONS]      Start live gesture control
//!   handwave record <OUTPUT>    Record landmark frames to a JSONL stream
//!   handwave replay <PATH>      Replay a recorded stream through the interpreter
//!   handwave check              Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "handwave",
    about = "Hand-gesture mouse and volume control",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start live gesture control
    Run {
        /// Read landmark frames from stdin instead of spawning the detector
        #[arg(long)]
        stdin: bool,

        /// Decide actions but do not inject them
        #[arg(long)]
        dry_run: bool,
    },

    /// Record landmark frames to a JSONL stream
    Record {
        /// Output file path
        output: PathBuf,

        /// Read landmark frames from stdin instead of spawning the detector
        #[arg(long)]
        stdin: bool,
    },

    /// Replay a recorded stream through the interpreter
    Replay {
        /// Path to the recorded JSONL stream
        path: PathBuf,

        /// Inject the resulting actions instead of only printing them
        #[arg(long)]
        inject: bool,
    },

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    handwave_common::logging::init_logging(&handwave_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run { stdin, dry_run } => commands::run::run(stdin, dry_run).await,
        Commands::Record { output, stdin } => commands::record::run(output, stdin).await,
        Commands::Replay { path, inject } => commands::replay::run(path, inject),
        Commands::Check => commands::check::run(),
    }
}
