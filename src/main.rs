//! topograph - resource topology graph builder for cluster workload
//! visualization
//!
//! The binary is a thin shell over the library: it reads snapshot JSON
//! (file or stdin), runs the build + layout pipeline, and prints the
//! positioned graph for inspection or piping into a renderer.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use topograph::cli;
use topograph::config;

/// Resource topology graph builder and layout engine
#[derive(Parser, Debug)]
#[command(name = "topograph")]
#[command(about = "Resource topology graph builder and layout engine for cluster workload visualization", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Build and lay out a snapshot, printing the positioned graph as JSON
    Dump {
        /// Snapshot JSON file, or `-` for stdin
        file: PathBuf,
    },
    /// Validate a snapshot file and report build statistics
    Check {
        /// Snapshot JSON file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = cli::init_logging(args.debug) {
        eprintln!("Debug logging to: {}", log_path.display());
    }

    let config = config::load(args.config.as_deref())?;

    match args.command {
        Command::Dump { file } => cli::handle_dump(&file, &config),
        Command::Check { file } => cli::handle_check(&file, &config),
    }
}
