//! kvtx CLI
//!
//! Demonstration driver for the kvtx transactional store.
//!
//! # Commands
//!
//! - `demo` - Replay the reference sequence and check every outcome
//! - `repl` - Drive a store interactively from stdin
//! - `version` - Show version information

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// kvtx command-line driver.
#[derive(Parser)]
#[command(name = "kvtx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the reference sequence against a fresh store
    Demo {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Read commands from stdin and apply them to a fresh store
    Repl,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { format } => {
            commands::demo::run(&format)?;
        }
        Commands::Repl => {
            commands::repl::run()?;
        }
        Commands::Version => {
            println!("kvtx CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("kvtx Core v{}", kvtx_core::VERSION);
        }
    }

    Ok(())
}
