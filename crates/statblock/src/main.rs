//! statblock CLI - markdown ability sheets to character sheet markup.
//!
//! Provides commands for:
//! - `convert`: Write one markup file per ability category
//! - `check`: Report parse results and warnings without writing files

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConvertArgs};
use output::Output;

/// statblock - Convert markdown ability sheets to character sheet markup.
#[derive(Parser)]
#[command(name = "statblock", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a markdown sheet into per-category markup files.
    Convert(ConvertArgs),
    /// Parse a markdown sheet and report warnings without writing files.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Convert(args) => args.sheet.verbose,
        Commands::Check(args) => args.sheet.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
