//! Command-line entry point for the spanbench utilities

use clap::Parser;
use spanbench_cli::commands::Commands;

/// Benchmarking and preprocessing utilities for span-labeling experiments
#[derive(Debug, Parser)]
#[command(name = "spanbench", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
        std::process::exit(1);
    }
}
