//! LoanTape CLI
//!
//! Command-line interface for loan tape consistency checks and analytics

use clap::{Parser, Subcommand};
use loantape_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "loantape")]
#[command(about = "LoanTape - Loan tape snapshot consistency and portfolio analytics", long_about = None)]
struct Cli {
    /// Human-readable debug logs on stderr
    #[arg(long, global = true, conflicts_with = "log_json")]
    verbose: bool,

    /// JSON structured logs on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check consecutive snapshots for data-integrity violations
    Check(commands::check::CheckArgs),
    /// Portfolio overview and key ratios of one snapshot
    Summary(commands::summary::SummaryArgs),
    /// One analytics section of a snapshot as JSON
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    } else if cli.log_json {
        init(Profile::Production);
    }

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Summary(args) => commands::summary::execute(args),
        Commands::Analyze(args) => commands::analyze::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
