//! Analytics command

use crate::commands::{parse_date, read_config};
use clap::Args;
use loantape_engine::commands::analyze::{AnalysisSection, AnalyzeOptions};
use loantape_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    pub file: PathBuf,

    /// summary, deployment, collection-velocity, denial-trend, cohorts,
    /// actual-vs-expected, ageing, revenue or concentration
    #[arg(long)]
    pub section: AnalysisSection,

    /// Exclude deals dated after this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<chrono::NaiveDate>,

    /// Product config JSON naming the reporting currency
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "USD")]
    pub display_currency: String,
}

pub fn execute(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new(chrono::Local::now().date_naive());
    options.config = read_config(args.config.as_deref())?;
    options.display_currency = args.display_currency;
    options.as_of = args.as_of;

    let cmd = EngineCommand::Analyze {
        path: args.file,
        section: args.section,
        options,
    };
    match apply_engine_command(cmd)? {
        EngineCommandResult::Analysis(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        EngineCommandResult::CheckSequence(_) => Err("unexpected engine result".into()),
    }
}
