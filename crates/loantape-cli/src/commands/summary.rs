//! Portfolio summary command

use crate::commands::{parse_date, read_config};
use clap::Args;
use loantape_core::analytics::{fmt_m, PortfolioSummary};
use loantape_engine::commands::analyze::{AnalysisOutput, AnalysisSection, AnalyzeOptions};
use loantape_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use std::path::PathBuf;

const RULE: &str = "============================================================";

#[derive(Debug, Args)]
pub struct SummaryArgs {
    pub file: PathBuf,

    /// Product config JSON naming the reporting currency
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "USD")]
    pub display_currency: String,

    /// Exclude deals dated after this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<chrono::NaiveDate>,
}

pub fn execute(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new(chrono::Local::now().date_naive());
    let config = read_config(args.config.as_deref())?;
    let heading = config
        .as_ref()
        .map(|c| format!("{} / {}", c.company.to_uppercase(), c.product.to_uppercase()));
    options.config = config;
    options.display_currency = args.display_currency;
    options.as_of = args.as_of;

    let cmd = EngineCommand::Analyze {
        path: args.file,
        section: AnalysisSection::Summary,
        options,
    };
    let summary = match apply_engine_command(cmd)? {
        EngineCommandResult::Analysis(AnalysisOutput::Summary(summary)) => summary,
        _ => return Err("unexpected engine result".into()),
    };

    print!("{}", render_summary(&summary, heading.as_deref()));
    Ok(())
}

fn render_summary(s: &PortfolioSummary, heading: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    match heading {
        Some(h) => out.push_str(&format!("PORTFOLIO OVERVIEW: {}\n", h)),
        None => out.push_str("PORTFOLIO OVERVIEW\n"),
    }
    out.push_str(&format!("Snapshot: {}\n", s.snapshot_date));
    if s.as_of_date != s.snapshot_date {
        out.push_str(&format!("As of:    {}\n", s.as_of_date));
    }
    out.push_str(&format!(
        "Currency: {} (reported {})\n",
        s.display_currency, s.reported_currency
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total deals:     {}\n", s.total_deals));

    out.push_str("\n=== DEAL STATUS ===\n");
    for (status, count) in &s.status_breakdown {
        out.push_str(&format!("  {:<20} {}\n", status, count));
    }

    out.push_str("\n=== FINANCIAL SUMMARY ===\n");
    for (name, value) in [
        ("Purchase value", s.total_purchase_value),
        ("Collected till date", s.total_collected),
        ("Denied by insurance", s.total_denied),
        ("Pending insurance response", s.total_pending),
    ] {
        out.push_str(&format!("  {:<35} {}\n", name, fmt_m(value)));
    }

    out.push_str("\n=== KEY RATIOS ===\n");
    out.push_str(&format!("  Collection rate:     {:.2}%\n", s.collection_rate));
    out.push_str(&format!("  Denial rate:         {:.2}%\n", s.denial_rate));
    out.push_str(&format!("  Pending exposure:    {:.2}%\n", s.pending_rate));

    if let (Some(min), Some(max)) = (s.date_range.min, s.date_range.max) {
        out.push_str(&format!("\nDeal dates: {} to {}\n", min, max));
    }
    out
}
