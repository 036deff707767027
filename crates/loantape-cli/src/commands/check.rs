//! Consistency check command

use clap::{Args, ValueEnum};
use loantape_core::consistency::{render_sequence_text, CheckPolicy};
use loantape_core::narrative::build_integrity_prompt;
use loantape_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Snapshot files; ordered by the date in their names
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write an integrity-report prompt here when there are findings
    #[arg(long, requires_all = ["company", "product"])]
    pub prompt_out: Option<PathBuf>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub product: Option<String>,

    /// Exit non-zero when any comparison has critical issues
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::CheckSequence {
        paths: args.files,
        policy: CheckPolicy::default(),
    };
    let outcome = match apply_engine_command(cmd)? {
        EngineCommandResult::CheckSequence(outcome) => outcome,
        EngineCommandResult::Analysis(_) => return Err("unexpected engine result".into()),
    };

    match args.format {
        OutputFormat::Text => print!("{}", render_sequence_text(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if let Some(path) = args.prompt_out {
        if outcome.has_findings() {
            let prompt = build_integrity_prompt(
                args.company.as_deref().unwrap_or_default(),
                args.product.as_deref().unwrap_or_default(),
                &outcome.checks,
            );
            std::fs::write(&path, prompt)?;
            eprintln!("Integrity prompt written to {}", path.display());
        } else {
            eprintln!("No warnings or issues; integrity prompt not written.");
        }
    }

    if args.strict && !outcome.all_passed {
        let failed = outcome
            .checks
            .iter()
            .filter(|c| !c.report.passed())
            .count();
        return Err(format!(
            "{} of {} comparison(s) have critical issues",
            failed,
            outcome.checks.len()
        )
        .into());
    }

    Ok(())
}
