//! Engine-level commands that read snapshot files.

use crate::commands::analyze::{analyze_snapshot_file, AnalysisOutput, AnalysisSection, AnalyzeOptions};
use crate::commands::check::check_snapshot_files;
use loantape_core::consistency::{CheckPolicy, SequenceOutcome};
use loantape_store::errors::Result;
use std::path::PathBuf;

/// Engine-level commands that require file I/O.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Check every consecutive pair of the given snapshot files.
    CheckSequence {
        paths: Vec<PathBuf>,
        policy: CheckPolicy,
    },
    /// Compute one analytics section of a snapshot file.
    Analyze {
        path: PathBuf,
        section: AnalysisSection,
        options: AnalyzeOptions,
    },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    CheckSequence(SequenceOutcome),
    Analysis(AnalysisOutput),
}

/// Apply an engine command.
///
/// # Errors
///
/// Propagates load and analysis failures from the handlers.
pub fn apply_engine_command(cmd: EngineCommand) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::CheckSequence { paths, policy } => {
            check_snapshot_files(&paths, &policy).map(EngineCommandResult::CheckSequence)
        }
        EngineCommand::Analyze {
            path,
            section,
            options,
        } => analyze_snapshot_file(&path, section, &options).map(EngineCommandResult::Analysis),
    }
}
