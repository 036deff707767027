//! LoanTape Core - snapshot consistency engine and portfolio analytics
//!
//! This crate provides the in-memory model and pure operations over loan tape
//! snapshots, including:
//! - Tabular snapshot model with optional, typed field access
//! - Pairwise and sequential consistency checking with severity-graded findings
//! - Human-readable rendering of check results
//! - Integrity prompt assembly for an external narrative service
//! - Portfolio analytics (summary, deployment, velocity, cohorts, concentration)
//! - Currency and product configuration
//!
//! Nothing here touches the filesystem except configuration load/save; file
//! parsing lives in `loantape-store`.

pub use loantape_core_types as core_types;

pub mod analytics;
pub mod config;
pub mod consistency;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod narrative;

// Re-export commonly used types
pub use config::{CurrencyTable, ProductConfig};
pub use consistency::{
    check, check_sequence, CheckPolicy, ConsistencyReport, Finding, PairCheck, SequenceOutcome,
    Severity,
};
pub use errors::{ExError, ExErrorKind, LoanTapeError, Result};
pub use model::{Record, Snapshot, Value};
pub use narrative::{build_integrity_prompt, NarrativeService};
