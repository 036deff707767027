//! Snapshot consistency checking.
//!
//! Compares two time-ordered snapshots of the same loan tape and reports
//! data-integrity violations: disappeared deals, mutated financial fields on
//! completed deals, status regressions out of `Completed`, shrinking row
//! counts and unexplained portfolio-ratio shifts.
//!
//! ## Entry points
//!
//! ```ignore
//! use loantape_core::consistency::{check, check_sequence, render_sequence_text};
//!
//! let report = check(&old, &new, "2026-01-31", "2026-02-28");
//! let outcome = check_sequence(&snapshots);
//! println!("{}", render_sequence_text(&outcome));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports, including
//!   finding order and sample identifier order.
//! - **Graceful degradation**: missing optional columns skip the dependent
//!   rule; a missing identifier column yields one `No ID Column` warning.
//! - **No composite-key matching**: without an identifier column on both
//!   sides, record-level rules are disabled rather than guessed.

pub mod engine;
pub mod human_summary;
pub mod identifier;
pub mod model;
pub mod policy;
pub mod sequence;

pub use engine::{check, check_with_policy};
pub use human_summary::{render_report_text, render_sequence_text};
pub use identifier::{find_id_column, resolve_identifiers, IdentifierResolution};
pub use model::{ConsistencyReport, Finding, PairCheck, SequenceOutcome, Severity};
pub use policy::CheckPolicy;
pub use sequence::{check_sequence, check_sequence_with_policy};
