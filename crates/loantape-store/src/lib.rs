//! LoanTape Store - snapshot file loading
//!
//! Provides:
//! - CSV snapshot parsing into the core [`Snapshot`](loantape_core::Snapshot) model
//! - Cell typing (numbers, deal dates, text, empty)
//! - Content digests of source files
//! - Snapshot labels derived from dated file names

pub mod cell;
pub mod digest;
pub mod errors;
pub mod loader;

// Re-export key types
pub use errors::Result;
pub use loader::{load_snapshot, parse_snapshot, snapshot_date_from_file_name};
