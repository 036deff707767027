//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Handlers here own lifecycle logging for file-level operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The store uses only `tracing::debug!()` for internal details.

pub mod analyze;
pub mod check;
pub mod engine_command;
