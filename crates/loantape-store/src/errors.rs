//! Error handling for loantape-store
//!
//! Wraps loantape-core ExError with loader-specific helpers

use loantape_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an error for malformed delimited text
pub fn csv_error(label: &str, err: csv::Error) -> ExError {
    let mut ex = ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("parse_snapshot")
        .with_snapshot(label)
        .with_message(err.to_string());
    if let Some(position) = err.position() {
        ex = ex.with_row(position.line() as usize);
    }
    ex
}
