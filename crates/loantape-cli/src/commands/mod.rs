pub mod analyze;
pub mod check;
pub mod summary;

use loantape_core::config::{load_product_config, ProductConfig};
use loantape_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Read a product config named on the command line; it must exist.
pub fn read_config(path: Option<&Path>) -> Result<Option<ProductConfig>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(None);
    };
    match load_product_config(path)? {
        Some(config) => Ok(Some(config)),
        None => Err(format!("Config file not found: {}", path.display()).into()),
    }
}

/// Parse a `YYYY-MM-DD` command-line date.
pub fn parse_date(raw: &str) -> Result<chrono::NaiveDate, ExError> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("parse_date")
            .with_message(format!("invalid date '{}' (expected YYYY-MM-DD): {}", raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert_eq!(
            parse_date("2026-02-28").ok(),
            chrono::NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        let err = parse_date("28/02/2026").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }
}
