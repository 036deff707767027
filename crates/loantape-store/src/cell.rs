//! Cell typing
//!
//! Every raw cell becomes a [`Value`]. Deal dates are coerced: a value that
//! matches none of the accepted formats becomes `Empty` rather than an error.
//! Identifier columns stay text so long numeric ids are matched exactly.

use chrono::{NaiveDate, NaiveDateTime};
use loantape_core::consistency::policy::DEFAULT_ID_CANDIDATES;
use loantape_core::model::columns;
use loantape_core::Value;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Type one raw cell of `column`
pub fn parse_cell(column: &str, raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Empty;
    }
    if column == columns::DEAL_DATE {
        return parse_date(trimmed).map_or(Value::Empty, Value::Date);
    }
    if DEFAULT_ID_CANDIDATES.iter().any(|c| *c == column) {
        return Value::Text(identifier_text(trimmed));
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(raw.to_string()),
    }
}

/// Identifier cell text; an all-zero fraction is dropped (`"7.0"` is `"7"`)
fn identifier_text(raw: &str) -> String {
    match raw.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b == b'0') =>
        {
            whole.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Parse a date in any accepted format; day-first wins over month-first
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}
