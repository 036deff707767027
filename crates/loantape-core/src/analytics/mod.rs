//! Portfolio analytics over a single snapshot.
//!
//! Plain groupby/aggregate transforms. Every function takes a snapshot and
//! a currency multiplier and returns serialisable values; none of them read
//! files or mutate the snapshot. Month groupings key on `Deal date` and are
//! emitted in ascending month order; deals without a date are not grouped.

pub mod cohort;
pub mod concentration;
pub mod monthly;
pub mod summary;
pub mod velocity;

pub use cohort::{compute_cohorts, CohortRow};
pub use concentration::{compute_concentration, Concentration};
pub use monthly::{
    compute_actual_vs_expected, compute_denial_trend, compute_deployment, compute_revenue,
    ActualVsExpected, DeploymentMonth, DenialTrendMonth, Revenue,
};
pub use summary::{compute_summary, PortfolioSummary};
pub use velocity::{classify_health, compute_ageing, compute_collection_velocity, Ageing, CollectionVelocity, Health};

use crate::config::{CurrencyTable, ProductConfig};
use crate::errors::Result;
use crate::model::{columns, Record, Snapshot};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Multiplier converting reported amounts into `display_currency`.
///
/// Without a product config amounts are assumed to be in the display
/// currency already.
///
/// # Errors
///
/// `UnknownCurrency` when the configured currency is not in `currencies`.
pub fn display_multiplier(
    config: Option<&ProductConfig>,
    currencies: &CurrencyTable,
    display_currency: &str,
) -> Result<f64> {
    match config {
        Some(cfg) => currencies.multiplier(&cfg.currency, display_currency),
        None => Ok(1.0),
    }
}

/// New snapshot with the deals dated on or before `as_of`.
///
/// Deals without a parseable date are dropped, as they cannot be placed
/// before the cut-off.
pub fn filter_by_date(snapshot: &Snapshot, as_of: NaiveDate) -> Snapshot {
    if !snapshot.has_column(columns::DEAL_DATE) {
        return snapshot.clone();
    }
    snapshot.filter(|r| deal_date(r).is_some_and(|d| d <= as_of))
}

pub fn deal_date(record: &Record) -> Option<NaiveDate> {
    record.get_field(columns::DEAL_DATE).and_then(|v| v.as_date())
}

/// Origination month `YYYY-MM` of a deal.
pub fn month_key(record: &Record) -> Option<String> {
    deal_date(record).map(|d| d.format("%Y-%m").to_string())
}

/// Whole days between the deal date and `as_of`.
pub fn days_outstanding(record: &Record, as_of: NaiveDate) -> Option<i64> {
    deal_date(record).map(|d| (as_of - d).num_days())
}

/// Records grouped by origination month, months ascending.
pub(crate) fn group_by_month<'a, I>(records: I) -> BTreeMap<String, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<String, Vec<&'a Record>> = BTreeMap::new();
    for record in records {
        if let Some(month) = month_key(record) {
            groups.entry(month).or_default().push(record);
        }
    }
    groups
}

/// Records grouped by the normalised text of `column`.
pub(crate) fn group_by_text<'a, I>(records: I, column: &str) -> BTreeMap<String, Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<String, Vec<&'a Record>> = BTreeMap::new();
    for record in records {
        if let Some(key) = record.text(column) {
            groups.entry(key).or_default().push(record);
        }
    }
    groups
}

pub(crate) fn sum_of(records: &[&Record], column: &str) -> f64 {
    records.iter().filter_map(|r| r.number(column)).sum()
}

/// Number of records with a numeric value in `column`.
pub(crate) fn count_of(records: &[&Record], column: &str) -> usize {
    records.iter().filter(|r| r.number(column).is_some()).count()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole` in percent, or 0 when `whole` is zero.
pub(crate) fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Compact money formatting: `1.2M`, `350K`, `12`.
pub fn fmt_m(value: f64) -> String {
    if value.abs() >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value.abs() >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}
