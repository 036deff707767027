//! Portfolio-level KPIs.

use crate::analytics::{deal_date, display_multiplier, percent};
use crate::config::{CurrencyTable, ProductConfig, BASE_CURRENCY};
use crate::errors::Result;
use crate::model::{columns, status, Snapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub snapshot_date: String,
    pub as_of_date: String,
    pub reported_currency: String,
    pub display_currency: String,
    pub usd_rate: f64,
    pub total_deals: usize,
    pub total_purchase_value: f64,
    pub total_collected: f64,
    pub total_denied: f64,
    pub total_pending: f64,
    /// Percent of purchase value
    pub collection_rate: f64,
    pub denial_rate: f64,
    pub pending_rate: f64,
    pub completed_deals: usize,
    pub active_deals: usize,
    pub status_breakdown: BTreeMap<String, usize>,
    pub date_range: DateRange,
}

/// Compute portfolio KPIs for one snapshot.
///
/// # Errors
///
/// `UnknownCurrency` when the configured reporting currency has no rate.
pub fn compute_summary(
    snapshot: &Snapshot,
    config: Option<&ProductConfig>,
    currencies: &CurrencyTable,
    display_currency: &str,
    snapshot_date: &str,
    as_of_date: Option<&str>,
) -> Result<PortfolioSummary> {
    let mult = display_multiplier(config, currencies, display_currency)?;
    let reported_currency = config
        .map(|c| c.currency.clone())
        .unwrap_or_else(|| BASE_CURRENCY.to_string());
    let usd_rate = currencies.rate(&reported_currency)?;

    let total_purchase = snapshot.sum_or_zero(columns::PURCHASE_VALUE) * mult;
    let total_collected = snapshot.sum_or_zero(columns::COLLECTED) * mult;
    let total_denied = snapshot.sum_or_zero(columns::DENIED) * mult;
    let total_pending = snapshot.sum_or_zero(columns::PENDING) * mult;

    let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for record in snapshot.records() {
        if let Some(s) = record.text(columns::STATUS) {
            *status_breakdown.entry(s).or_default() += 1;
        }
    }

    let dates: Vec<NaiveDate> = snapshot.records().iter().filter_map(deal_date).collect();

    Ok(PortfolioSummary {
        snapshot_date: snapshot_date.to_string(),
        as_of_date: as_of_date.unwrap_or(snapshot_date).to_string(),
        reported_currency,
        display_currency: display_currency.to_string(),
        usd_rate,
        total_deals: snapshot.len(),
        total_purchase_value: total_purchase,
        total_collected,
        total_denied,
        total_pending,
        collection_rate: percent(total_collected, total_purchase),
        denial_rate: percent(total_denied, total_purchase),
        pending_rate: percent(total_pending, total_purchase),
        completed_deals: status_breakdown.get(status::COMPLETED).copied().unwrap_or(0),
        active_deals: status_breakdown.get(status::EXECUTED).copied().unwrap_or(0),
        status_breakdown,
        date_range: DateRange {
            min: dates.iter().min().copied(),
            max: dates.iter().max().copied(),
        },
    })
}
