//! Vintage cohorts by origination month.

use crate::analytics::{group_by_month, percent, round_to, sum_of};
use crate::model::{columns, status, Record, Snapshot};
use serde::{Deserialize, Serialize};

/// Actual IRR values at or above this (1000%) are treated as data errors.
const ACTUAL_IRR_OUTLIER: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub month: String,
    pub total_deals: usize,
    pub completed_deals: usize,
    pub completion_rate: f64,
    pub purchase_value: f64,
    pub collected: f64,
    pub denied: f64,
    pub pending: f64,
    pub collection_rate: f64,
    pub denial_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_expected_irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_actual_irr: Option<f64>,
}

/// Mean of the numeric values accepted by `keep`, in percent.
fn mean_percent<F>(records: &[&Record], column: &str, keep: F) -> Option<f64>
where
    F: Fn(f64) -> bool,
{
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.number(column))
        .filter(|v| keep(*v))
        .collect();
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round_to(mean * 100.0, 1))
}

pub fn compute_cohorts(snapshot: &Snapshot, mult: f64) -> Vec<CohortRow> {
    let has_expected_irr = snapshot.has_column(columns::EXPECTED_IRR);
    let has_actual_irr = snapshot.has_column(columns::ACTUAL_IRR);

    group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let total = records.len();
            let completed = records
                .iter()
                .filter(|r| r.text_eq(columns::STATUS, status::COMPLETED))
                .count();
            let pv = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            let denied = sum_of(&records, columns::DENIED) * mult;
            let pending = sum_of(&records, columns::PENDING) * mult;

            CohortRow {
                month,
                total_deals: total,
                completed_deals: completed,
                completion_rate: round_to(percent(completed as f64, total as f64), 1),
                purchase_value: round_to(pv, 2),
                collected: round_to(collected, 2),
                denied: round_to(denied, 2),
                pending: round_to(pending, 2),
                collection_rate: round_to(percent(collected, pv), 1),
                denial_rate: round_to(percent(denied, pv), 1),
                avg_expected_irr: if has_expected_irr {
                    mean_percent(&records, columns::EXPECTED_IRR, |_| true)
                } else {
                    None
                },
                avg_actual_irr: if has_actual_irr {
                    mean_percent(&records, columns::ACTUAL_IRR, |v| v < ACTUAL_IRR_OUTLIER)
                } else {
                    None
                },
            }
        })
        .collect()
}
