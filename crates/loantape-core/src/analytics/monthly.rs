//! Month-by-month aggregates: deployment, denial trend, actual vs expected,
//! revenue.

use crate::analytics::{count_of, group_by_month, percent, round_to, sum_of};
use crate::model::{columns, Snapshot};
use serde::{Deserialize, Serialize};

/// Capital deployed in one origination month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentMonth {
    pub month: String,
    pub purchase_value: f64,
    pub deal_count: usize,
    pub new_business: f64,
    pub repeat_business: f64,
}

/// Monthly deployment split into new and repeat business.
///
/// Without a `New business` column all deployment counts as new.
pub fn compute_deployment(snapshot: &Snapshot, mult: f64) -> Vec<DeploymentMonth> {
    let has_new = snapshot.has_column(columns::NEW_BUSINESS);
    group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            let new_business = if has_new {
                sum_of(&records, columns::NEW_BUSINESS) * mult
            } else {
                purchase_value
            };
            DeploymentMonth {
                month,
                purchase_value,
                deal_count: count_of(&records, columns::PURCHASE_VALUE),
                new_business,
                repeat_business: purchase_value - new_business,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenialTrendMonth {
    pub month: String,
    pub purchase_value: f64,
    pub denied: f64,
    pub collected: f64,
    pub deal_count: usize,
    pub denial_rate: f64,
    pub collection_rate: f64,
    /// Rolling mean of `denial_rate` over up to three months ending here
    pub denial_rate_3m_avg: f64,
}

/// Monthly denial and collection rates with a 3-month rolling average.
pub fn compute_denial_trend(snapshot: &Snapshot, mult: f64) -> Vec<DenialTrendMonth> {
    let mut rows: Vec<DenialTrendMonth> = group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            let denied = sum_of(&records, columns::DENIED) * mult;
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            DenialTrendMonth {
                month,
                purchase_value,
                denied,
                collected,
                deal_count: count_of(&records, columns::PURCHASE_VALUE),
                denial_rate: round_to(percent(denied, purchase_value), 2),
                collection_rate: round_to(percent(collected, purchase_value), 2),
                denial_rate_3m_avg: 0.0,
            }
        })
        .collect();

    let rates: Vec<f64> = rows.iter().map(|r| r.denial_rate).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        let window = &rates[i.saturating_sub(2)..=i];
        row.denial_rate_3m_avg = round_to(window.iter().sum::<f64>() / window.len() as f64, 2);
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualVsExpectedMonth {
    pub month: String,
    pub collected: f64,
    pub expected: f64,
    pub purchase_value: f64,
    pub cumulative_collected: f64,
    pub cumulative_expected: f64,
    pub cumulative_purchase: f64,
    /// Cumulative collected as percent of cumulative expected
    pub performance_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualVsExpected {
    pub data: Vec<ActualVsExpectedMonth>,
    pub total_collected: f64,
    pub total_expected: f64,
    pub overall_performance: f64,
}

/// Cumulative collections against `Expected total`.
pub fn compute_actual_vs_expected(snapshot: &Snapshot, mult: f64) -> ActualVsExpected {
    let mut cumulative = (0.0, 0.0, 0.0);
    let data = group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            let expected = sum_of(&records, columns::EXPECTED_TOTAL) * mult;
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            cumulative.0 += collected;
            cumulative.1 += expected;
            cumulative.2 += purchase_value;
            ActualVsExpectedMonth {
                month,
                collected,
                expected,
                purchase_value,
                cumulative_collected: cumulative.0,
                cumulative_expected: cumulative.1,
                cumulative_purchase: cumulative.2,
                performance_ratio: round_to(percent(cumulative.0, cumulative.1), 1),
            }
        })
        .collect();

    let total_collected = snapshot.sum_or_zero(columns::COLLECTED) * mult;
    let total_expected = snapshot.sum_or_zero(columns::EXPECTED_TOTAL) * mult;
    ActualVsExpected {
        data,
        total_collected,
        total_expected,
        overall_performance: round_to(percent(total_collected, total_expected), 1),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueMonth {
    pub month: String,
    pub gross_revenue: f64,
    pub collected: f64,
    pub purchase_value: f64,
    pub setup_fees: f64,
    pub other_fees: f64,
    /// Gross revenue scaled by the month's collection ratio
    pub realised_revenue: f64,
    pub unrealised_revenue: f64,
    /// Gross revenue as percent of purchase value
    pub gross_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTotals {
    pub gross_revenue: f64,
    pub setup_fees: f64,
    pub other_fees: f64,
    pub total_income: f64,
    pub gross_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub monthly: Vec<RevenueMonth>,
    pub totals: RevenueTotals,
}

/// Realised vs unrealised revenue and fee income.
///
/// Without a `Gross revenue` column the monthly series falls back to
/// purchase value and the gross revenue total is zero.
pub fn compute_revenue(snapshot: &Snapshot, mult: f64) -> Revenue {
    let gross_column = if snapshot.has_column(columns::GROSS_REVENUE) {
        columns::GROSS_REVENUE
    } else {
        columns::PURCHASE_VALUE
    };

    let monthly = group_by_month(snapshot.records())
        .into_iter()
        .map(|(month, records)| {
            let gross_revenue = sum_of(&records, gross_column) * mult;
            let collected = sum_of(&records, columns::COLLECTED) * mult;
            let purchase_value = sum_of(&records, columns::PURCHASE_VALUE) * mult;
            let realised_revenue = if purchase_value == 0.0 {
                0.0
            } else {
                gross_revenue * (collected / purchase_value)
            };
            RevenueMonth {
                month,
                gross_revenue,
                collected,
                purchase_value,
                setup_fees: sum_of(&records, columns::SETUP_FEE) * mult,
                other_fees: sum_of(&records, columns::OTHER_FEE) * mult,
                realised_revenue,
                unrealised_revenue: gross_revenue - realised_revenue,
                gross_margin: round_to(percent(gross_revenue, purchase_value), 2),
            }
        })
        .collect();

    let total_pv = snapshot.sum_or_zero(columns::PURCHASE_VALUE) * mult;
    let gross_revenue = snapshot.sum_or_zero(columns::GROSS_REVENUE) * mult;
    let setup_fees = snapshot.sum_or_zero(columns::SETUP_FEE) * mult;
    let other_fees = snapshot.sum_or_zero(columns::OTHER_FEE) * mult;

    Revenue {
        monthly,
        totals: RevenueTotals {
            gross_revenue,
            setup_fees,
            other_fees,
            total_income: gross_revenue + setup_fees + other_fees,
            gross_margin: round_to(percent(gross_revenue, total_pv), 2),
        },
    }
}
