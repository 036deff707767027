//! Portfolio analytics over a small four-deal tape.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::NaiveDate;
use common::snapshot;
use loantape_core::analytics::{
    compute_actual_vs_expected, compute_ageing, compute_cohorts, compute_collection_velocity,
    compute_concentration, compute_denial_trend, compute_deployment, compute_revenue,
    compute_summary, Health,
};
use loantape_core::{CurrencyTable, ProductConfig, Record, Snapshot, Value};

const COLUMNS: &[&str] = &[
    "ID",
    "Status",
    "Deal date",
    "Purchase value",
    "Collected till date",
    "Denied by insurance",
    "Pending insurance response",
    "Expected total",
    "Group",
    "Product",
    "Discount",
    "New business",
    "Expected IRR",
    "Actual IRR",
];

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: &str,
    status: &str,
    deal_date: Option<&str>,
    amounts: [f64; 5],
    group: &str,
    product: &str,
    discount: f64,
    new_business: f64,
    irr: (Option<f64>, Option<f64>),
) -> Record {
    let [pv, collected, denied, pending, expected] = amounts;
    let opt = |v: Option<f64>| v.map(Value::Number).unwrap_or(Value::Empty);
    Record::new()
        .with("ID", id)
        .with("Status", status)
        .with(
            "Deal date",
            deal_date.map(|d| Value::Date(date(d))).unwrap_or(Value::Empty),
        )
        .with("Purchase value", pv)
        .with("Collected till date", collected)
        .with("Denied by insurance", denied)
        .with("Pending insurance response", pending)
        .with("Expected total", expected)
        .with("Group", group)
        .with("Product", product)
        .with("Discount", discount)
        .with("New business", new_business)
        .with("Expected IRR", opt(irr.0))
        .with("Actual IRR", opt(irr.1))
}

fn portfolio() -> Snapshot {
    snapshot(
        "2026-03-01",
        COLUMNS,
        vec![
            row(
                "1",
                "Completed",
                Some("2026-01-05"),
                [100.0, 110.0, 0.0, 0.0, 120.0],
                "G1",
                "P1",
                0.1,
                100.0,
                (Some(0.2), Some(0.25)),
            ),
            row(
                "2",
                "Executed",
                Some("2026-01-20"),
                [200.0, 50.0, 15.0, 40.0, 240.0],
                "G2",
                "P1",
                0.2,
                0.0,
                (Some(0.3), Some(50.0)),
            ),
            row(
                "3",
                "Executed",
                Some("2026-02-10"),
                [300.0, 0.0, 30.0, 100.0, 360.0],
                "G1",
                "P2",
                0.1,
                300.0,
                (None, None),
            ),
            row(
                "4",
                "Completed",
                None,
                [400.0, 400.0, 0.0, 0.0, 480.0],
                "G3",
                "P2",
                0.2,
                0.0,
                (None, None),
            ),
        ],
    )
}

#[test]
fn test_summary_totals_and_rates() {
    let summary = compute_summary(
        &portfolio(),
        None,
        &CurrencyTable::default(),
        "USD",
        "2026-03-01",
        None,
    )
    .unwrap();

    assert_eq!(summary.total_deals, 4);
    assert_close(summary.total_purchase_value, 1000.0);
    assert_close(summary.total_collected, 560.0);
    assert_close(summary.collection_rate, 56.0);
    assert_close(summary.denial_rate, 4.5);
    assert_close(summary.pending_rate, 14.0);
    assert_eq!(summary.completed_deals, 2);
    assert_eq!(summary.active_deals, 2);
    assert_eq!(summary.status_breakdown.get("Completed"), Some(&2));
    assert_eq!(summary.date_range.min, Some(date("2026-01-05")));
    assert_eq!(summary.date_range.max, Some(date("2026-02-10")));
    assert_eq!(summary.as_of_date, "2026-03-01");
}

#[test]
fn test_summary_converts_reported_currency_into_usd() {
    let table = CurrencyTable::default();
    let config = ProductConfig::new(&table, "acme", "claims", "AED", "").unwrap();

    let summary =
        compute_summary(&portfolio(), Some(&config), &table, "USD", "2026-03-01", None).unwrap();
    assert_close(summary.total_purchase_value, 272.3);
    assert_eq!(summary.reported_currency, "AED");
    // rates are currency-independent
    assert_close(summary.collection_rate, 56.0);

    let local =
        compute_summary(&portfolio(), Some(&config), &table, "AED", "2026-03-01", None).unwrap();
    assert_close(local.total_purchase_value, 1000.0);
}

#[test]
fn test_summary_on_empty_snapshot_has_zero_rates() {
    let empty = snapshot("empty", COLUMNS, vec![]);
    let summary =
        compute_summary(&empty, None, &CurrencyTable::default(), "USD", "x", None).unwrap();
    assert_eq!(summary.collection_rate, 0.0);
    assert_eq!(summary.date_range.min, None);
}

#[test]
fn test_deployment_splits_new_and_repeat_business() {
    let months = compute_deployment(&portfolio(), 1.0);
    assert_eq!(months.len(), 2);

    assert_eq!(months[0].month, "2026-01");
    assert_eq!(months[0].deal_count, 2);
    assert_close(months[0].purchase_value, 300.0);
    assert_close(months[0].new_business, 100.0);
    assert_close(months[0].repeat_business, 200.0);

    assert_eq!(months[1].month, "2026-02");
    assert_close(months[1].repeat_business, 0.0);
}

#[test]
fn test_denial_trend_rolling_average() {
    let trend = compute_denial_trend(&portfolio(), 1.0);
    assert_close(trend[0].denial_rate, 5.0);
    assert_close(trend[0].denial_rate_3m_avg, 5.0);
    assert_close(trend[1].denial_rate, 10.0);
    assert_close(trend[1].denial_rate_3m_avg, 7.5);
}

#[test]
fn test_cohorts_exclude_irr_outliers() {
    let cohorts = compute_cohorts(&portfolio(), 1.0);
    assert_eq!(cohorts.len(), 2);

    let jan = &cohorts[0];
    assert_eq!(jan.total_deals, 2);
    assert_eq!(jan.completed_deals, 1);
    assert_close(jan.completion_rate, 50.0);
    assert_close(jan.collection_rate, 53.3);
    assert_eq!(jan.avg_expected_irr, Some(25.0));
    assert_eq!(jan.avg_actual_irr, Some(25.0));

    let feb = &cohorts[1];
    assert_eq!(feb.avg_expected_irr, None);
    assert_eq!(feb.avg_actual_irr, None);
}

#[test]
fn test_actual_vs_expected_is_cumulative() {
    let ave = compute_actual_vs_expected(&portfolio(), 1.0);
    assert_close(ave.data[0].performance_ratio, 44.4);
    assert_close(ave.data[1].cumulative_expected, 720.0);
    assert_close(ave.data[1].performance_ratio, 22.2);
    assert_close(ave.overall_performance, 46.7);
}

#[test]
fn test_collection_velocity_buckets_completed_deals() {
    let velocity = compute_collection_velocity(&portfolio(), 1.0, date("2026-03-01"));
    assert_eq!(velocity.buckets.len(), 6);

    let b = &velocity.buckets[1];
    assert_eq!(b.bucket, "31-60");
    assert_eq!(b.deal_count, 1);
    assert_close(b.collected, 110.0);

    let total: usize = velocity.buckets.iter().map(|b| b.deal_count).sum();
    assert_eq!(total, 1, "undated completed deal is not bucketed");
    assert_eq!(velocity.monthly.len(), 2);
}

#[test]
fn test_ageing_and_health_of_active_deals() {
    let ageing = compute_ageing(&portfolio(), 1.0, date("2026-03-01"));
    assert_eq!(ageing.ageing_buckets.len(), 7);
    assert_eq!(ageing.ageing_buckets[0].deal_count, 1);
    assert_eq!(ageing.ageing_buckets[1].deal_count, 1);
    assert_eq!(ageing.total_active_deals, 2);
    assert_close(ageing.total_active_value, 500.0);

    let healthy = &ageing.health_summary[0];
    assert_eq!(healthy.status, Health::Healthy);
    assert_eq!(healthy.deal_count, 2);
    assert_close(healthy.percentage, 100.0);
    assert_eq!(healthy.color, "#4ADE80");
}

#[test]
fn test_revenue_without_gross_revenue_column() {
    let revenue = compute_revenue(&portfolio(), 1.0);
    assert_eq!(revenue.totals.gross_revenue, 0.0);
    assert_close(revenue.monthly[0].gross_revenue, 300.0);
    assert_close(revenue.monthly[0].realised_revenue, 160.0);
    assert_close(revenue.monthly[0].unrealised_revenue, 140.0);
}

#[test]
fn test_concentration_views() {
    let c = compute_concentration(&portfolio(), 1.0);

    let groups = c.group.unwrap();
    let order: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(order, vec!["G1", "G3", "G2"]);
    assert_close(groups[0].percentage, 40.0);

    let products = c.product.unwrap();
    assert_eq!(products[0].product, "P2");
    assert_close(products[0].percentage, 70.0);

    let discounts = c.discount.unwrap();
    assert_eq!(discounts.len(), 2);
    assert_close(discounts[0].discount, 0.1);
    assert_close(discounts[1].purchase_value, 600.0);

    assert_eq!(c.top_deals.len(), 4);
    assert_eq!(
        c.top_deals[0].get("Purchase value"),
        Some(&Value::Number(400.0))
    );
    assert_eq!(c.top_deals[0].get("Deal date"), Some(&Value::Empty));
    assert!(c.top_deals[0].get("ID").is_none());
}
