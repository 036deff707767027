//! Pairwise consistency check scenarios.
//!
//! Every test builds snapshots in memory and runs the engine with the
//! default policy.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{base_deals, deal, snapshot, tape};
use loantape_core::consistency::model::checks;
use loantape_core::{check, Record, Severity};

// ---------------------------------------------------------------------------
// Self comparison
// ---------------------------------------------------------------------------

#[test]
fn test_self_comparison_passes_with_zero_shift() {
    let snap = tape("A", base_deals());
    let report = check(&snap, &snap, "A", "B");

    assert!(report.passed());
    assert!(report.issues().is_empty());
    assert!(report.warnings().is_empty());

    let checks_seen: Vec<&str> = report.info().iter().map(|f| f.check.as_str()).collect();
    assert_eq!(
        checks_seen,
        vec![
            checks::NEW_DEALS,
            checks::COLLECTION_RATE,
            checks::DENIAL_RATE,
            checks::DEAL_COUNT
        ]
    );
    assert_eq!(
        report.find(checks::NEW_DEALS).unwrap().detail,
        "0 new deals added since A"
    );
    assert!(report
        .find(checks::COLLECTION_RATE)
        .unwrap()
        .detail
        .ends_with("shift 0.0%"));
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

#[test]
fn test_missing_deal_is_critical_with_sample_ids() {
    let old = tape("A", base_deals());
    let new = tape("B", base_deals().into_iter().take(2).collect());

    let report = check(&old, &new, "A", "B");
    assert!(!report.passed());

    let missing = report.find(checks::MISSING_DEALS).unwrap();
    assert_eq!(missing.severity, Severity::Critical);
    assert_eq!(missing.detail, "1 deals in A are missing from B");
    assert_eq!(missing.ids.as_deref(), Some(&["3".to_string()][..]));
}

#[test]
fn test_sample_ids_are_capped_and_in_file_order() {
    let old_deals: Vec<Record> = (1..=15)
        .map(|i| deal(&i.to_string(), "Executed", 10.0, 0.0, 0.0))
        .collect();
    let old = tape("A", old_deals);
    let new = tape("B", vec![]);

    let report = check(&old, &new, "A", "B");
    let missing = report.find(checks::MISSING_DEALS).unwrap();
    assert_eq!(missing.detail, "15 deals in A are missing from B");

    let ids = missing.ids.clone().unwrap();
    let expected: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_new_deals_are_informational() {
    let old = tape("A", base_deals());
    let mut deals = base_deals();
    deals.push(deal("4", "Executed", 100.0, 0.0, 0.0));
    let new = tape("B", deals);

    let report = check(&old, &new, "A", "B");
    assert!(report.passed());
    assert_eq!(
        report.find(checks::NEW_DEALS).unwrap().detail,
        "1 new deals added since A"
    );
    assert_eq!(
        report.find(checks::DEAL_COUNT).unwrap().detail,
        "Deal count: 3 (A) → 4 (B)"
    );
}

#[test]
fn test_numeric_and_text_identifiers_match() {
    let old = snapshot(
        "A",
        &["ID", "Status"],
        vec![Record::new().with("ID", 7.0).with("Status", "Executed")],
    );
    let new = snapshot(
        "B",
        &["ID", "Status"],
        vec![Record::new().with("ID", " 7 ").with("Status", "Executed")],
    );

    let report = check(&old, &new, "A", "B");
    assert!(report.find(checks::MISSING_DEALS).is_none());
}

#[test]
fn test_identifier_column_may_differ_between_snapshots() {
    let old = snapshot(
        "A",
        &["Reference", "Status"],
        vec![Record::new().with("Reference", "R1").with("Status", "Completed")],
    );
    let new = snapshot(
        "B",
        &["Deal ID", "Status"],
        vec![Record::new().with("Deal ID", "R2").with("Status", "Completed")],
    );

    let report = check(&old, &new, "A", "B");
    let missing = report.find(checks::MISSING_DEALS).unwrap();
    assert_eq!(missing.ids.as_deref(), Some(&["R1".to_string()][..]));
}

// ---------------------------------------------------------------------------
// Completed-deal immutability
// ---------------------------------------------------------------------------

fn with_first_purchase(value: f64) -> Vec<Record> {
    let mut deals = base_deals();
    deals[0] = deal("1", "Completed", value, 100.0, 0.0);
    deals
}

#[test]
fn test_mutation_at_tolerance_is_ignored() {
    let old = tape("A", with_first_purchase(100.00));
    let new = tape("B", with_first_purchase(100.01));

    let report = check(&old, &new, "A", "B");
    assert!(report.passed());
    assert!(report
        .find(&checks::field_changed("Purchase value"))
        .is_none());
}

#[test]
fn test_mutation_beyond_tolerance_is_critical() {
    let old = tape("A", with_first_purchase(100.00));
    let new = tape("B", with_first_purchase(100.02));

    let report = check(&old, &new, "A", "B");
    assert!(!report.passed());

    let finding = report
        .find(&checks::field_changed("Purchase value"))
        .unwrap();
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(
        finding.detail,
        "1 completed deals have different Purchase value values"
    );
}

#[test]
fn test_mutation_on_active_deal_is_allowed() {
    let old = tape("A", base_deals());
    let mut deals = base_deals();
    deals[1] = deal("2", "Executed", 250.0, 50.0, 0.0);
    let new = tape("B", deals);

    let report = check(&old, &new, "A", "B");
    assert!(report
        .find(&checks::field_changed("Purchase value"))
        .is_none());
}

#[test]
fn test_mutation_check_skipped_without_status_column() {
    let cols = &["ID", "Purchase value"];
    let old = snapshot(
        "A",
        cols,
        vec![Record::new().with("ID", "1").with("Purchase value", 100.0)],
    );
    let new = snapshot(
        "B",
        cols,
        vec![Record::new().with("ID", "1").with("Purchase value", 500.0)],
    );

    let report = check(&old, &new, "A", "B");
    assert!(report.passed());
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

#[test]
fn test_status_reversal_is_critical() {
    let old = tape("A", base_deals());
    let mut deals = base_deals();
    deals[0] = deal("1", "Executed", 100.0, 100.0, 0.0);
    let new = tape("B", deals);

    let report = check(&old, &new, "A", "B");
    assert!(!report.passed());
    assert_eq!(
        report.find(checks::STATUS_REVERSAL).unwrap().detail,
        "1 deals moved backwards from Completed status"
    );
}

#[test]
fn test_forward_transition_is_not_reported() {
    let old = tape("A", base_deals());
    let mut deals = base_deals();
    deals[1] = deal("2", "Completed", 200.0, 50.0, 0.0);
    let new = tape("B", deals);

    let report = check(&old, &new, "A", "B");
    assert!(report.passed());
    assert!(report.find(checks::STATUS_REVERSAL).is_none());
}

#[test]
fn test_status_is_compared_trimmed() {
    let old = tape("A", base_deals());
    let mut deals = base_deals();
    deals[0] = deal("1", " Completed ", 100.0, 100.0, 0.0);
    let new = tape("B", deals);

    let report = check(&old, &new, "A", "B");
    assert!(report.find(checks::STATUS_REVERSAL).is_none());
}

// ---------------------------------------------------------------------------
// Portfolio rates
// ---------------------------------------------------------------------------

fn single_deal_tape(label: &str, collected: f64, denied: f64) -> loantape_core::Snapshot {
    tape(label, vec![deal("1", "Executed", 1000.0, collected, denied)])
}

#[test]
fn test_collection_shift_below_threshold_is_info() {
    let old = single_deal_tape("A", 300.0, 0.0);
    let new = single_deal_tape("B", 349.0, 0.0);

    let report = check(&old, &new, "A", "B");
    assert!(report.find(checks::COLLECTION_RATE_SHIFT).is_none());
    assert_eq!(
        report.find(checks::COLLECTION_RATE).unwrap().detail,
        "Collection rate: 30.0% (A) → 34.9% (B), shift 4.9%"
    );
}

#[test]
fn test_collection_shift_above_threshold_is_warning() {
    let old = single_deal_tape("A", 300.0, 0.0);
    let new = single_deal_tape("B", 351.0, 0.0);

    let report = check(&old, &new, "A", "B");
    let finding = report.find(checks::COLLECTION_RATE_SHIFT).unwrap();
    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(
        finding.detail,
        "Collection rate changed by 5.1% (30.0% → 35.1%)"
    );
    assert!(report.passed(), "rate shifts never fail a comparison");
}

#[test]
fn test_denial_shift_uses_tighter_threshold() {
    let old = single_deal_tape("A", 0.0, 0.0);
    let new = single_deal_tape("B", 0.0, 25.0);

    let report = check(&old, &new, "A", "B");
    let finding = report.find(checks::DENIAL_RATE_SHIFT).unwrap();
    assert_eq!(finding.detail, "Denial rate changed by 2.5% (0.0% → 2.5%)");
}

#[test]
fn test_rates_skipped_when_purchase_total_is_zero() {
    let old = single_deal_tape("A", 0.0, 0.0);
    let new = tape("B", vec![deal("1", "Executed", 0.0, 0.0, 0.0)]);

    let report = check(&old, &new, "A", "B");
    assert!(report.find(checks::COLLECTION_RATE).is_none());
    assert!(report.find(checks::COLLECTION_RATE_SHIFT).is_none());
}

// ---------------------------------------------------------------------------
// Deal count
// ---------------------------------------------------------------------------

#[test]
fn test_fewer_rows_is_critical() {
    let old = tape("A", base_deals());
    let new = tape("B", base_deals().into_iter().take(1).collect());

    let report = check(&old, &new, "A", "B");
    assert_eq!(
        report.find(checks::DEAL_COUNT_DECREASED).unwrap().detail,
        "New snapshot has fewer rows: 3 (A) → 1 (B)"
    );
    assert!(report.find(checks::DEAL_COUNT).is_none());
}

// ---------------------------------------------------------------------------
// Graceful degradation
// ---------------------------------------------------------------------------

#[test]
fn test_no_identifier_column_degrades_to_single_warning() {
    let cols = &["Status", "Purchase value"];
    let old = snapshot(
        "A",
        cols,
        vec![Record::new().with("Status", "Completed").with("Purchase value", 10.0)],
    );
    let new = snapshot(
        "B",
        cols,
        vec![Record::new().with("Status", "Executed").with("Purchase value", 99.0)],
    );

    let report = check(&old, &new, "A", "B");
    assert!(report.passed());

    let warning = report.find(checks::NO_ID_COLUMN).unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.detail.starts_with("No ID column found in A and B."));
    assert!(report.find(checks::MISSING_DEALS).is_none());
    assert!(report.find(checks::STATUS_REVERSAL).is_none());
    assert!(report.find(checks::COLLECTION_RATE).is_none());
    assert!(report.find(checks::DEAL_COUNT).is_some());
}

#[test]
fn test_identifier_missing_on_one_side_names_that_side() {
    let old = tape("A", base_deals());
    let new = snapshot(
        "B",
        &["Status", "Purchase value"],
        vec![Record::new().with("Status", "Executed")],
    );

    let report = check(&old, &new, "A", "B");
    let warning = report.find(checks::NO_ID_COLUMN).unwrap();
    assert!(warning.detail.starts_with("No ID column found in B."));
}

#[test]
fn test_schema_changes_are_reported() {
    let old = tape("A", base_deals());
    let new = snapshot(
        "B",
        &["ID", "Status", "Purchase value", "Collected till date", "Group"],
        base_deals(),
    );

    let report = check(&old, &new, "A", "B");
    assert_eq!(
        report.find(checks::NEW_COLUMNS).unwrap().detail,
        "Columns added in B: Group"
    );
    assert_eq!(
        report.find(checks::MISSING_COLUMNS).unwrap().detail,
        "Columns present in A but missing in B: Denied by insurance"
    );
    assert!(report.find(checks::DENIAL_RATE).is_none());
}

#[test]
fn test_duplicate_identifiers_join_every_pair() {
    let old = tape(
        "A",
        vec![
            deal("1", "Completed", 100.0, 0.0, 0.0),
            deal("1", "Completed", 100.0, 0.0, 0.0),
        ],
    );
    let new = tape(
        "B",
        vec![
            deal("1", "Completed", 150.0, 0.0, 0.0),
            deal("1", "Completed", 150.0, 0.0, 0.0),
        ],
    );

    let report = check(&old, &new, "A", "B");
    let finding = report
        .find(&checks::field_changed("Purchase value"))
        .unwrap();
    assert_eq!(
        finding.detail,
        "4 completed deals have different Purchase value values"
    );
}
