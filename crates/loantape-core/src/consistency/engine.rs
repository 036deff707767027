//! Consistency check engine.
//!
//! [`check`] compares two snapshots of the same loan tape and returns a
//! [`ConsistencyReport`]. The engine never fails: every rule is gated on
//! the columns it needs and is skipped when they are absent. Rules run in a
//! fixed order and a skipped rule never prevents later ones.

use crate::consistency::identifier::{
    inner_join, ordered_ids, resolve_identifiers, IdentifierResolution,
};
use crate::consistency::model::{checks, ConsistencyReport, Finding, ReportBuilder, Severity};
use crate::consistency::policy::{exceeds, CheckPolicy, RateRule};
use crate::model::Snapshot;
use crate::{log_op_end, log_op_start};
use std::collections::BTreeSet;
use std::time::Instant;

/// Compare `old` against `new` with the default [`CheckPolicy`].
///
/// Pure apart from logging: inputs are not mutated and identical inputs
/// produce identical reports.
pub fn check(old: &Snapshot, new: &Snapshot, old_label: &str, new_label: &str) -> ConsistencyReport {
    check_with_policy(&CheckPolicy::default(), old, new, old_label, new_label)
}

/// Compare `old` against `new` under an explicit policy.
pub fn check_with_policy(
    policy: &CheckPolicy,
    old: &Snapshot,
    new: &Snapshot,
    old_label: &str,
    new_label: &str,
) -> ConsistencyReport {
    let start = Instant::now();
    log_op_start!(
        "consistency_check",
        old_label = old_label,
        new_label = new_label
    );

    let labels = Labels {
        old: old_label,
        new: new_label,
    };
    let mut out = ReportBuilder::default();

    check_schema(old, new, labels, &mut out);

    match resolve_identifiers(policy, old, new) {
        IdentifierResolution::Resolved {
            old_column,
            new_column,
        } => {
            let ids = IdColumns {
                old: &old_column,
                new: &new_column,
            };
            check_presence(policy, old, new, ids, labels, &mut out);
            check_immutable_fields(policy, old, new, ids, &mut out);
            check_status_reversal(policy, old, new, ids, &mut out);
        }
        IdentifierResolution::Unavailable {
            old_column,
            new_column,
        } => {
            let mut missing_in = Vec::new();
            if old_column.is_none() {
                missing_in.push(old_label);
            }
            if new_column.is_none() {
                missing_in.push(new_label);
            }
            tracing::debug!(
                missing_in = ?missing_in,
                "identifier column unavailable, skipping record-level checks"
            );
            out.warning(
                checks::NO_ID_COLUMN,
                format!(
                    "No ID column found in {}. Record-level checks (missing deals, \
                     completed-deal amount changes, status reversals) were skipped.",
                    missing_in.join(" and ")
                ),
            );
        }
    }

    for rule in &policy.rate_rules {
        check_rate_shift(rule, old, new, labels, &mut out);
    }

    check_deal_count(old, new, labels, &mut out);

    let report = out.finish();
    log_op_end!(
        "consistency_check",
        duration_ms = start.elapsed().as_millis() as u64,
        issue_count = report.issues().len(),
        warning_count = report.warnings().len(),
        info_count = report.info().len(),
        passed = report.passed()
    );
    report
}

#[derive(Clone, Copy)]
struct Labels<'a> {
    old: &'a str,
    new: &'a str,
}

#[derive(Clone, Copy)]
struct IdColumns<'a> {
    old: &'a str,
    new: &'a str,
}

/// Columns added are informational; columns removed are a warning.
fn check_schema(old: &Snapshot, new: &Snapshot, labels: Labels<'_>, out: &mut ReportBuilder) {
    let old_cols = old.column_set();
    let new_cols = new.column_set();

    let added: Vec<&str> = new
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| !old_cols.contains(c))
        .collect();
    let removed: Vec<&str> = old
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| !new_cols.contains(c))
        .collect();

    if !added.is_empty() {
        out.info(
            checks::NEW_COLUMNS,
            format!("Columns added in {}: {}", labels.new, added.join(", ")),
        );
    }
    if !removed.is_empty() {
        out.warning(
            checks::MISSING_COLUMNS,
            format!(
                "Columns present in {} but missing in {}: {}",
                labels.old,
                labels.new,
                removed.join(", ")
            ),
        );
    }
}

fn check_presence(
    policy: &CheckPolicy,
    old: &Snapshot,
    new: &Snapshot,
    ids: IdColumns<'_>,
    labels: Labels<'_>,
    out: &mut ReportBuilder,
) {
    let old_ids = ordered_ids(old, ids.old);
    let new_ids = ordered_ids(new, ids.new);
    let old_set: BTreeSet<&str> = old_ids.iter().map(String::as_str).collect();
    let new_set: BTreeSet<&str> = new_ids.iter().map(String::as_str).collect();

    let missing: Vec<&String> = old_ids
        .iter()
        .filter(|id| !new_set.contains(id.as_str()))
        .collect();
    if !missing.is_empty() {
        let sample: Vec<String> = missing
            .iter()
            .take(policy.sample_limit)
            .map(|id| id.to_string())
            .collect();
        out.push(
            Finding::new(
                Severity::Critical,
                checks::MISSING_DEALS,
                format!(
                    "{} deals in {} are missing from {}",
                    missing.len(),
                    labels.old,
                    labels.new
                ),
            )
            .with_ids(sample),
        );
    }

    let added = new_ids
        .iter()
        .filter(|id| !old_set.contains(id.as_str()))
        .count();
    out.info(
        checks::NEW_DEALS,
        format!("{} new deals added since {}", added, labels.old),
    );
}

fn check_immutable_fields(
    policy: &CheckPolicy,
    old: &Snapshot,
    new: &Snapshot,
    ids: IdColumns<'_>,
    out: &mut ReportBuilder,
) {
    let status = policy.status_column.as_str();
    if !old.has_column(status) || !new.has_column(status) {
        tracing::debug!("status column absent, skipping immutable-field check");
        return;
    }

    let fields: Vec<&str> = policy
        .immutable_fields
        .iter()
        .map(String::as_str)
        .filter(|f| old.has_column(f) && new.has_column(f))
        .collect();
    if fields.is_empty() {
        return;
    }

    let completed = policy.completed_status.as_str();
    let old_completed = old
        .records()
        .iter()
        .filter(|r| r.text_eq(status, completed));
    let new_completed = new
        .records()
        .iter()
        .filter(|r| r.text_eq(status, completed));
    let pairs = inner_join(old_completed, ids.old, new_completed, ids.new);

    for field in fields {
        let changed = pairs
            .iter()
            .filter(|(o, n)| match (o.number(field), n.number(field)) {
                (Some(a), Some(b)) => exceeds((a - b).abs(), policy.mutation_tolerance),
                _ => false,
            })
            .count();
        if changed > 0 {
            out.critical(
                checks::field_changed(field),
                format!(
                    "{} completed deals have different {} values",
                    changed, field
                ),
            );
        }
    }
}

/// Completed is terminal: any joined pair leaving it is a reversal.
fn check_status_reversal(
    policy: &CheckPolicy,
    old: &Snapshot,
    new: &Snapshot,
    ids: IdColumns<'_>,
    out: &mut ReportBuilder,
) {
    let status = policy.status_column.as_str();
    if !old.has_column(status) || !new.has_column(status) {
        return;
    }

    let completed = policy.completed_status.as_str();
    let reversed = inner_join(old.records(), ids.old, new.records(), ids.new)
        .into_iter()
        .filter(|(o, n)| o.text_eq(status, completed) && !n.text_eq(status, completed))
        .count();

    if reversed > 0 {
        out.critical(
            checks::STATUS_REVERSAL,
            format!(
                "{} deals moved backwards from {} status",
                reversed, completed
            ),
        );
    }
}

/// Portfolio ratio of one snapshot, or `None` when undefined.
fn portfolio_ratio(snapshot: &Snapshot, rule: &RateRule) -> Option<f64> {
    let numerator = snapshot.sum(&rule.numerator)?;
    let denominator = snapshot.sum(&rule.denominator)?;
    (denominator != 0.0).then(|| numerator / denominator)
}

fn check_rate_shift(
    rule: &RateRule,
    old: &Snapshot,
    new: &Snapshot,
    labels: Labels<'_>,
    out: &mut ReportBuilder,
) {
    let (Some(old_rate), Some(new_rate)) = (portfolio_ratio(old, rule), portfolio_ratio(new, rule))
    else {
        tracing::debug!(rule = %rule.name, "rate inputs unavailable, skipping");
        return;
    };

    let shift = (new_rate - old_rate).abs();
    if exceeds(shift, rule.threshold) {
        out.warning(
            rule.shift_check.as_str(),
            format!(
                "{} changed by {} ({} → {})",
                rule.name,
                pct(shift),
                pct(old_rate),
                pct(new_rate)
            ),
        );
    } else {
        out.info(
            rule.info_check.as_str(),
            format!(
                "{}: {} ({}) → {} ({}), shift {}",
                rule.name,
                pct(old_rate),
                labels.old,
                pct(new_rate),
                labels.new,
                pct(shift)
            ),
        );
    }
}

fn check_deal_count(old: &Snapshot, new: &Snapshot, labels: Labels<'_>, out: &mut ReportBuilder) {
    let (old_count, new_count) = (old.len(), new.len());
    if new_count < old_count {
        out.critical(
            checks::DEAL_COUNT_DECREASED,
            format!(
                "New snapshot has fewer rows: {} ({}) → {} ({})",
                old_count, labels.old, new_count, labels.new
            ),
        );
    } else {
        out.info(
            checks::DEAL_COUNT,
            format!(
                "Deal count: {} ({}) → {} ({})",
                old_count, labels.old, new_count, labels.new
            ),
        );
    }
}

/// Ratio as a one-decimal percentage, e.g. `0.551` → `55.1%`.
fn pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
