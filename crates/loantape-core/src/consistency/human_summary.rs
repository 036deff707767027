//! Human-readable console rendering of consistency reports.

use crate::consistency::model::{Finding, PairCheck, SequenceOutcome};

const RULE: &str = "============================================================";

/// Sample identifiers printed per finding.
const PRINTED_SAMPLE_IDS: usize = 5;

/// Render one comparison as console text.
///
/// Informational only; the structured [`PairCheck`] is the source of truth.
pub fn render_report_text(check: &PairCheck) -> String {
    let report = &check.report;
    let mut out = String::new();

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "CONSISTENCY CHECK: {} vs {}\n",
        check.old_label, check.new_label
    ));
    out.push_str(RULE);
    out.push('\n');

    if report.passed() {
        out.push_str("✓ No critical issues found\n\n");
    } else {
        out.push_str(&format!(
            "✗ {} critical issue(s) found\n\n",
            report.issues().len()
        ));
    }

    if !report.issues().is_empty() {
        out.push_str("CRITICAL ISSUES:\n");
        for item in report.issues() {
            push_item(&mut out, "✗", item);
            if let Some(ids) = &item.ids {
                let shown: Vec<&str> = ids
                    .iter()
                    .take(PRINTED_SAMPLE_IDS)
                    .map(String::as_str)
                    .collect();
                out.push_str(&format!("    Sample IDs: {}\n", shown.join(", ")));
            }
        }
        out.push('\n');
    }

    if !report.warnings().is_empty() {
        out.push_str("WARNINGS:\n");
        for item in report.warnings() {
            push_item(&mut out, "⚠", item);
        }
        out.push('\n');
    }

    out.push_str("INFO:\n");
    for item in report.info() {
        push_item(&mut out, "ℹ", item);
    }

    out.push_str(RULE);
    out.push('\n');
    out
}

/// Render every comparison of a sequence followed by the overall verdict.
pub fn render_sequence_text(outcome: &SequenceOutcome) -> String {
    let mut out = String::new();
    if outcome.checks.is_empty() {
        out.push_str("Fewer than two snapshots supplied; nothing to compare.\n");
        return out;
    }

    for check in &outcome.checks {
        out.push_str(&render_report_text(check));
    }

    let failed = outcome
        .checks
        .iter()
        .filter(|c| !c.report.passed())
        .count();
    if outcome.all_passed {
        out.push_str(&format!(
            "\nAll {} comparison(s) passed.\n",
            outcome.checks.len()
        ));
    } else {
        out.push_str(&format!(
            "\n{} of {} comparison(s) have critical issues.\n",
            failed,
            outcome.checks.len()
        ));
    }
    out
}

fn push_item(out: &mut String, marker: &str, item: &Finding) {
    out.push_str(&format!("  {} [{}] {}\n", marker, item.check, item.detail));
}
