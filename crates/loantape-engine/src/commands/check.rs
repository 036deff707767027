//! Consistency checks over snapshot files.

use chrono::NaiveDate;
use loantape_core::consistency::{check_sequence_with_policy, CheckPolicy, SequenceOutcome};
use loantape_core::{log_op_end, log_op_error, log_op_start, Snapshot};
use loantape_store::errors::Result;
use loantape_store::{load_snapshot, snapshot_date_from_file_name};
use std::path::{Path, PathBuf};

/// Load every file and check consecutive pairs in date order
///
/// # Errors
///
/// The first load failure aborts the whole check; no partial outcome is
/// returned.
pub fn check_snapshot_files(paths: &[PathBuf], policy: &CheckPolicy) -> Result<SequenceOutcome> {
    log_op_start!("check_snapshot_files", snapshot_count = paths.len());
    let start = std::time::Instant::now();

    let loaded = paths
        .iter()
        .map(|p| load_snapshot(p).map(|s| (file_name(p), s)))
        .collect::<Result<Vec<(String, Snapshot)>>>()
        .map_err(|e| {
            log_op_error!(
                "check_snapshot_files",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    let ordered = order_snapshots(loaded);
    let outcome = check_sequence_with_policy(policy, &ordered);

    log_op_end!(
        "check_snapshot_files",
        duration_ms = start.elapsed().as_millis() as u64,
        pair_count = outcome.checks.len(),
        all_passed = outcome.all_passed
    );
    Ok(outcome)
}

/// Chronological order of `(file name, snapshot)` pairs
///
/// Dated labels ascend with undated labels first. Equal labels fall back to
/// the file name, so the result never depends on argument order.
pub fn order_snapshots(mut loaded: Vec<(String, Snapshot)>) -> Vec<Snapshot> {
    loaded.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    loaded.into_iter().map(|(_, snapshot)| snapshot).collect()
}

fn sort_key((name, snapshot): &(String, Snapshot)) -> (Option<NaiveDate>, &str, &str) {
    (
        snapshot_date_from_file_name(snapshot.label()),
        snapshot.label(),
        name.as_str(),
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &str) -> (String, Snapshot) {
        (format!("{}.csv", label), Snapshot::new(label, vec![], vec![]))
    }

    fn named(name: &str, label: &str) -> (String, Snapshot) {
        (name.to_string(), Snapshot::new(label, vec![], vec![]).with_digest(name))
    }

    #[test]
    fn test_order_is_chronological_with_undated_first() {
        let ordered = order_snapshots(vec![
            labelled("2026-03-31"),
            labelled("manual.csv"),
            labelled("2026-01-31"),
            labelled("2025-12-31"),
        ]);
        let labels: Vec<&str> = ordered.iter().map(Snapshot::label).collect();
        assert_eq!(
            labels,
            vec!["manual.csv", "2025-12-31", "2026-01-31", "2026-03-31"]
        );
    }

    #[test]
    fn test_same_date_files_order_by_file_name() {
        let forward = order_snapshots(vec![
            named("2026-01-31_a.csv", "2026-01-31"),
            named("2026-01-31_b.csv", "2026-01-31"),
        ]);
        let reversed = order_snapshots(vec![
            named("2026-01-31_b.csv", "2026-01-31"),
            named("2026-01-31_a.csv", "2026-01-31"),
        ]);
        let digests = |s: &[Snapshot]| {
            s.iter()
                .map(|x| x.digest().map(str::to_string))
                .collect::<Vec<_>>()
        };
        let expected = vec![
            Some("2026-01-31_a.csv".to_string()),
            Some("2026-01-31_b.csv".to_string()),
        ];
        assert_eq!(digests(&forward), expected);
        assert_eq!(digests(&reversed), expected);
    }
}
