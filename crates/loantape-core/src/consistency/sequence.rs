//! Cross-snapshot orchestration.
//!
//! Runs the engine over every consecutive pair of a chronologically ordered
//! snapshot sequence. `n` snapshots yield `n - 1` comparisons; fewer than two
//! snapshots yield none and vacuously pass.

use crate::consistency::engine::check_with_policy;
use crate::consistency::model::{PairCheck, SequenceOutcome};
use crate::consistency::policy::CheckPolicy;
use crate::model::Snapshot;
use crate::{log_op_end, log_op_start};
use std::time::Instant;

/// Check every consecutive pair with the default policy.
///
/// `snapshots` must already be in ascending date order; pairs are processed
/// in that order and none is skipped.
pub fn check_sequence(snapshots: &[Snapshot]) -> SequenceOutcome {
    check_sequence_with_policy(&CheckPolicy::default(), snapshots)
}

/// Check every consecutive pair under an explicit policy.
pub fn check_sequence_with_policy(policy: &CheckPolicy, snapshots: &[Snapshot]) -> SequenceOutcome {
    let start = Instant::now();
    log_op_start!("check_sequence", snapshot_count = snapshots.len());

    let checks: Vec<PairCheck> = snapshots
        .windows(2)
        .map(|pair| {
            let (old, new) = (&pair[0], &pair[1]);
            PairCheck {
                old_label: old.label().to_string(),
                new_label: new.label().to_string(),
                old_digest: old.digest().map(str::to_string),
                new_digest: new.digest().map(str::to_string),
                report: check_with_policy(policy, old, new, old.label(), new.label()),
            }
        })
        .collect();
    let all_passed = checks.iter().all(|c| c.report.passed());

    log_op_end!(
        "check_sequence",
        duration_ms = start.elapsed().as_millis() as u64,
        pair_count = checks.len(),
        all_passed = all_passed
    );
    SequenceOutcome { checks, all_passed }
}
