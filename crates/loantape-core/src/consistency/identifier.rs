//! Identifier resolution and identifier-keyed joins.
//!
//! Each snapshot resolves its identifier column independently: the first
//! policy candidate present in its column set. Record-level checks run only
//! when both sides resolve one.

use crate::consistency::policy::CheckPolicy;
use crate::model::{Record, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of resolving identifier columns for a snapshot pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierResolution {
    /// Both snapshots carry an identifier column (names may differ).
    Resolved {
        old_column: String,
        new_column: String,
    },
    /// At least one side has no identifier column.
    Unavailable {
        old_column: Option<String>,
        new_column: Option<String>,
    },
}

/// First identifier candidate present in `snapshot`'s columns.
pub fn find_id_column(policy: &CheckPolicy, snapshot: &Snapshot) -> Option<String> {
    policy
        .id_candidates
        .iter()
        .find(|c| snapshot.has_column(c))
        .cloned()
}

/// Resolve identifier columns for both sides of a comparison.
pub fn resolve_identifiers(
    policy: &CheckPolicy,
    old: &Snapshot,
    new: &Snapshot,
) -> IdentifierResolution {
    match (find_id_column(policy, old), find_id_column(policy, new)) {
        (Some(old_column), Some(new_column)) => IdentifierResolution::Resolved {
            old_column,
            new_column,
        },
        (old_column, new_column) => IdentifierResolution::Unavailable {
            old_column,
            new_column,
        },
    }
}

/// Normalised identifiers of a snapshot in first-seen order, de-duplicated.
///
/// Records with an empty identifier are skipped.
pub fn ordered_ids(snapshot: &Snapshot, id_column: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    snapshot
        .records()
        .iter()
        .filter_map(|r| r.text(id_column))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Inner join of two record sequences on their identifier columns.
///
/// Every old/new pair sharing an identifier is emitted, old records in
/// their original order and, within one identifier, new records in theirs.
pub fn inner_join<'a, I, J>(
    old_records: I,
    old_column: &str,
    new_records: J,
    new_column: &str,
) -> Vec<(&'a Record, &'a Record)>
where
    I: IntoIterator<Item = &'a Record>,
    J: IntoIterator<Item = &'a Record>,
{
    let mut by_id: BTreeMap<String, Vec<&'a Record>> = BTreeMap::new();
    for record in new_records {
        if let Some(id) = record.text(new_column) {
            by_id.entry(id).or_default().push(record);
        }
    }

    let mut pairs = Vec::new();
    for old in old_records {
        let Some(id) = old.text(old_column) else {
            continue;
        };
        if let Some(matches) = by_id.get(&id) {
            pairs.extend(matches.iter().map(|new| (old, *new)));
        }
    }
    pairs
}
