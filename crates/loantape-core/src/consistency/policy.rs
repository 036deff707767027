//! Check policy: every constant the consistency engine applies.
//!
//! The policy is an explicitly constructed, immutable value handed to the
//! engine. `CheckPolicy::default()` reproduces the standard loan tape rules.

use crate::consistency::model::checks;
use crate::model::{columns, status};

/// Absolute-difference guard applied on top of every strict `>` threshold
/// so an exact boundary never trips on binary floating-point noise.
pub const FLOAT_GUARD: f64 = 1e-9;

/// Identifier column candidates, in priority order.
pub const DEFAULT_ID_CANDIDATES: &[&str] =
    &["ID", "Id", "id", "Reference", "reference", "Deal ID", "deal_id"];

/// Financial fields that must not change once a deal is completed.
pub const DEFAULT_IMMUTABLE_FIELDS: &[&str] = &[
    columns::PURCHASE_VALUE,
    columns::PURCHASE_PRICE,
    columns::GROSS_REVENUE,
];

/// Portfolio ratio `sum(numerator) / sum(denominator)` compared across snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRule {
    /// Display name used in details, e.g. "Collection rate"
    pub name: String,
    pub numerator: String,
    pub denominator: String,
    /// Maximum absolute ratio shift before a WARNING is raised
    pub threshold: f64,
    /// Check label for the WARNING finding
    pub shift_check: String,
    /// Check label for the INFO finding
    pub info_check: String,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckPolicy {
    pub id_candidates: Vec<String>,
    pub immutable_fields: Vec<String>,
    pub status_column: String,
    pub completed_status: String,
    /// Absolute tolerance for immutable-field comparisons
    pub mutation_tolerance: f64,
    pub sample_limit: usize,
    pub rate_rules: Vec<RateRule>,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            id_candidates: DEFAULT_ID_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            immutable_fields: DEFAULT_IMMUTABLE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            status_column: columns::STATUS.to_string(),
            completed_status: status::COMPLETED.to_string(),
            mutation_tolerance: 0.01,
            sample_limit: 10,
            rate_rules: vec![
                RateRule {
                    name: "Collection rate".to_string(),
                    numerator: columns::COLLECTED.to_string(),
                    denominator: columns::PURCHASE_VALUE.to_string(),
                    threshold: 0.05,
                    shift_check: checks::COLLECTION_RATE_SHIFT.to_string(),
                    info_check: checks::COLLECTION_RATE.to_string(),
                },
                RateRule {
                    name: "Denial rate".to_string(),
                    numerator: columns::DENIED.to_string(),
                    denominator: columns::PURCHASE_VALUE.to_string(),
                    threshold: 0.02,
                    shift_check: checks::DENIAL_RATE_SHIFT.to_string(),
                    info_check: checks::DENIAL_RATE.to_string(),
                },
            ],
        }
    }
}

/// Strict `delta > limit`, ignoring differences below [`FLOAT_GUARD`].
pub fn exceeds(delta: f64, limit: f64) -> bool {
    delta - limit > FLOAT_GUARD
}
