//! Consistency report output types.
//!
//! The report shape (`issues`, `warnings`, `info`, `passed`) is consumed
//! verbatim by the text renderer, the narrative prompt builder and external
//! report formatters, so it serialises with stable field names.

use serde::{Deserialize, Serialize};

/// Fixed labels identifying which rule produced a finding.
pub mod checks {
    pub const NEW_COLUMNS: &str = "New Columns";
    pub const MISSING_COLUMNS: &str = "Missing Columns";
    pub const NO_ID_COLUMN: &str = "No ID Column";
    pub const MISSING_DEALS: &str = "Missing Deals";
    pub const NEW_DEALS: &str = "New Deals";
    pub const STATUS_REVERSAL: &str = "Status Reversal";
    pub const COLLECTION_RATE: &str = "Collection Rate";
    pub const COLLECTION_RATE_SHIFT: &str = "Collection Rate Shift";
    pub const DENIAL_RATE: &str = "Denial Rate";
    pub const DENIAL_RATE_SHIFT: &str = "Denial Rate Shift";
    pub const DEAL_COUNT: &str = "Deal Count";
    pub const DEAL_COUNT_DECREASED: &str = "Deal Count Decreased";

    /// Label for a mutated immutable field, e.g. `Purchase value Changed on Completed Deals`.
    pub fn field_changed(field: &str) -> String {
        format!("{} Changed on Completed Deals", field)
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported fact or anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    /// Rule label, see [`checks`]
    pub check: String,
    /// Human-readable detail
    pub detail: String,
    /// Sample identifiers, at most the policy's sample limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

impl Finding {
    pub fn new(severity: Severity, check: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            check: check.into(),
            detail: detail.into(),
            ids: None,
        }
    }

    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }
}

/// Result of comparing two snapshots.
///
/// Built once per comparison; `passed` is true iff `issues` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
    info: Vec<Finding>,
    passed: bool,
}

impl ConsistencyReport {
    /// CRITICAL findings in rule order
    pub fn issues(&self) -> &[Finding] {
        &self.issues
    }

    /// WARNING findings in rule order
    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// INFO findings in rule order
    pub fn info(&self) -> &[Finding] {
        &self.info
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// All findings: issues, then warnings, then info.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.issues
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// First finding produced by the named rule.
    pub fn find(&self, check: &str) -> Option<&Finding> {
        self.findings().find(|f| f.check == check)
    }

    pub fn has_warnings_or_issues(&self) -> bool {
        !self.issues.is_empty() || !self.warnings.is_empty()
    }
}

/// Accumulates findings into the bucket matching their severity.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
    info: Vec<Finding>,
}

impl ReportBuilder {
    pub(crate) fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Critical => self.issues.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.info.push(finding),
        }
    }

    pub(crate) fn critical(&mut self, check: impl Into<String>, detail: impl Into<String>) {
        self.push(Finding::new(Severity::Critical, check, detail));
    }

    pub(crate) fn warning(&mut self, check: impl Into<String>, detail: impl Into<String>) {
        self.push(Finding::new(Severity::Warning, check, detail));
    }

    pub(crate) fn info(&mut self, check: impl Into<String>, detail: impl Into<String>) {
        self.push(Finding::new(Severity::Info, check, detail));
    }

    pub(crate) fn finish(self) -> ConsistencyReport {
        let passed = self.issues.is_empty();
        ConsistencyReport {
            issues: self.issues,
            warnings: self.warnings,
            info: self.info,
            passed,
        }
    }
}

/// One comparison of consecutive snapshots, as produced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCheck {
    pub old_label: String,
    pub new_label: String,
    /// Content digest of the older snapshot's source, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_digest: Option<String>,
    /// Content digest of the newer snapshot's source, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_digest: Option<String>,
    pub report: ConsistencyReport,
}

/// All comparisons over a chronologically ordered snapshot sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceOutcome {
    /// One entry per consecutive pair, in chronological order
    pub checks: Vec<PairCheck>,
    /// AND over every report's `passed`
    pub all_passed: bool,
}

impl SequenceOutcome {
    /// True when any comparison produced a warning or a critical issue.
    pub fn has_findings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| c.report.has_warnings_or_issues())
    }
}
