//! Portfolio analytics over one snapshot file.

use chrono::NaiveDate;
use loantape_core::analytics::{
    self, ActualVsExpected, Ageing, CohortRow, CollectionVelocity, Concentration,
    DenialTrendMonth, DeploymentMonth, PortfolioSummary, Revenue,
};
use loantape_core::config::{CurrencyTable, ProductConfig, BASE_CURRENCY};
use loantape_core::errors::{ExError, ExErrorKind};
use loantape_core::{log_op_end, log_op_error, log_op_start, Snapshot};
use loantape_store::errors::Result;
use loantape_store::load_snapshot;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One analytics view of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSection {
    Summary,
    Deployment,
    CollectionVelocity,
    DenialTrend,
    Cohorts,
    ActualVsExpected,
    Ageing,
    Revenue,
    Concentration,
}

impl AnalysisSection {
    pub const ALL: [AnalysisSection; 9] = [
        AnalysisSection::Summary,
        AnalysisSection::Deployment,
        AnalysisSection::CollectionVelocity,
        AnalysisSection::DenialTrend,
        AnalysisSection::Cohorts,
        AnalysisSection::ActualVsExpected,
        AnalysisSection::Ageing,
        AnalysisSection::Revenue,
        AnalysisSection::Concentration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSection::Summary => "summary",
            AnalysisSection::Deployment => "deployment",
            AnalysisSection::CollectionVelocity => "collection-velocity",
            AnalysisSection::DenialTrend => "denial-trend",
            AnalysisSection::Cohorts => "cohorts",
            AnalysisSection::ActualVsExpected => "actual-vs-expected",
            AnalysisSection::Ageing => "ageing",
            AnalysisSection::Revenue => "revenue",
            AnalysisSection::Concentration => "concentration",
        }
    }
}

impl fmt::Display for AnalysisSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisSection {
    type Err = ExError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AnalysisSection::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = AnalysisSection::ALL.iter().map(|x| x.as_str()).collect();
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_section")
                    .with_message(format!(
                        "unknown section '{}', expected one of: {}",
                        s,
                        names.join(", ")
                    ))
            })
    }
}

/// Inputs shared by every section.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub config: Option<ProductConfig>,
    pub currencies: CurrencyTable,
    pub display_currency: String,
    /// Cut-off: deals dated after it are excluded
    pub as_of: Option<NaiveDate>,
    /// Reference date for days-outstanding when `as_of` is not set
    pub today: NaiveDate,
}

impl AnalyzeOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            config: None,
            currencies: CurrencyTable::default(),
            display_currency: BASE_CURRENCY.to_string(),
            as_of: None,
            today,
        }
    }

    fn reference_date(&self) -> NaiveDate {
        self.as_of.unwrap_or(self.today)
    }
}

/// Serialisable result of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Summary(PortfolioSummary),
    Deployment(Vec<DeploymentMonth>),
    CollectionVelocity(CollectionVelocity),
    DenialTrend(Vec<DenialTrendMonth>),
    Cohorts(Vec<CohortRow>),
    ActualVsExpected(ActualVsExpected),
    Ageing(Ageing),
    Revenue(Revenue),
    Concentration(Concentration),
}

/// Load `path` and compute one analytics section
///
/// # Errors
///
/// Load failures, and `UnknownCurrency` when the configured reporting
/// currency has no rate.
pub fn analyze_snapshot_file(
    path: &Path,
    section: AnalysisSection,
    options: &AnalyzeOptions,
) -> Result<AnalysisOutput> {
    log_op_start!(
        "analyze_snapshot_file",
        section = section.as_str(),
        path = %path.display()
    );
    let start = std::time::Instant::now();

    let result = load_snapshot(path).and_then(|snapshot| analyze_snapshot(&snapshot, section, options));
    match result {
        Ok(output) => {
            log_op_end!(
                "analyze_snapshot_file",
                duration_ms = start.elapsed().as_millis() as u64,
                section = section.as_str()
            );
            Ok(output)
        }
        Err(e) => {
            log_op_error!(
                "analyze_snapshot_file",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// Compute one analytics section over an in-memory snapshot
///
/// # Errors
///
/// `UnknownCurrency` when the configured reporting currency has no rate.
pub fn analyze_snapshot(
    snapshot: &Snapshot,
    section: AnalysisSection,
    options: &AnalyzeOptions,
) -> Result<AnalysisOutput> {
    let filtered;
    let snapshot = match options.as_of {
        Some(as_of) => {
            filtered = analytics::filter_by_date(snapshot, as_of);
            tracing::debug!(
                kept = filtered.len(),
                total = snapshot.len(),
                "filtered snapshot by as-of date"
            );
            &filtered
        }
        None => snapshot,
    };

    let mult = analytics::display_multiplier(
        options.config.as_ref(),
        &options.currencies,
        &options.display_currency,
    )
    .map_err(|e| with_context(e, section))?;
    let today = options.reference_date();

    let output = match section {
        AnalysisSection::Summary => {
            let as_of = options.as_of.map(|d| d.format("%Y-%m-%d").to_string());
            AnalysisOutput::Summary(
                analytics::compute_summary(
                    snapshot,
                    options.config.as_ref(),
                    &options.currencies,
                    &options.display_currency,
                    snapshot.label(),
                    as_of.as_deref(),
                )
                .map_err(|e| with_context(e, section))?,
            )
        }
        AnalysisSection::Deployment => {
            AnalysisOutput::Deployment(analytics::compute_deployment(snapshot, mult))
        }
        AnalysisSection::CollectionVelocity => AnalysisOutput::CollectionVelocity(
            analytics::compute_collection_velocity(snapshot, mult, today),
        ),
        AnalysisSection::DenialTrend => {
            AnalysisOutput::DenialTrend(analytics::compute_denial_trend(snapshot, mult))
        }
        AnalysisSection::Cohorts => AnalysisOutput::Cohorts(analytics::compute_cohorts(snapshot, mult)),
        AnalysisSection::ActualVsExpected => {
            AnalysisOutput::ActualVsExpected(analytics::compute_actual_vs_expected(snapshot, mult))
        }
        AnalysisSection::Ageing => {
            AnalysisOutput::Ageing(analytics::compute_ageing(snapshot, mult, today))
        }
        AnalysisSection::Revenue => AnalysisOutput::Revenue(analytics::compute_revenue(snapshot, mult)),
        AnalysisSection::Concentration => {
            AnalysisOutput::Concentration(analytics::compute_concentration(snapshot, mult))
        }
    };
    Ok(output)
}

fn with_context(err: ExError, section: AnalysisSection) -> ExError {
    if err.op().is_some() {
        return err;
    }
    err.with_op(format!("analyze:{}", section))
}
