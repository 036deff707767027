//! Narrative (AI text) seam for data-integrity reports.
//!
//! The prompt is built purely from [`PairCheck`] values; the text generator
//! itself is an external service behind [`NarrativeService`].

use crate::consistency::model::{Finding, PairCheck};
use crate::errors::{ExError, ExErrorKind, Result};

/// External text-generation service.
pub trait NarrativeService {
    /// Generate report prose for `prompt`.
    ///
    /// # Errors
    ///
    /// `ExternalService` when the service cannot produce text.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Service used when no generator is configured; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableNarrativeService;

impl NarrativeService for UnavailableNarrativeService {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ExError::new(ExErrorKind::ExternalService)
            .with_op("generate_narrative")
            .with_message("no narrative service configured"))
    }
}

/// Serialise every finding of every comparison as plain text.
pub fn findings_text(checks: &[PairCheck]) -> String {
    let mut out = String::new();
    for check in checks {
        out.push_str(&format!(
            "\n\n--- Comparison: {} vs {} ---\n",
            check.old_label, check.new_label
        ));
        push_section(&mut out, "CRITICAL ISSUES", check.report.issues());
        push_section(&mut out, "WARNINGS", check.report.warnings());
        push_section(&mut out, "INFO", check.report.info());
    }
    out
}

fn push_section(out: &mut String, title: &str, items: &[Finding]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}:\n", title));
    for item in items {
        out.push_str(&format!("  - [{}] {}\n", item.check, item.detail));
    }
}

/// Title-case a product slug: `medical_claims` → `Medical Claims`.
fn segment_name(product: &str) -> String {
    product
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Build the analyst prompt for a data-integrity report.
pub fn build_integrity_prompt(company: &str, product: &str, checks: &[PairCheck]) -> String {
    let company_upper = company.to_uppercase();
    format!(
        "You are a senior analyst at a private credit fund specializing in asset-backed lending.
You are reviewing data integrity findings from loan tape snapshots provided by {company_upper},
a portfolio company in the {segment} segment.

The following consistency checks were run comparing multiple data snapshots over time:
{findings}

Please write a detailed, professional data integrity report that includes:

1. EXECUTIVE SUMMARY
   - Overall assessment of data quality (1-2 paragraphs)
   - Key concerns ranked by severity

2. DETAILED FINDINGS
   For each issue found, explain:
   - What the issue is in plain terms
   - Why it matters from a credit and data integrity perspective
   - Whether it could have an innocent explanation or is genuinely concerning
   - The potential financial impact if any

3. QUESTIONS FOR THE COMPANY
   - A numbered list of specific, direct questions to ask {company_upper}
   - Frame them professionally but do not soften the important ones

4. RECOMMENDED NEXT STEPS
   - What the fund should do before relying on this data for any decisions
   - Any additional data or verification needed

Write in a professional tone suitable for sharing with an investment committee.
Be direct about concerns but fair in acknowledging possible explanations.
Do not use overly technical language; this should be readable by both credit professionals and lawyers.",
        segment = segment_name(product),
        findings = findings_text(checks),
    )
}

/// Build the prompt and hand it to `service`.
///
/// # Errors
///
/// Propagates the service error.
pub fn generate_integrity_narrative(
    service: &dyn NarrativeService,
    company: &str,
    product: &str,
    checks: &[PairCheck],
) -> Result<String> {
    let prompt = build_integrity_prompt(company, product, checks);
    service.generate(&prompt)
}
