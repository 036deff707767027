//! Currency rates and per-product configuration.
//!
//! Both are plain immutable values constructed by the caller and passed to
//! whatever needs them; nothing here is process-global.

use crate::errors::{ExError, ExErrorKind, LoanTapeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Currency every rate converts into.
pub const BASE_CURRENCY: &str = "USD";

/// Conversion rates into [`BASE_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::from_rates([
            ("AED", 0.2723),
            ("USD", 1.0),
            ("EUR", 1.08),
            ("GBP", 1.27),
            ("SAR", 0.2667),
            ("KWD", 3.26),
        ])
    }
}

impl CurrencyTable {
    pub fn from_rates<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: rates.into_iter().map(|(c, r)| (c.into(), r)).collect(),
        }
    }

    /// Supported currency codes, alphabetically.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// USD rate of `code`.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` when the code is not in the table.
    pub fn rate(&self, code: &str) -> Result<f64> {
        self.rates.get(code).copied().ok_or_else(|| {
            LoanTapeError::UnknownCurrency {
                code: code.to_string(),
            }
            .into()
        })
    }

    /// Multiplier applied to reported amounts for display.
    ///
    /// Converting is only supported into USD; any other display currency
    /// shows amounts as reported.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` when a conversion is needed and `reported` is unknown.
    pub fn multiplier(&self, reported: &str, display: &str) -> Result<f64> {
        if display == BASE_CURRENCY && reported != BASE_CURRENCY {
            self.rate(reported)
        } else {
            Ok(1.0)
        }
    }
}

/// Configuration of one company's product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub company: String,
    pub product: String,
    /// Currency the loan tape reports in
    pub currency: String,
    #[serde(default)]
    pub description: String,
    /// USD rate captured when the product was configured
    pub usd_rate: f64,
}

impl ProductConfig {
    /// Build a config, capturing the current USD rate of `currency`.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` when `currency` is not in `table`.
    pub fn new(
        table: &CurrencyTable,
        company: impl Into<String>,
        product: impl Into<String>,
        currency: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let currency = currency.into();
        let usd_rate = table.rate(&currency)?;
        Ok(Self {
            company: company.into(),
            product: product.into(),
            currency,
            description: description.into(),
            usd_rate,
        })
    }
}

/// Read a product config; a missing file means "not configured yet".
///
/// # Errors
///
/// `Io` when the file exists but cannot be read, `InvalidConfig` when it is
/// not a valid config document.
pub fn load_product_config(path: &Path) -> Result<Option<ProductConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_product_config")
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    let config = serde_json::from_str(&text).map_err(|e| {
        ExError::from(LoanTapeError::Config {
            reason: format!("{}: {}", path.display(), e),
        })
        .with_op("load_product_config")
    })?;
    Ok(Some(config))
}

/// Write a product config as pretty JSON.
///
/// # Errors
///
/// `Serialization` or `Io` on failure.
pub fn save_product_config(path: &Path, config: &ProductConfig) -> Result<()> {
    let text = serde_json::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("save_product_config")
            .with_message(format!("{}: {}", path.display(), e))
    })
}
