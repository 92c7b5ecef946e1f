//! Common types used throughout the Intrinsic framework.
//!
//! This module defines the stock records consumed by the engine, the
//! controls supplied by the caller, and the results the engine produces.

use crate::{IntrinsicError, Result};
use chrono::{DateTime, NaiveDateTime};
use derive_more::{Display, From};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

/// A listed security's ticker, e.g. `"2330"` or `"AAPL"`.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker from anything string-like.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self(ticker.into())
    }

    /// The ticker text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Deserialize a number that may be `null`, mapping `null` to zero.
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// One stock's fundamental ratios as produced by the data pipeline.
///
/// Field names follow the upstream JSON (camelCase). Missing or `null`
/// numbers deserialize to zero; the per-share figures that the pipeline
/// can legitimately fail to derive stay optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockRecord {
    /// Ticker identity.
    pub ticker: Ticker,
    /// Display name.
    pub name: String,
    /// Sector label; drives the exit multiple.
    pub sector: String,
    /// Market price per share.
    #[serde(deserialize_with = "null_as_zero")]
    pub price: f64,
    /// Current earnings per share.
    #[serde(deserialize_with = "null_as_zero")]
    pub eps: f64,
    /// Price-to-earnings ratio.
    #[serde(deserialize_with = "null_as_zero")]
    pub pe: f64,
    /// Price-to-book ratio.
    #[serde(deserialize_with = "null_as_zero")]
    pub pb: f64,
    /// Return on equity (%).
    #[serde(deserialize_with = "null_as_zero")]
    pub roe: f64,
    /// Dividend yield (%).
    #[serde(deserialize_with = "null_as_zero")]
    pub dividend_yield: f64,
    /// Debt-to-equity ratio.
    #[serde(deserialize_with = "null_as_zero")]
    pub debt_to_equity: f64,
    /// Current ratio.
    #[serde(deserialize_with = "null_as_zero")]
    pub current_ratio: f64,
    /// Trailing free cash flow (currency units).
    #[serde(deserialize_with = "null_as_zero")]
    pub fcf: f64,
    /// Book value per share.
    #[serde(deserialize_with = "null_as_zero")]
    pub bvps: f64,
    /// Raw growth rate (%).
    #[serde(deserialize_with = "null_as_zero")]
    pub growth_rate: f64,
    /// Three-period smoothed EPS.
    pub avg_eps: Option<f64>,
    /// Trailing free cash flow per share.
    pub fcf_per_share: Option<f64>,
    /// Three-period smoothed free cash flow per share.
    pub avg_fcf_per_share: Option<f64>,
    /// Annual EPS history, oldest first.
    pub historical_eps: Vec<f64>,
    /// Annualized share dilution (%); negative for buybacks.
    pub share_dilution_rate: Option<f64>,
    /// Set upstream when retrieval failed; such records are not valued.
    pub fetch_error: bool,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.naive_local())
        .or_else(|_| text.parse::<NaiveDateTime>())
        .map_err(serde::de::Error::custom)
}

/// A batch of stock records plus the time the batch was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    /// When the data pipeline last refreshed the records.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_update: NaiveDateTime,
    /// The records, in pipeline order.
    #[serde(default)]
    pub stocks: Vec<StockRecord>,
}

impl StockSnapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| IntrinsicError::Snapshot(format!("malformed snapshot: {e}")))
    }

    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            IntrinsicError::Snapshot(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Look up a record by ticker.
    ///
    /// # Errors
    ///
    /// Returns [`IntrinsicError::TickerNotFound`] if no record matches.
    pub fn find(&self, ticker: &str) -> Result<&StockRecord> {
        self.stocks
            .iter()
            .find(|s| s.ticker.as_str() == ticker)
            .ok_or_else(|| IntrinsicError::TickerNotFound(ticker.to_string()))
    }

    /// Records whose retrieval succeeded.
    pub fn valid_records(&self) -> impl Iterator<Item = &StockRecord> {
        self.stocks.iter().filter(|s| !s.fetch_error)
    }

    /// A content hash of the records, used as a memoization key.
    ///
    /// Two snapshots with identical records (regardless of `last_update`)
    /// share a fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        // Serialization of plain records cannot fail; hash the debug form as a fallback.
        match serde_json::to_vec(&self.stocks) {
            Ok(bytes) => bytes.hash(&mut hasher),
            Err(_) => format!("{:?}", self.stocks).hash(&mut hasher),
        }
        hasher.finish()
    }
}

/// Which per-share figure serves as the DCF base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValuationMode {
    /// Current earnings per share.
    #[serde(rename = "eps")]
    Eps,
    /// Three-period smoothed earnings per share.
    #[default]
    #[serde(rename = "avgEps")]
    AvgEps,
    /// Free cash flow per share.
    #[serde(rename = "fcfps")]
    FcfPerShare,
}

impl ValuationMode {
    /// Identifier used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eps => "eps",
            Self::AvgEps => "avgEps",
            Self::FcfPerShare => "fcfps",
        }
    }

    /// Whether the base value is derived from earnings.
    #[must_use]
    pub const fn is_earnings_based(&self) -> bool {
        matches!(self, Self::Eps | Self::AvgEps)
    }
}

impl fmt::Display for ValuationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuationMode {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eps" => Ok(Self::Eps),
            "avgEps" | "avg-eps" | "avg_eps" => Ok(Self::AvgEps),
            "fcfps" | "fcf" => Ok(Self::FcfPerShare),
            other => Err(IntrinsicError::UnknownMode(other.to_string())),
        }
    }
}

/// Scalar controls supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationControls {
    /// Base discount rate (%), typically 5 to 20.
    pub discount_rate: f64,
    /// Growth discount factor (%), typically 20 to 100.
    pub growth_discount: f64,
    /// Base-value selector.
    pub mode: ValuationMode,
}

impl Default for ValuationControls {
    fn default() -> Self {
        Self {
            discount_rate: 10.0,
            growth_discount: 80.0,
            mode: ValuationMode::default(),
        }
    }
}

impl ValuationControls {
    /// Create controls.
    #[must_use]
    pub const fn new(discount_rate: f64, growth_discount: f64, mode: ValuationMode) -> Self {
        Self {
            discount_rate,
            growth_discount,
            mode,
        }
    }

    /// Reject non-finite controls.
    ///
    /// # Errors
    ///
    /// Returns [`IntrinsicError::InvalidControl`] for NaN or infinite values.
    pub fn validate(&self) -> Result<()> {
        if !self.discount_rate.is_finite() {
            return Err(IntrinsicError::InvalidControl(
                "discount rate must be finite".to_string(),
            ));
        }
        if !self.growth_discount.is_finite() {
            return Err(IntrinsicError::InvalidControl(
                "growth discount must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output of the discounted-cash-flow engine for one base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Intrinsic value per share, after the asset floor.
    pub intrinsic_value: f64,
    /// Discounted terminal value as a share of intrinsic value (%, 1 decimal).
    pub terminal_pct: f64,
    /// Base discount rate plus risk premium (%, 2 decimals).
    pub effective_discount: f64,
    /// Additive risk premium (%, 2 decimals).
    pub risk_premium: f64,
    /// Sector exit multiple used; zero when the projection was bypassed.
    pub exit_multiple: f64,
    /// Whether the book-value floor determined the result.
    pub is_asset_floored: bool,
}

/// Three-tier classification of the margin of safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationSignal {
    /// Margin of safety at or above the undervalued threshold.
    #[serde(rename = "undervalued")]
    Undervalued,
    /// Margin of safety between the fair and undervalued thresholds.
    #[serde(rename = "fair value")]
    FairValue,
    /// Margin of safety below the fair threshold.
    #[serde(rename = "overvalued")]
    Overvalued,
}

impl ValuationSignal {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Undervalued => "undervalued",
            Self::FairValue => "fair value",
            Self::Overvalued => "overvalued",
        }
    }

    /// Semantic colour: bullish green, neutral yellow, bearish red.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Undervalued => "#22c55e",
            Self::FairValue => "#eab308",
            Self::Overvalued => "#ef4444",
        }
    }
}

impl fmt::Display for ValuationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stock record enriched with its valuation.
///
/// Serializes as the record's own fields followed by the valuation fields.
/// `growthRate` carries the normalized rate the projection used and
/// `originalGrowth` the upstream figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockValuation {
    /// The input record, with `growth_rate` replaced by the normalized rate.
    #[serde(flatten)]
    pub record: StockRecord,
    /// Raw growth rate before normalization (%).
    pub original_growth: f64,
    /// Base value after any earnings-quality penalty.
    pub base_value: f64,
    /// Earnings-quality factor applied to the base, if any (2 decimals).
    pub fcf_penalty: Option<f64>,
    /// Engine output.
    #[serde(flatten)]
    pub result: ValuationResult,
    /// Margin of safety (%), unrounded.
    pub margin_of_safety: f64,
    /// Classified margin of safety.
    pub signal: ValuationSignal,
}

impl StockValuation {
    /// The ticker of the valued record.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.record.ticker
    }

    /// Intrinsic value per share.
    #[must_use]
    pub const fn intrinsic_value(&self) -> f64 {
        self.result.intrinsic_value
    }

    /// Growth rate actually fed to the projection (%, 1 decimal).
    #[must_use]
    pub const fn normalized_growth(&self) -> f64 {
        self.record.growth_rate
    }
}
