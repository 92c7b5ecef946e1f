//! Valuation parameters.
//!
//! Every constant of the model lives here: growth bounds, projection shape,
//! the (threshold, slope, cap) triples of the risk premia, earnings-quality
//! penalties, the asset floor, sector exit multiples and signal thresholds.
//! [`ValuationParams::default`] reproduces the calibrated model; a TOML file
//! may override any subset of fields.

use crate::{IntrinsicError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Bounds and flexibility applied to raw growth rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Lower clamp for raw growth (%).
    pub min: f64,
    /// Upper clamp for raw growth (%).
    pub max: f64,
    /// Allowance above the sustainable growth rate (1.2 = 20% headroom).
    pub sustainable_flex: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            min: -5.0,
            max: 15.0,
            sustainable_flex: 1.2,
        }
    }
}

/// Shape of the two-stage projection and terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    /// Default projection horizon in years.
    pub years: u32,
    /// Last year of the constant-growth stage.
    pub fade_start_year: u32,
    /// Number of years over which growth fades to the terminal rate.
    pub fade_years: u32,
    /// Perpetual growth rate (%).
    pub terminal_growth_rate: f64,
    /// Lower clamp for per-year growth after dilution (%).
    pub effective_growth_min: f64,
    /// Upper clamp for per-year growth after dilution (%).
    pub effective_growth_max: f64,
    /// Floor on discount rate minus terminal growth (percentage points).
    pub min_spread: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            years: 10,
            fade_start_year: 5,
            fade_years: 5,
            terminal_growth_rate: 2.0,
            effective_growth_min: -15.0,
            effective_growth_max: 25.0,
            min_spread: 3.0,
        }
    }
}

/// A threshold / slope / cap triple for one risk premium contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Value beyond which the premium starts to accrue.
    pub threshold: f64,
    /// Premium added per unit beyond the threshold.
    pub slope: f64,
    /// Maximum contribution (percentage points).
    pub cap: f64,
}

impl RiskFactor {
    /// Create a new risk factor.
    #[must_use]
    pub const fn new(threshold: f64, slope: f64, cap: f64) -> Self {
        Self {
            threshold,
            slope,
            cap,
        }
    }

    /// Premium for a non-negative excess over the threshold.
    #[must_use]
    pub fn premium(&self, excess: f64) -> f64 {
        (excess * self.slope).min(self.cap)
    }
}

/// Parameters of the additive risk premium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    /// Debt-to-equity contribution (fires above the threshold).
    pub leverage: RiskFactor,
    /// Current-ratio contribution (fires below the threshold).
    pub liquidity: RiskFactor,
    /// Earnings coefficient-of-variation contribution (fires above the threshold).
    ///
    /// Unlike the other two, the premium is `cv * slope`, not the excess.
    pub volatility: RiskFactor,
    /// Minimum number of historical EPS points for the volatility term.
    pub min_history: usize,
    /// Minimum absolute mean EPS for the volatility term.
    pub min_abs_mean: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            leverage: RiskFactor::new(0.5, 3.0, 4.0),
            liquidity: RiskFactor::new(1.5, 2.0, 2.0),
            volatility: RiskFactor::new(0.3, 3.0, 3.0),
            min_history: 3,
            min_abs_mean: 0.01,
        }
    }
}

/// Earnings-quality (free-cash-flow conversion) penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityParams {
    /// Factor applied when FCF conversion is zero or negative.
    pub severe_penalty: f64,
    /// Conversion ratio at or above which no penalty applies.
    pub conversion_threshold: f64,
    /// Lowest factor applied for weak but positive conversion.
    pub min_factor: f64,
    /// Sectors whose cash-flow accounting makes the test meaningless.
    pub exempt_sectors: Vec<String>,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            severe_penalty: 0.5,
            conversion_threshold: 0.6,
            min_factor: 0.4,
            exempt_sectors: vec!["金融".to_string()],
        }
    }
}

impl QualityParams {
    /// Whether the sector is exempt from the earnings-quality test.
    #[must_use]
    pub fn is_exempt(&self, sector: &str) -> bool {
        self.exempt_sectors.iter().any(|s| s == sector)
    }
}

/// Sector exit multiples for the terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitMultiples {
    /// Multiple by sector label.
    ///
    /// Entries read from a file are merged over the calibrated table; set an
    /// entry to zero to send that sector to the default.
    #[serde(deserialize_with = "merge_over_default_sectors")]
    pub sectors: BTreeMap<String, f64>,
    /// Multiple used when the sector is absent or unknown.
    pub default: f64,
}

impl Default for ExitMultiples {
    fn default() -> Self {
        let sectors = [
            ("軟體", 18.0),
            ("資訊服務", 16.0),
            ("遊戲軟體", 16.0),
            ("通信網路", 14.0),
            ("工業電腦", 13.0),
            ("POS系統", 13.0),
            ("電子", 12.0),
            ("電子零組件", 11.0),
            ("電腦週邊", 11.0),
            ("電源供應器", 10.0),
            ("文化創意", 12.0),
            ("光電", 10.0),
            ("電機機械", 10.0),
            ("金屬製品", 9.0),
            ("營建", 8.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            sectors,
            default: 12.0,
        }
    }
}

fn merge_over_default_sectors<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut sectors = ExitMultiples::default().sectors;
    sectors.extend(overrides);
    Ok(sectors)
}

impl ExitMultiples {
    /// Multiple for a sector, falling back to the default.
    ///
    /// Non-positive table entries are ignored.
    #[must_use]
    pub fn for_sector(&self, sector: Option<&str>) -> f64 {
        sector
            .and_then(|s| self.sectors.get(s))
            .copied()
            .filter(|m| *m > 0.0)
            .unwrap_or(self.default)
    }
}

/// Margin-of-safety tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// MOS (%) at or above which a stock is undervalued.
    pub undervalued: f64,
    /// MOS (%) at or above which a stock is fairly valued.
    pub fair: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            undervalued: 30.0,
            fair: 10.0,
        }
    }
}

/// Thresholds of the value-investing checklist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistThresholds {
    /// P/E must be below this.
    pub pe_max: f64,
    /// P/B must be below this.
    pub pb_max: f64,
    /// ROE (%) must exceed this.
    pub roe_min: f64,
    /// Dividend yield (%) must exceed this.
    pub dividend_yield_min: f64,
    /// Debt-to-equity must be below this.
    pub debt_to_equity_max: f64,
    /// Current ratio must exceed this.
    pub current_ratio_min: f64,
}

impl Default for ChecklistThresholds {
    fn default() -> Self {
        Self {
            pe_max: 15.0,
            pb_max: 1.5,
            roe_min: 15.0,
            dividend_yield_min: 4.0,
            debt_to_equity_max: 0.5,
            current_ratio_min: 2.0,
        }
    }
}

/// The complete, immutable parameter set of the valuation engine.
///
/// # Example
///
/// ```
/// use intrinsic_traits::ValuationParams;
///
/// let params = ValuationParams::default();
/// assert_eq!(params.exit_multiples.for_sector(Some("軟體")), 18.0);
/// assert_eq!(params.exit_multiples.for_sector(None), 12.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationParams {
    /// Raw growth normalization.
    pub growth: GrowthParams,
    /// Projection and terminal value.
    pub projection: ProjectionParams,
    /// Risk premium.
    pub risk: RiskParams,
    /// Earnings-quality penalty.
    pub quality: QualityParams,
    /// Fraction of book value per share that bounds intrinsic value from below.
    pub asset_floor_ratio: f64,
    /// Sector exit multiples.
    pub exit_multiples: ExitMultiples,
    /// Margin-of-safety tiers.
    pub signal: SignalThresholds,
    /// Checklist thresholds.
    pub checklist: ChecklistThresholds,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            growth: GrowthParams::default(),
            projection: ProjectionParams::default(),
            risk: RiskParams::default(),
            quality: QualityParams::default(),
            asset_floor_ratio: 0.7,
            exit_multiples: ExitMultiples::default(),
            signal: SignalThresholds::default(),
            checklist: ChecklistThresholds::default(),
        }
    }
}

impl ValuationParams {
    /// Parse parameters from TOML text. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or the resulting
    /// parameters fail [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the parameters for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`IntrinsicError::InvalidParameter`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("growth.min", self.growth.min),
            ("growth.max", self.growth.max),
            ("growth.sustainable_flex", self.growth.sustainable_flex),
            ("projection.terminal_growth_rate", self.projection.terminal_growth_rate),
            ("projection.effective_growth_min", self.projection.effective_growth_min),
            ("projection.effective_growth_max", self.projection.effective_growth_max),
            ("projection.min_spread", self.projection.min_spread),
            ("risk.min_abs_mean", self.risk.min_abs_mean),
            ("quality.severe_penalty", self.quality.severe_penalty),
            ("quality.conversion_threshold", self.quality.conversion_threshold),
            ("quality.min_factor", self.quality.min_factor),
            ("asset_floor_ratio", self.asset_floor_ratio),
            ("exit_multiples.default", self.exit_multiples.default),
            ("signal.undervalued", self.signal.undervalued),
            ("signal.fair", self.signal.fair),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        if self.growth.min > self.growth.max {
            return Err(invalid("growth.min exceeds growth.max"));
        }
        if self.projection.effective_growth_min > self.projection.effective_growth_max {
            return Err(invalid(
                "projection.effective_growth_min exceeds projection.effective_growth_max",
            ));
        }
        if self.projection.years == 0 {
            return Err(invalid("projection.years must be positive"));
        }
        if self.projection.fade_years == 0 {
            return Err(invalid("projection.fade_years must be positive"));
        }
        if self.projection.min_spread <= 0.0 {
            return Err(invalid("projection.min_spread must be positive"));
        }

        for (name, factor) in [
            ("risk.leverage", self.risk.leverage),
            ("risk.liquidity", self.risk.liquidity),
            ("risk.volatility", self.risk.volatility),
        ] {
            let values = [factor.threshold, factor.slope, factor.cap];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("{name} must be finite")));
            }
            if factor.slope < 0.0 || factor.cap < 0.0 {
                return Err(invalid(format!("{name} slope and cap must be non-negative")));
            }
        }

        if self.asset_floor_ratio < 0.0 {
            return Err(invalid("asset_floor_ratio must be non-negative"));
        }
        if self.exit_multiples.default <= 0.0 {
            return Err(invalid("exit_multiples.default must be positive"));
        }
        if self.signal.undervalued < self.signal.fair {
            return Err(invalid("signal.undervalued is below signal.fair"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> IntrinsicError {
    IntrinsicError::InvalidParameter(msg.into())
}
