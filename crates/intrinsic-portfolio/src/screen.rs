//! Filtering, searching and sorting valuations.

use intrinsic_traits::{IntrinsicError, Result, StockValuation};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ticker, lexicographic.
    #[default]
    Ticker,
    /// Company name, lexicographic.
    Name,
    /// Sector, lexicographic.
    Sector,
    /// Market price.
    Price,
    /// Intrinsic value per share.
    IntrinsicValue,
    /// Margin of safety.
    MarginOfSafety,
    /// Return on equity.
    Roe,
    /// Dividend yield.
    DividendYield,
    /// Price-to-earnings.
    Pe,
    /// Terminal value share of intrinsic value.
    TerminalPct,
    /// Risk premium.
    RiskPremium,
}

impl SortKey {
    /// Every key, in display order.
    pub const ALL: [Self; 11] = [
        Self::Ticker,
        Self::Name,
        Self::Sector,
        Self::Price,
        Self::IntrinsicValue,
        Self::MarginOfSafety,
        Self::Roe,
        Self::DividendYield,
        Self::Pe,
        Self::TerminalPct,
        Self::RiskPremium,
    ];

    /// Identifier used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::Name => "name",
            Self::Sector => "sector",
            Self::Price => "price",
            Self::IntrinsicValue => "intrinsicValue",
            Self::MarginOfSafety => "marginOfSafety",
            Self::Roe => "roe",
            Self::DividendYield => "dividendYield",
            Self::Pe => "pe",
            Self::TerminalPct => "terminalPct",
            Self::RiskPremium => "riskPremium",
        }
    }

    fn text<'a>(&self, v: &'a StockValuation) -> Option<&'a str> {
        match self {
            Self::Ticker => Some(v.ticker().as_str()),
            Self::Name => Some(v.record.name.as_str()),
            Self::Sector => Some(v.record.sector.as_str()),
            _ => None,
        }
    }

    fn number(&self, v: &StockValuation) -> f64 {
        match self {
            Self::Price => v.record.price,
            Self::IntrinsicValue => v.intrinsic_value(),
            Self::MarginOfSafety => v.margin_of_safety,
            Self::Roe => v.record.roe,
            Self::DividendYield => v.record.dividend_yield,
            Self::Pe => v.record.pe,
            Self::TerminalPct => v.result.terminal_pct,
            Self::RiskPremium => v.result.risk_premium,
            Self::Ticker | Self::Name | Self::Sector => f64::NAN,
        }
    }

    /// Ascending comparison. NaN sorts after every number.
    fn compare(&self, a: &StockValuation, b: &StockValuation, direction: SortDirection) -> Ordering {
        if let (Some(x), Some(y)) = (self.text(a), self.text(b)) {
            return direction.apply(x.cmp(y));
        }
        let (x, y) = (self.number(a), self.number(b));
        match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => direction.apply(x.total_cmp(&y)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().to_lowercase() == normalized)
            .or(match normalized.as_str() {
                "iv" => Some(Self::IntrinsicValue),
                "mos" => Some(Self::MarginOfSafety),
                "dy" | "yield" => Some(Self::DividendYield),
                _ => None,
            })
            .ok_or_else(|| IntrinsicError::UnknownSortKey(s.to_string()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A view over a batch of valuations.
///
/// # Example
///
/// ```
/// use intrinsic_portfolio::{Screen, SortDirection, SortKey};
///
/// let screen = Screen::default()
///     .with_sector("電子")
///     .sorted_by(SortKey::MarginOfSafety, SortDirection::Desc);
/// assert!(screen.apply(&[]).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    /// Keep only this sector.
    pub sector: Option<String>,
    /// Keep stocks whose ticker or name contains this text.
    pub search: Option<String>,
    /// Sort column.
    pub sort_key: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Screen {
    /// Restrict to a sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Restrict to tickers or names containing `term`.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set the sort order.
    #[must_use]
    pub const fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.direction = direction;
        self
    }

    /// Whether a valuation passes the sector filter and search.
    #[must_use]
    pub fn matches(&self, v: &StockValuation) -> bool {
        let sector_ok = self.sector.as_deref().is_none_or(|s| v.record.sector == s);
        let search_ok = self
            .search
            .as_deref()
            .filter(|t| !t.is_empty())
            .is_none_or(|t| v.ticker().as_str().contains(t) || v.record.name.contains(t));
        sector_ok && search_ok
    }

    /// Filter and sort. The sort is stable.
    #[must_use]
    pub fn apply<'a>(&self, valuations: &'a [StockValuation]) -> Vec<&'a StockValuation> {
        let mut out: Vec<&StockValuation> = valuations.iter().filter(|v| self.matches(v)).collect();
        out.sort_by(|a, b| self.sort_key.compare(a, b, self.direction));
        out
    }
}
