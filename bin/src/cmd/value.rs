//! Value command implementation.

use crate::{cmd, data};
use anyhow::Result;
use intrinsic_dcf::DcfValuator;
use intrinsic_portfolio::{PortfolioSummary, Screen, SortDirection, SortKey, value_batch};
use intrinsic_traits::{StockValuation, ValuationControls, ValuationParams};
use serde::Serialize;
use std::path::Path;

/// Filtering and presentation options.
#[derive(Debug, Clone)]
pub(crate) struct View {
    pub(crate) sector: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) sort: SortKey,
    pub(crate) desc: bool,
    pub(crate) json: bool,
}

impl View {
    fn screen(&self) -> Screen {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Screen {
            sector: self.sector.clone(),
            search: self.search.clone(),
            sort_key: self.sort,
            direction,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    last_update: String,
    controls: ValuationControls,
    summary: &'a PortfolioSummary,
    stocks: Vec<&'a StockValuation>,
}

/// Value every stock of a snapshot and print the table and summary.
pub(crate) fn run(
    snapshot_path: &Path,
    controls: ValuationControls,
    params: &ValuationParams,
    view: &View,
) -> Result<()> {
    let snapshot = data::load_snapshot(snapshot_path, &controls)?;
    let valuator = DcfValuator::new(params.clone());
    let valuations = value_batch(&valuator, &snapshot.stocks, &controls);
    let summary = PortfolioSummary::from_valuations(&valuations);
    let shown = view.screen().apply(&valuations);

    if view.json {
        let report = Report {
            last_update: snapshot.last_update.to_string(),
            controls,
            summary: &summary,
            stocks: shown,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    cmd::banner("Intrinsic Value");
    println!("Snapshot:        {} ({})", snapshot_path.display(), snapshot.last_update);
    println!(
        "Controls:        discount {:.1}%, growth discount {:.0}%, base {}",
        controls.discount_rate, controls.growth_discount, controls.mode
    );
    println!();

    println!(
        "{:<8} {:<12} {:>9} {:>10} {:>8}  {:<12} {:>6} {:>6}",
        "Ticker", "Name", "Price", "Value", "MOS %", "Signal", "TV %", "RP"
    );
    println!("{}", "─".repeat(80));
    for v in &shown {
        let floored = if v.result.is_asset_floored { "*" } else { "" };
        println!(
            "{:<8} {:<12} {:>9.2} {:>9.2}{:1} {:>8.1}  {:<12} {:>6.1} {:>6.2}",
            v.ticker(),
            truncate(&v.record.name, 12),
            v.record.price,
            v.intrinsic_value(),
            floored,
            v.margin_of_safety,
            v.signal.label(),
            v.result.terminal_pct,
            v.result.risk_premium,
        );
    }
    if shown.iter().any(|v| v.result.is_asset_floored) {
        println!("\n* value set by the book-value floor");
    }
    println!();

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &PortfolioSummary) {
    cmd::heading("SUMMARY");
    println!("Valued:          {}", summary.total);
    println!("Undervalued:     {}", summary.undervalued);
    println!("Fair value:      {}", summary.fair_value);
    println!("Overvalued:      {}", summary.overvalued);
    println!("Avg dividend:    {:.1}%", summary.average_dividend_yield);
    println!("Avg ROE:         {:.1}%", summary.average_roe);
    if !summary.sectors.is_empty() {
        println!("Sectors:         {}", summary.sectors.join(", "));
    }
    println!();
}

/// Cut a string to at most `max` characters.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
