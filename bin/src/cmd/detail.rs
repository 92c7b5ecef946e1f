//! Detail command implementation.

use crate::{cmd, data};
use anyhow::{Result, bail};
use intrinsic_dcf::{
    Checklist, DcfValuator, PipelineTrace, Scenarios, analyze_scenarios, evaluate_checklist,
};
use intrinsic_traits::{StockValuation, ValuationControls, ValuationParams};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailReport<'a> {
    valuation: &'a StockValuation,
    base_source: String,
    scenarios: &'a Scenarios,
    checklist: &'a Checklist,
    checklist_score: usize,
}

/// Show the full valuation of a single stock.
pub(crate) fn run(
    snapshot_path: &Path,
    ticker: &str,
    controls: ValuationControls,
    params: &ValuationParams,
    json: bool,
) -> Result<()> {
    let snapshot = data::load_snapshot(snapshot_path, &controls)?;
    let record = snapshot.find(ticker)?;
    if record.fetch_error {
        bail!("{ticker} has no usable data (fetch error in snapshot)");
    }

    let valuator = DcfValuator::new(params.clone());
    let trace = valuator.trace(record, &controls);
    let scenarios = analyze_scenarios(&trace.valuation, &controls, params);
    let checklist = evaluate_checklist(&trace.valuation, &params.checklist, params.signal.undervalued);

    if json {
        let report = DetailReport {
            valuation: &trace.valuation,
            base_source: trace.base.source.to_string(),
            scenarios: &scenarios,
            checklist: &checklist,
            checklist_score: checklist.score(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_overview(&trace);
    print_breakdown(&trace, &controls);
    print_scenarios(&scenarios);
    print_checklist(&checklist);
    Ok(())
}

fn print_overview(trace: &PipelineTrace) {
    let v = &trace.valuation;
    cmd::banner(&format!("{} {}", v.ticker(), v.record.name));
    if !v.record.sector.is_empty() {
        println!("Sector:          {}", v.record.sector);
    }
    println!("Price:           {:.2}", v.record.price);
    println!("Intrinsic value: {:.2}", v.intrinsic_value());
    println!("MOS:             {:.1}%", v.margin_of_safety);
    println!("Signal:          {} ({})", v.signal.label(), v.signal.color());
    println!();
}

fn print_breakdown(trace: &PipelineTrace, controls: &ValuationControls) {
    let v = &trace.valuation;
    let r = &v.result;
    cmd::heading("DCF BREAKDOWN");

    println!("Base value:      {:.2} ({})", trace.base.value, trace.base.source);
    if let Some(penalty) = v.fcf_penalty {
        println!("FCF penalty:     x{:.2} -> {:.2}", penalty, v.base_value);
    }
    println!(
        "Growth:          {:.1}% (raw {:.1}%, discount {:.0}%)",
        v.normalized_growth(),
        v.original_growth,
        controls.growth_discount
    );
    if let Some(sgr) = trace.growth.sustainable {
        println!("Sustainable:     {:.1}%", sgr);
    }
    println!(
        "Discount rate:   {:.2}% ({:.1}% + {:.2}% risk premium)",
        r.effective_discount, controls.discount_rate, r.risk_premium
    );
    if let Some(b) = &trace.dcf.breakdown {
        let risk = &b.risk;
        if risk.total > 0.0 {
            println!(
                "  leverage {:.2}, liquidity {:.2}, volatility {:.2}",
                risk.leverage, risk.liquidity, risk.volatility
            );
        }
        println!("Projected PV:    {:.2}", b.projection.present_value);
        println!(
            "Terminal value:  {:.2} (Gordon {:.2}, exit {:.2} at {:.0}x)",
            b.terminal.value, b.terminal.gordon, b.terminal.exit_multiple, r.exit_multiple
        );
    }
    println!("Terminal share:  {:.1}%", r.terminal_pct);
    if r.is_asset_floored {
        println!("Asset floor:     applied (book value {:.2})", v.record.bvps);
    }
    println!();
}

fn print_scenarios(scenarios: &Scenarios) {
    cmd::heading("SCENARIOS");
    println!("{:<8} {:>10} {:>9} {:>10}", "Case", "Value", "Growth", "Discount");
    println!("{}", "─".repeat(40));
    for s in scenarios.as_array() {
        println!(
            "{:<8} {:>10.2} {:>8.1}% {:>9.1}%",
            s.kind.to_string(),
            s.intrinsic_value,
            s.growth,
            s.discount_rate
        );
    }
    println!();
}

fn print_checklist(checklist: &Checklist) {
    cmd::heading(&format!(
        "CHECKLIST ({}/{})",
        checklist.score(),
        checklist.len()
    ));
    for item in &checklist.items {
        let mark = if item.passed { "✓" } else { "✗" };
        println!(
            "{} {:<22} {:>10.2}  (threshold {})",
            mark,
            item.criterion.to_string(),
            item.value,
            item.threshold
        );
    }
    println!();
}
