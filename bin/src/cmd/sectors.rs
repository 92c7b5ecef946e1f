//! Sectors command implementation.

use crate::cmd;
use intrinsic_traits::ValuationParams;

/// Print the exit multiple of every configured sector, highest first.
pub(crate) fn run(params: &ValuationParams) {
    cmd::banner("Sector Exit Multiples");

    let mut sectors: Vec<(&String, &f64)> = params.exit_multiples.sectors.iter().collect();
    sectors.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("{:<16} {:>8}", "Sector", "Multiple");
    println!("{}", "─".repeat(26));
    for (sector, multiple) in sectors {
        println!("{:<16} {:>8.1}", sector, multiple);
    }
    println!("{}", "─".repeat(26));
    println!("{:<16} {:>8.1}", "(default)", params.exit_multiples.default);
    println!();
    println!(
        "Terminal value is the lower of the exit multiple and Gordon growth at {:.1}%.",
        params.projection.terminal_growth_rate
    );
    println!();
}
