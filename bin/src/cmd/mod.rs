//! CLI subcommand modules.
//!
//! This module contains the implementations for all intrinsic CLI subcommands.

pub(crate) mod detail;
pub(crate) mod sectors;
pub(crate) mod value;

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:^60} ║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a ruled sub-heading.
pub(crate) fn heading(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
