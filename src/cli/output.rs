//! Shared CLI output helpers.
//!
//! Data goes to stdout so it can be piped; everything meant for a human
//! (status, warnings, hints) goes to stderr.
//!
//! Color scheme (respects NO_COLOR through `console`):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, fingerprints, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Print a success message with checkmark (green).
///
/// Example: `✓ certification verified`
pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green(), msg);
}

/// Print an error message (red).
///
/// Example: `✗ config not found: envring.toml`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ set ENVRING_PASSPHRASE`
pub fn hint(msg: &str) {
    eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  signer:  ad80ac3bcec7047db976a15a4dfbdf19118336b4`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", style(label).dim(), style(value).bold());
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Print raw data to stdout, uncolored.
pub fn data(msg: &str) {
    println!("{}", msg);
}

/// Format a fingerprint in cyan for inline use.
pub fn fingerprint(fp: impl Display) -> String {
    style(fp).cyan().to_string()
}

/// Format a path in cyan for inline use.
pub fn path(p: &std::path::Path) -> String {
    style(p.display()).cyan().to_string()
}
