//! Output formatting.
//!
//! Renders dividends as `<Product>:<selection>:$<amount>` lines and the
//! diagnostic printed for rejected input.

use std::io::{self, Write};

use crate::engine::dividends::{Dividend, Dividends};

/// Format one dividend line, e.g. `Place:3:$1.27`.
///
/// Amounts arrive already rounded to the money increment.
pub fn format_dividend(dividend: &Dividend) -> String {
    format!("{}:{}:${:.2}", dividend.product, dividend.selection, dividend.amount)
}

/// The five dividend lines in output order.
pub fn render(dividends: &Dividends) -> Vec<String> {
    dividends.iter().map(format_dividend).collect()
}

/// Write the dividend lines, one per line.
pub fn write_dividends<W: Write>(out: &mut W, dividends: &Dividends) -> io::Result<()> {
    for line in render(dividends) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Diagnostic for a line that matched no command shape.
pub fn format_invalid(line: &str) -> String {
    format!("Invalid input: [{line}]")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
