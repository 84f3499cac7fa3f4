//! Session driver: the read → classify → ingest → settle loop.
//!
//! Consumes lines from any `BufRead`, writes diagnostics and dividends to
//! any `Write`, and stops reading at the first result line.

use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::engine::{Settlement, Tote};
use crate::parser::{self, Command};
use crate::report;
use crate::types::ToteError;

/// How a session ended.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// A result line was processed and dividends were written.
    Settled(Settlement),
    /// Input ran out before any result line.
    Unsettled,
}

/// Summary of a complete session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub lines_read: usize,
    pub wagers_accepted: u64,
    pub lines_rejected: usize,
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn settlement(&self) -> Option<&Settlement> {
        match &self.outcome {
            SessionOutcome::Settled(s) => Some(s),
            SessionOutcome::Unsettled => None,
        }
    }
}

/// Run one race over `input`, writing to `out`.
///
/// Blank lines are skipped silently. Every other line that matches no
/// command shape gets an `Invalid input` diagnostic and processing carries
/// on. Lines after the result are never read.
pub fn run<R: BufRead, W: Write>(
    tote: &mut Tote,
    input: R,
    out: &mut W,
) -> Result<SessionReport, ToteError> {
    let mut lines_read = 0;
    let mut wagers_accepted: u64 = 0;
    let mut lines_rejected = 0;

    for line in input.lines() {
        let line = line?;
        lines_read += 1;

        if parser::normalize(&line).is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Command::WinPlaceWager(wager) | Command::ExactaWager(wager) => {
                tote.ingest(&wager)?;
                wagers_accepted += 1;
            }
            Command::Result(result) => {
                let settlement = tote.settle(&result)?;
                report::write_dividends(out, &settlement.dividends)?;
                info!(
                    lines = lines_read,
                    wagers = wagers_accepted,
                    rejected = lines_rejected,
                    "Session complete"
                );
                return Ok(SessionReport {
                    lines_read,
                    wagers_accepted,
                    lines_rejected,
                    outcome: SessionOutcome::Settled(settlement),
                });
            }
            Command::Invalid(normalized) => {
                debug!(line = lines_read, input = %normalized, "Rejected input line");
                writeln!(out, "{}", report::format_invalid(&normalized))?;
                lines_rejected += 1;
            }
        }
    }

    out.flush()?;
    warn!(
        lines = lines_read,
        wagers = wagers_accepted,
        rejected = lines_rejected,
        "Input ended without a result; no dividends declared"
    );

    Ok(SessionReport {
        lines_read,
        wagers_accepted,
        lines_rejected,
        outcome: SessionOutcome::Unsettled,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
