//! Command classification.
//!
//! Normalizes a raw input line (whitespace stripped, lowercased) and sorts
//! it into a closed set of command variants up front, so the engine never
//! has to re-derive structure from string prefixes.
//!
//! Accepted shapes:
//!
//! ```text
//! bet:w:<n>:<stake>         Win wager
//! bet:p:<n>:<stake>         Place wager
//! bet:e:<n>,<n>:<stake>     Exacta wager
//! result:<n>:<n>:<n>        Result declaration
//! ```
//!
//! `<n>` is one or more ASCII digits and `<stake>` is digits with an
//! optional fractional part.

use crate::types::{exacta_key, Product, RaceResult, Wager};

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Win or Place wager on a single runner.
    WinPlaceWager(Wager),
    /// Exacta wager on an ordered pair of runners.
    ExactaWager(Wager),
    /// Result declaration: first, second, third.
    Result(RaceResult),
    /// Anything else. Carries the normalized line for diagnostics.
    Invalid(String),
}

impl Command {
    /// Classify a raw line.
    pub fn parse(line: &str) -> Self {
        let line = normalize(line);
        let parts: Vec<&str> = line.split(':').collect();

        match parts.as_slice() {
            ["bet", product @ ("w" | "p"), runner, stake]
                if is_digits(runner) && is_stake(stake) =>
            {
                let product = if *product == "w" { Product::Win } else { Product::Place };
                Command::WinPlaceWager(Wager::new(product, *runner, *stake))
            }
            ["bet", "e", pair, stake] if is_stake(stake) => match pair.split_once(',') {
                Some((first, second)) if is_digits(first) && is_digits(second) => {
                    Command::ExactaWager(Wager::new(Product::Exacta, exacta_key(first, second), *stake))
                }
                _ => Command::Invalid(line.clone()),
            },
            ["result", first, second, third]
                if is_digits(first) && is_digits(second) && is_digits(third) =>
            {
                Command::Result(RaceResult::new(*first, *second, *third))
            }
            _ => Command::Invalid(line.clone()),
        }
    }

    /// The wager carried by this command, if it is one.
    pub fn wager(&self) -> Option<&Wager> {
        match self {
            Command::WinPlaceWager(w) | Command::ExactaWager(w) => Some(w),
            _ => None,
        }
    }
}

/// Strip every whitespace character and lowercase the rest.
pub fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_stake(s: &str) -> bool {
    match s.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => is_digits(s),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
