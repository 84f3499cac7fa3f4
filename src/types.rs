//! Shared types for the TOTE calculator.
//!
//! These types form the data model used across all modules so that the
//! parser, pools, engine and report can depend on them without circular
//! references.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Wagering product. Each product has its own pool and commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Product {
    Win,
    Place,
    Exacta,
}

impl Product {
    /// All products, in output order.
    pub const ALL: &'static [Product] = &[Product::Win, Product::Place, Product::Exacta];
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Win => write!(f, "Win"),
            Product::Place => write!(f, "Place"),
            Product::Exacta => write!(f, "Exacta"),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A wager on one selection of one product.
///
/// `stake` is the raw field from the input line. It is parsed and rounded
/// to the cent at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wager {
    pub product: Product,
    /// Selection key: `"3"` for Win/Place, `"3,7"` for Exacta.
    pub selection: String,
    pub stake: String,
}

impl Wager {
    pub fn new(product: Product, selection: impl Into<String>, stake: impl Into<String>) -> Self {
        Self {
            product,
            selection: selection.into(),
            stake: stake.into(),
        }
    }
}

/// Finishing order declared by the result line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceResult {
    pub first: String,
    pub second: String,
    pub third: String,
}

impl RaceResult {
    pub fn new(first: impl Into<String>, second: impl Into<String>, third: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            third: third.into(),
        }
    }

    /// Ordered Exacta key `"first,second"`.
    pub fn exacta_key(&self) -> String {
        exacta_key(&self.first, &self.second)
    }

    /// Placegetters in finishing order.
    pub fn placegetters(&self) -> [&str; 3] {
        [&self.first, &self.second, &self.third]
    }
}

impl fmt::Display for RaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.first, self.second, self.third)
    }
}

/// Join two runners into an ordered Exacta selection key.
pub fn exacta_key(first: &str, second: &str) -> String {
    format!("{first},{second}")
}

// ---------------------------------------------------------------------------
// Pool summary
// ---------------------------------------------------------------------------

/// Totals of one product's pool, for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolTotals {
    pub product: Product,
    pub total: Decimal,
    pub selections: usize,
}

impl fmt::Display for PoolTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ${:.2} over {} selection(s)",
            self.product, self.total, self.selections
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for TOTE.
#[derive(Debug, thiserror::Error)]
pub enum ToteError {
    #[error("Pools already settled for result {0}")]
    AlreadySettled(String),

    #[error("Arithmetic overflow computing {product} dividend for {selection}")]
    Overflow { product: Product, selection: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
