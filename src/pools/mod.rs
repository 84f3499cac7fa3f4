//! Pool store: accumulated stakes per product and selection.
//!
//! One [`Pool`] per product, owned together by a [`PoolStore`]. Pools only
//! ever grow: there is no way to withdraw a stake once it is added. A pool
//! keeps its running total, and a stake that would overflow either the
//! total or its selection is refused whole.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::types::{PoolTotals, Product};

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Stakes for one product, keyed by selection.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    stakes: HashMap<String, Decimal>,
    total: Decimal,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `stake` to the running amount for `key`, starting from zero.
    ///
    /// Returns the new amount on `key`, or `None` (pool untouched) when the
    /// selection or the pool total would overflow.
    pub fn accumulate(&mut self, key: &str, stake: Decimal) -> Option<Decimal> {
        let current = self.lookup(key).unwrap_or(Decimal::ZERO);
        let amount = current.checked_add(stake)?;
        let total = self.total.checked_add(stake)?;

        self.stakes.insert(key.to_string(), amount);
        self.total = total;
        Some(amount)
    }

    /// Sum of every stake in the pool.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Stake recorded on `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<Decimal> {
        self.stakes.get(key).copied()
    }

    /// Number of distinct selections staked.
    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pool store
// ---------------------------------------------------------------------------

/// The three product pools of a single race.
#[derive(Debug, Clone, Default)]
pub struct PoolStore {
    win: Pool,
    place: Pool,
    exacta: Pool,
}

impl PoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(&self, product: Product) -> &Pool {
        match product {
            Product::Win => &self.win,
            Product::Place => &self.place,
            Product::Exacta => &self.exacta,
        }
    }

    pub fn pool_mut(&mut self, product: Product) -> &mut Pool {
        match product {
            Product::Win => &mut self.win,
            Product::Place => &mut self.place,
            Product::Exacta => &mut self.exacta,
        }
    }

    /// Totals for every product, in output order.
    pub fn totals(&self) -> Vec<PoolTotals> {
        Product::ALL
            .iter()
            .map(|&product| {
                let pool = self.pool(product);
                PoolTotals {
                    product,
                    total: pool.total(),
                    selections: pool.len(),
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
