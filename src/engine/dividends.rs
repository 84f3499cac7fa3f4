//! Dividend calculation.
//!
//! Turns the three product pools and a declared finishing order into
//! per-unit-stake dividends. A selection nobody backed always pays zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::money;
use crate::pools::{Pool, PoolStore};
use crate::types::{Product, RaceResult, ToteError};

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Commission retained from each pool before distribution.
#[derive(Debug, Clone)]
pub struct DividendConfig {
    pub win_commission: Decimal,
    pub place_commission: Decimal,
    pub exacta_commission: Decimal,
    /// Money increment every payout is rounded to.
    pub increment: Decimal,
}

impl Default for DividendConfig {
    fn default() -> Self {
        Self {
            win_commission: dec!(0.15),
            place_commission: dec!(0.12),
            exacta_commission: dec!(0.18),
            increment: money::CENT,
        }
    }
}

impl DividendConfig {
    pub fn commission_for(&self, product: Product) -> Decimal {
        match product {
            Product::Win => self.win_commission,
            Product::Place => self.place_commission,
            Product::Exacta => self.exacta_commission,
        }
    }
}

// ---------------------------------------------------------------------------
// Dividends
// ---------------------------------------------------------------------------

/// Dividend for one selection of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dividend {
    pub product: Product,
    pub selection: String,
    /// Return per unit staked.
    pub amount: Decimal,
}

/// The five dividends declared for a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dividends {
    pub win: Dividend,
    /// Place dividends for first, second and third, in that order.
    pub place: [Dividend; 3],
    pub exacta: Dividend,
}

impl Dividends {
    /// All dividends in output order: Win, Place ×3, Exacta.
    pub fn iter(&self) -> impl Iterator<Item = &Dividend> {
        std::iter::once(&self.win)
            .chain(self.place.iter())
            .chain(std::iter::once(&self.exacta))
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

pub struct DividendCalculator {
    config: DividendConfig,
}

impl DividendCalculator {
    pub fn new(config: DividendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DividendConfig {
        &self.config
    }

    /// Compute every dividend for `result`. Pools are only read.
    ///
    /// Fails with [`ToteError::Overflow`] when a dividend does not fit in a
    /// `Decimal`; no partial set is returned.
    pub fn calculate(&self, pools: &PoolStore, result: &RaceResult) -> Result<Dividends, ToteError> {
        let [first, second, third] = self.place(pools.pool(Product::Place), result)?;

        Ok(Dividends {
            win: Dividend {
                product: Product::Win,
                selection: result.first.clone(),
                amount: self.win(pools.pool(Product::Win), &result.first)?,
            },
            place: [
                Dividend { product: Product::Place, selection: result.first.clone(), amount: first },
                Dividend { product: Product::Place, selection: result.second.clone(), amount: second },
                Dividend { product: Product::Place, selection: result.third.clone(), amount: third },
            ],
            exacta: Dividend {
                product: Product::Exacta,
                selection: result.exacta_key(),
                amount: self.exacta(pools.pool(Product::Exacta), result)?,
            },
        })
    }

    /// Win dividend for the winner.
    ///
    /// The pool net of commission is rounded before being divided by the
    /// winning stake, and the quotient is rounded again.
    pub fn win(&self, pool: &Pool, winner: &str) -> Result<Decimal, ToteError> {
        let Some(stake) = staked(pool, winner) else {
            debug!(winner, "No Win stake on winner");
            return Ok(Decimal::ZERO);
        };

        net_of_commission(pool.total(), self.config.win_commission)
            .and_then(|net| self.round(net))
            .and_then(|net| self.per_unit(net, stake))
            .ok_or_else(|| overflow(Product::Win, winner))
    }

    /// Place dividends for first, second and third.
    ///
    /// The net pool is split into three equal shares up front. Each
    /// placegetter divides its own share by its own stake, so a placegetter
    /// with no stake never changes what the other two receive.
    pub fn place(&self, pool: &Pool, result: &RaceResult) -> Result<[Decimal; 3], ToteError> {
        let share = net_of_commission(pool.total(), self.config.place_commission)
            .and_then(|net| net.checked_div(dec!(3)))
            .ok_or_else(|| overflow(Product::Place, &result.to_string()))?;

        let mut dividends = [Decimal::ZERO; 3];
        for (slot, runner) in dividends.iter_mut().zip(result.placegetters()) {
            match staked(pool, runner) {
                Some(stake) => {
                    *slot = self
                        .per_unit(share, stake)
                        .ok_or_else(|| overflow(Product::Place, runner))?;
                }
                None => debug!(runner, "No Place stake on placegetter"),
            }
        }
        Ok(dividends)
    }

    /// Exacta dividend for the ordered pair first,second.
    pub fn exacta(&self, pool: &Pool, result: &RaceResult) -> Result<Decimal, ToteError> {
        let key = result.exacta_key();
        let Some(stake) = staked(pool, &key) else {
            debug!(selection = %key, "No Exacta stake on winning pair");
            return Ok(Decimal::ZERO);
        };

        net_of_commission(pool.total(), self.config.exacta_commission)
            .and_then(|net| self.per_unit(net, stake))
            .ok_or_else(|| overflow(Product::Exacta, &key))
    }

    /// `amount / stake`, rounded to the money increment.
    fn per_unit(&self, amount: Decimal, stake: Decimal) -> Option<Decimal> {
        amount.checked_div(stake).and_then(|unit| self.round(unit))
    }

    fn round(&self, value: Decimal) -> Option<Decimal> {
        money::round(value, self.config.increment)
    }
}

/// Stake on `key`, treating a recorded zero the same as no stake.
fn staked(pool: &Pool, key: &str) -> Option<Decimal> {
    pool.lookup(key).filter(|stake| *stake > Decimal::ZERO)
}

fn net_of_commission(total: Decimal, commission: Decimal) -> Option<Decimal> {
    total.checked_mul(Decimal::ONE - commission)
}

fn overflow(product: Product, selection: &str) -> ToteError {
    ToteError::Overflow {
        product,
        selection: selection.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
