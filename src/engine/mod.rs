//! Core engine: wager ingestion and one-shot settlement.
//!
//! A [`Tote`] owns the pools of a single race. It accepts wagers until a
//! result is declared, settles exactly once, and is frozen afterwards.

pub mod dividends;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::money;
use crate::pools::PoolStore;
use crate::types::{PoolTotals, RaceResult, ToteError, Wager};
use dividends::{DividendCalculator, DividendConfig, Dividends};

// ---------------------------------------------------------------------------
// Engine state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Pools are open for wagers.
    Accepting,
    /// A result has been declared; pools are frozen.
    Finalized(RaceResult),
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Everything produced by settling a race.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub result: RaceResult,
    pub dividends: Dividends,
    pub pools: Vec<PoolTotals>,
    pub wagers_accepted: u64,
    pub settled_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tote
// ---------------------------------------------------------------------------

pub struct Tote {
    pools: PoolStore,
    calculator: DividendCalculator,
    state: EngineState,
    wagers_accepted: u64,
}

impl Default for Tote {
    fn default() -> Self {
        Self::new(DividendConfig::default())
    }
}

impl Tote {
    pub fn new(config: DividendConfig) -> Self {
        Self {
            pools: PoolStore::new(),
            calculator: DividendCalculator::new(config),
            state: EngineState::Accepting,
            wagers_accepted: 0,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, EngineState::Finalized(_))
    }

    pub fn pools(&self) -> &PoolStore {
        &self.pools
    }

    pub fn pool_summary(&self) -> Vec<PoolTotals> {
        self.pools.totals()
    }

    pub fn wagers_accepted(&self) -> u64 {
        self.wagers_accepted
    }

    /// Add a wager to its product's pool and return the stake recorded.
    ///
    /// The stake is rounded to the money increment first. A stake that is
    /// not a non-negative number, or that would overflow the pool, is
    /// recorded as zero rather than failing.
    pub fn ingest(&mut self, wager: &Wager) -> Result<Decimal, ToteError> {
        if let EngineState::Finalized(result) = &self.state {
            return Err(ToteError::AlreadySettled(result.to_string()));
        }

        let rounded = money::parse_stake(&wager.stake)
            .filter(|stake| *stake >= Decimal::ZERO)
            .and_then(|stake| money::round(stake, self.calculator.config().increment));
        let mut stake = rounded.unwrap_or_else(|| {
            warn!(
                product = %wager.product,
                selection = %wager.selection,
                raw = %wager.stake,
                "Unreadable stake, recording zero"
            );
            Decimal::ZERO
        });

        let pool = self.pools.pool_mut(wager.product);
        if pool.accumulate(&wager.selection, stake).is_none() {
            warn!(
                product = %wager.product,
                selection = %wager.selection,
                stake = %stake,
                "Stake overflows pool, recording zero"
            );
            stake = Decimal::ZERO;
            pool.accumulate(&wager.selection, stake);
        }
        self.wagers_accepted += 1;

        debug!(
            product = %wager.product,
            selection = %wager.selection,
            stake = %stake,
            "Wager accepted"
        );

        Ok(stake)
    }

    /// Declare the result and compute dividends. Only the first successful
    /// call settles; a dividend overflow leaves the pools open.
    pub fn settle(&mut self, result: &RaceResult) -> Result<Settlement, ToteError> {
        if let EngineState::Finalized(previous) = &self.state {
            return Err(ToteError::AlreadySettled(previous.to_string()));
        }

        let dividends = self.calculator.calculate(&self.pools, result)?;
        self.state = EngineState::Finalized(result.clone());

        let settlement = Settlement {
            result: result.clone(),
            dividends,
            pools: self.pools.totals(),
            wagers_accepted: self.wagers_accepted,
            settled_at: Utc::now(),
        };

        info!(
            result = %settlement.result,
            wagers = settlement.wagers_accepted,
            win = %settlement.dividends.win.amount,
            exacta = %settlement.dividends.exacta.amount,
            "Race settled"
        );
        for totals in &settlement.pools {
            debug!(pool = %totals, "Pool at settlement");
        }

        Ok(settlement)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
