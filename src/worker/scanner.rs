use std::fmt;

use alloy::primitives::Address;
use chrono::DateTime;
use log::{debug, info, warn};
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::error::Result;
use crate::reserves::{fetch_reserves, PoolReserves, ReserveSource};
use crate::utils::{format_fixed, price_of, spread_between, spread_bps, Price, Spread};

/// Outcome of one scan across two pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadReport {
    pub price_a: Price,
    pub price_b: Price,
    pub spread: Spread,
}

impl fmt::Display for SpreadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "priceA={} priceB={} spread={}",
            self.price_a, self.price_b, self.spread
        )
    }
}

/// Compares the reserve-implied prices of two pools.
pub struct SpreadScanner<S> {
    source: S,
    /// Warn when the relative spread reaches this many basis points.
    threshold_bps: u32,
    /// Issue both pool queries concurrently.
    parallel: bool,
}

impl<S: ReserveSource> SpreadScanner<S> {
    pub fn new(source: S, threshold_bps: u32, parallel: bool) -> Self {
        Self {
            source,
            threshold_bps,
            parallel,
        }
    }

    /// Fetch both pools, price them and compute the spread.
    ///
    /// Any failure aborts the scan; no partial report is produced.
    pub async fn scan(&self, pool_a: Address, pool_b: Address) -> Result<SpreadReport> {
        let (reserves_a, reserves_b) = if self.parallel {
            futures::try_join!(
                fetch_reserves(&self.source, pool_a),
                fetch_reserves(&self.source, pool_b)
            )?
        } else {
            let a = fetch_reserves(&self.source, pool_a).await?;
            let b = fetch_reserves(&self.source, pool_b).await?;
            (a, b)
        };

        log_reserves("A", pool_a, &reserves_a);
        log_reserves("B", pool_b, &reserves_b);

        let price_a = price_of(&reserves_a)?;
        let price_b = price_of(&reserves_b)?;
        let spread = spread_between(&price_a, &price_b);

        self.check_threshold(&price_a, &price_b);

        Ok(SpreadReport {
            price_a,
            price_b,
            spread,
        })
    }

    fn check_threshold(&self, price_a: &Price, price_b: &Price) {
        let Some(bps) = spread_bps(price_a, price_b) else {
            debug!("Relative spread undefined, one pool prices at zero");
            return;
        };

        let threshold = BigRational::from_integer(BigInt::from(self.threshold_bps));
        if bps >= threshold {
            warn!(
                "Spread of {} bps meets threshold of {} bps",
                format_fixed(&bps, 2),
                self.threshold_bps
            );
        } else {
            debug!("Spread of {} bps below threshold", format_fixed(&bps, 2));
        }
    }
}

fn log_reserves(label: &str, pool: Address, reserves: &PoolReserves) {
    let updated = DateTime::from_timestamp(i64::from(reserves.block_timestamp_last), 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    info!(
        "Pool {label} {pool}: reserve0={} reserve1={} updated={}",
        reserves.reserve0, reserves.reserve1, updated
    );
}
