//! Exact reserve-ratio pricing for Uniswap V2 style pools.
//!
//! Prices are `reserve1 / reserve0` kept as arbitrary precision rationals, so
//! pools whose tokens differ by many orders of magnitude (6 vs 18 decimals, or
//! reserves near the 112-bit ceiling) lose nothing before formatting.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::conversion::format_fixed;
use super::PRICE_DECIMALS;
use crate::error::{Result, ScanError};
use crate::reserves::PoolReserves;

/// Basis points in one whole.
const BPS_SCALE: u32 = 10_000;

// ============================================
// Types
// ============================================

/// Price of token0 in units of token1. Denominator is always positive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(BigRational);

impl Price {
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_fixed(&self.0, PRICE_DECIMALS))
    }
}

/// Absolute difference between two prices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Spread(BigRational);

impl Spread {
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_fixed(&self.0, PRICE_DECIMALS))
    }
}

// ============================================
// Pricing
// ============================================

/// Price implied by a pool's reserves: `reserve1 / reserve0`.
///
/// Fails with [`ScanError::DivisionByZero`] when `reserve0` is zero, whatever `reserve1` is.
pub fn price_of(reserves: &PoolReserves) -> Result<Price> {
    if reserves.reserve0.is_zero() {
        return Err(ScanError::DivisionByZero);
    }

    let numer = BigInt::from(reserves.reserve1.clone());
    let denom = BigInt::from(reserves.reserve0.clone());

    Ok(Price(BigRational::new(numer, denom)))
}

/// `|a - b|`, exact. Symmetric in its arguments.
pub fn spread_between(a: &Price, b: &Price) -> Spread {
    Spread((&a.0 - &b.0).abs())
}

/// Spread relative to the lower of the two prices, in basis points.
///
/// Returns `None` when the lower price is zero (a pool with no token1).
pub fn spread_bps(a: &Price, b: &Price) -> Option<BigRational> {
    let lower = if a <= b { a } else { b };
    if lower.0.is_zero() {
        return None;
    }

    let spread = spread_between(a, b);
    Some(spread.0 * BigInt::from(BPS_SCALE) / &lower.0)
}
