//! Pricing utilities for the spread scanner.
//!
//! - [`conversion`] - fixed-point rendering of exact rationals
//! - [`price`] - reserve ratio prices and spreads

mod conversion;
mod price;

// ============================================
// Common Constants
// ============================================

/// Fractional digits used when rendering prices and spreads.
pub const PRICE_DECIMALS: u32 = 8;

// ============================================
// Re-exports
// ============================================

pub use conversion::format_fixed;

pub use price::{price_of, spread_between, spread_bps, Price, Spread};
