//! Formatting utilities for exact rationals.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Render a rational as a fixed-point decimal string with `decimals` fractional digits.
///
/// The last digit is rounded to nearest, halves away from zero. No decimal point
/// is emitted when `decimals` is 0, and a value that rounds to zero carries no sign.
///
/// # Example
/// ```ignore
/// let third = BigRational::new(1.into(), 3.into());
/// assert_eq!(format_fixed(&third, 8), "0.33333333");
/// ```
pub fn format_fixed(value: &BigRational, decimals: u32) -> String {
    let scale = BigInt::from(10u32).pow(decimals);
    let numer = value.numer().abs() * &scale;
    let denom = value.denom().abs();

    let mut scaled = &numer / &denom;
    let remainder = &numer % &denom;
    if remainder * 2u32 >= denom {
        scaled += 1u32;
    }

    let sign = if value.is_negative() && !scaled.is_zero() { "-" } else { "" };
    let int_part = &scaled / &scale;

    if decimals == 0 {
        return format!("{sign}{int_part}");
    }

    let frac_part = &scaled % &scale;
    format!(
        "{sign}{int_part}.{frac:0>width$}",
        frac = frac_part.to_string(),
        width = decimals as usize
    )
}
