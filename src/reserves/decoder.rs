//! Fixed-layout codec for the Uniswap V2 `getReserves()` call.
//!
//! The return value is the standard ABI encoding of the static tuple
//! `(uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast)`:
//!
//! | word | bytes    | field                | width    |
//! |------|----------|----------------------|----------|
//! | 0    | 0..32    | `reserve0`           | 112 bits |
//! | 1    | 32..64   | `reserve1`           | 112 bits |
//! | 2    | 64..96   | `blockTimestampLast` | 32 bits  |
//!
//! Each value is right-aligned in its 32-byte word with zero padding on the left.

use alloy::primitives::Bytes;
use num_bigint::BigUint;

use crate::error::{Result, ScanError};

// ============================================
// Layout Constants
// ============================================

/// `bytes4(keccak256("getReserves()"))`
pub const GET_RESERVES_SELECTOR: [u8; 4] = [0x09, 0x02, 0xf1, 0xac];

/// ABI word size in bytes.
pub const WORD_SIZE: usize = 32;

/// Minimum length of a well-formed `getReserves()` return payload.
pub const RESERVES_RETURN_LEN: usize = 3 * WORD_SIZE;

/// Declared width of `reserve0` / `reserve1`.
pub const RESERVE_BITS: u64 = 112;

/// Declared width of `blockTimestampLast`.
pub const TIMESTAMP_BITS: u64 = 32;

/// A single named field of the return tuple.
struct Field {
    name: &'static str,
    word: usize,
    bits: u64,
}

const RESERVE0: Field = Field { name: "reserve0", word: 0, bits: RESERVE_BITS };
const RESERVE1: Field = Field { name: "reserve1", word: 1, bits: RESERVE_BITS };
const TIMESTAMP: Field = Field { name: "blockTimestampLast", word: 2, bits: TIMESTAMP_BITS };

// ============================================
// Types
// ============================================

/// Reserves of a pool as reported by a single `getReserves()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    /// Block timestamp (seconds) of the pool's last reserve update.
    pub block_timestamp_last: u32,
}

impl PoolReserves {
    pub fn new(
        reserve0: impl Into<BigUint>,
        reserve1: impl Into<BigUint>,
        block_timestamp_last: u32,
    ) -> Self {
        Self {
            reserve0: reserve0.into(),
            reserve1: reserve1.into(),
            block_timestamp_last,
        }
    }
}

// ============================================
// Encoding / Decoding
// ============================================

/// Calldata for `getReserves()`: the selector with no argument data.
pub fn get_reserves_calldata() -> Bytes {
    Bytes::copy_from_slice(&GET_RESERVES_SELECTOR)
}

/// Decode a `getReserves()` return payload.
///
/// Bytes past the third word are ignored. Fails with [`ScanError::Decode`]
/// when the payload is short or a field overflows its declared width.
pub fn decode_reserves(data: &[u8]) -> Result<PoolReserves> {
    if data.len() < RESERVES_RETURN_LEN {
        return Err(ScanError::Decode(format!(
            "getReserves returned {} bytes, expected at least {}",
            data.len(),
            RESERVES_RETURN_LEN
        )));
    }

    let reserve0 = read_field(data, &RESERVE0)?;
    let reserve1 = read_field(data, &RESERVE1)?;
    let timestamp = read_field(data, &TIMESTAMP)?;

    // Bounded to 32 bits by read_field
    let block_timestamp_last = timestamp
        .to_u32_digits()
        .first()
        .copied()
        .unwrap_or_default();

    Ok(PoolReserves {
        reserve0,
        reserve1,
        block_timestamp_last,
    })
}

fn read_field(data: &[u8], field: &Field) -> Result<BigUint> {
    let start = field.word * WORD_SIZE;
    let value = BigUint::from_bytes_be(&data[start..start + WORD_SIZE]);

    if value.bits() > field.bits {
        return Err(ScanError::Decode(format!(
            "{} does not fit in uint{} ({} bits used)",
            field.name,
            field.bits,
            value.bits()
        )));
    }

    Ok(value)
}
