//! Reserve queries against Uniswap V2 style pair contracts.
//!
//! - [`decoder`] - call payload construction and fixed-layout return decoding
//! - [`source`] - read-only call transport and the fetch-then-decode entry point

pub mod decoder;
pub mod source;

pub use decoder::{
    decode_reserves, get_reserves_calldata, PoolReserves, GET_RESERVES_SELECTOR,
    RESERVES_RETURN_LEN, RESERVE_BITS, TIMESTAMP_BITS, WORD_SIZE,
};
pub use source::{fetch_reserves, ReserveSource, RpcReserveSource};
