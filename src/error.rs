use alloy::primitives::Address;
use alloy::transports::TransportError;
use thiserror::Error;

/// Usage line shown when required configuration is missing.
pub const USAGE: &str = "set RPC_URL, PAIR_A, PAIR_B";

/// Every way a scan can fail. None of these are recovered internally.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Missing or malformed input configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The endpoint was unreachable or failed at the network level.
    #[error("transport error querying pool {pool}: {source}")]
    Transport {
        pool: Address,
        #[source]
        source: TransportError,
    },

    /// The call returned data that is not a `getReserves` tuple.
    #[error("decode error: {0}")]
    Decode(String),

    /// A pool reported zero reserve0, so its price is undefined.
    #[error("division by zero: pool reports zero reserve0")]
    DivisionByZero,
}

impl ScanError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScanError::Config(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
