pub mod abis;
pub mod config;
pub mod error;
pub mod reserves;
pub mod utils;
pub mod worker;

pub use self::config::Settings;
pub use error::{ScanError, USAGE};
pub use reserves::{fetch_reserves, PoolReserves, ReserveSource, RpcReserveSource};
pub use worker::{SpreadReport, SpreadScanner};
