#[allow(clippy::module_inception)]
mod config;

pub use self::config::{parse_pool_address, Settings};
