//! Scanner settings.
//!
//! Keys are read from an optional `config` file and then from unprefixed
//! environment variables, so a shell that already exports a generic name such
//! as `PARALLEL` or `LOG_LEVEL` for another tool will feed it to the scanner too.

use alloy::primitives::Address;
use config::{Config, Environment, File};
use log::LevelFilter;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, ScanError, USAGE};

/// Raw configuration as read from the `config` file and the environment.
///
/// Every field is optional here so that a missing key is reported with the
/// usage line instead of a serde message.
#[derive(Debug, Deserialize, Clone)]
struct RawSettings {
    rpc_url: Option<String>,
    pair_a: Option<String>,
    pair_b: Option<String>,
    #[serde(default = "default_threshold_bps")]
    threshold_bps: u32,
    #[serde(default)]
    parallel: bool,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_threshold_bps() -> u32 {
    100 // 1%
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Validated scanner configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: Url,
    pub pair_a: Address,
    pub pair_b: Address,
    /// Relative spread (in basis points) at or above which a warning is logged.
    pub threshold_bps: u32,
    /// Query both pools concurrently instead of one after the other.
    pub parallel: bool,
    pub log_level: LevelFilter,
}

impl Settings {
    /// Load settings from an optional `config.{yaml,toml,json}` file, overridden
    /// by environment variables (`RPC_URL`, `PAIR_A`, `PAIR_B`, ...).
    pub fn new() -> Result<Self> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let raw: RawSettings = s
            .try_deserialize()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let (Some(rpc_url), Some(pair_a), Some(pair_b)) = (
            non_empty(raw.rpc_url),
            non_empty(raw.pair_a),
            non_empty(raw.pair_b),
        ) else {
            return Err(ScanError::Config(USAGE.to_string()));
        };

        let rpc_url = Url::parse(&rpc_url)
            .map_err(|e| ScanError::Config(format!("RPC_URL is not a valid URL: {e}")))?;

        let log_level = raw
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ScanError::Config(format!("unknown LOG_LEVEL '{}'", raw.log_level)))?;

        Ok(Self {
            rpc_url,
            pair_a: parse_pool_address("PAIR_A", &pair_a)?,
            pair_b: parse_pool_address("PAIR_B", &pair_b)?,
            threshold_bps: raw.threshold_bps,
            parallel: raw.parallel,
            log_level,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `0x`-prefixed, 20-byte hex address. Case is not significant.
pub fn parse_pool_address(key: &str, value: &str) -> Result<Address> {
    let hex_part = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| ScanError::Config(format!("{key} must be 0x-prefixed, got '{value}'")))?;

    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ScanError::Config(format!(
            "{key} must be 20 bytes of hex, got '{value}'"
        )));
    }

    hex_part
        .parse::<Address>()
        .map_err(|e| ScanError::Config(format!("{key} is not a valid address: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL_A: &str = "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc";
    const POOL_B: &str = "0x397ff1542f962076d0bfe58ea045ffa2d347aca0";

    fn raw(rpc: &str, a: &str, b: &str) -> RawSettings {
        RawSettings {
            rpc_url: Some(rpc.to_string()),
            pair_a: Some(a.to_string()),
            pair_b: Some(b.to_string()),
            threshold_bps: default_threshold_bps(),
            parallel: false,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn test_valid_settings() {
        let settings = Settings::from_raw(raw("http://localhost:8545", POOL_A, POOL_B)).unwrap();
        assert_eq!(settings.pair_a, POOL_A.parse::<Address>().unwrap());
        assert_eq!(settings.pair_b, POOL_B.parse::<Address>().unwrap());
        assert_eq!(settings.threshold_bps, 100);
        assert_eq!(settings.log_level, LevelFilter::Info);
        assert!(!settings.parallel);
    }

    #[test]
    fn test_missing_keys_report_usage() {
        let mut missing = raw("http://localhost:8545", POOL_A, POOL_B);
        missing.pair_b = None;
        match Settings::from_raw(missing) {
            Err(ScanError::Config(msg)) => assert_eq!(msg, USAGE),
            other => panic!("expected config error, got {other:?}"),
        }

        let empty = raw("", POOL_A, POOL_B);
        assert!(matches!(Settings::from_raw(empty), Err(ScanError::Config(_))));
    }

    #[test]
    fn test_loads_from_environment() {
        // Only test in the crate that touches these variables
        let vars = [
            ("RPC_URL", "http://localhost:8545"),
            ("PAIR_A", POOL_A),
            ("PAIR_B", POOL_B),
            ("THRESHOLD_BPS", "250"),
            ("PARALLEL", "true"),
            ("LOG_LEVEL", "debug"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let settings = Settings::new().unwrap();
        assert_eq!(settings.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(settings.pair_a, POOL_A.parse::<Address>().unwrap());
        assert_eq!(settings.pair_b, POOL_B.parse::<Address>().unwrap());
        assert_eq!(settings.threshold_bps, 250);
        assert!(settings.parallel);
        assert_eq!(settings.log_level, LevelFilter::Debug);

        std::env::remove_var("PAIR_B");
        match Settings::new() {
            Err(ScanError::Config(msg)) => assert_eq!(msg, USAGE),
            other => panic!("expected config error, got {other:?}"),
        }

        for (key, _) in vars {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_address_case_insensitive() {
        let lower = parse_pool_address("PAIR_A", &POOL_A.to_lowercase()).unwrap();
        let upper = parse_pool_address("PAIR_A", &format!("0X{}", &POOL_A[2..].to_uppercase()))
            .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_address_requires_prefix_and_length() {
        assert!(parse_pool_address("PAIR_A", &POOL_A[2..]).is_err());
        assert!(parse_pool_address("PAIR_A", "0x1234").is_err());
        assert!(parse_pool_address("PAIR_A", "0xzz16d0168e52d35cacd2c6185b44281ec28c9dc0").is_err());
    }

    #[test]
    fn test_invalid_url_and_level() {
        assert!(Settings::from_raw(raw("not a url", POOL_A, POOL_B)).is_err());

        let mut bad_level = raw("http://localhost:8545", POOL_A, POOL_B);
        bad_level.log_level = "loud".to_string();
        assert!(Settings::from_raw(bad_level).is_err());
    }
}
