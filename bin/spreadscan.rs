use std::process::ExitCode;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{error, info, log_enabled, Level};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use spreadscan::{RpcReserveSource, ScanError, Settings, SpreadReport, SpreadScanner, USAGE};

/// Conventional status for a run stopped by SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main()]
async fn main() -> ExitCode {
    // Load configuration (config file, then environment)
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            if !matches!(&e, ScanError::Config(msg) if msg == USAGE) {
                eprintln!("{e}");
            }
            eprintln!("{USAGE}");
            return ExitCode::from(e.exit_code());
        },
    };

    if let Err(e) = SimpleLogger::new().with_level(settings.log_level).init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    match run(settings).await {
        Ok(Some(report)) => {
            println!("{report}");
            ExitCode::SUCCESS
        },
        Ok(None) => ExitCode::from(EXIT_INTERRUPTED),
        Err(e) => {
            // Must reach the operator even with LOG_LEVEL=off
            if log_enabled!(Level::Error) {
                error!("{}", failure_message(&e));
            } else {
                eprintln!("{}", failure_message(&e));
            }
            ExitCode::from(failure_exit_code(&e))
        },
    }
}

fn failure_message(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}

fn failure_exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<ScanError>().map(ScanError::exit_code).unwrap_or(1)
}

/// Run a single scan. Returns `None` when interrupted before it completes.
async fn run(settings: Settings) -> anyhow::Result<Option<SpreadReport>> {
    let source = RpcReserveSource::new(settings.rpc_url.clone());
    let scanner = SpreadScanner::new(source, settings.threshold_bps, settings.parallel);

    info!(
        "Scanning pools {} and {} via {}",
        settings.pair_a,
        settings.pair_b,
        settings.rpc_url.host_str().unwrap_or("<unknown host>")
    );

    // Dropping the scan future aborts the in-flight call; nothing is decoded from it
    tokio::select! {
        result = scanner.scan(settings.pair_a, settings.pair_b) => {
            let report = result.context("Spread scan failed")?;
            Ok(Some(report))
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal (Ctrl+C), abandoning scan");
            Ok(None)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_includes_cause() {
        let e = anyhow::Error::new(ScanError::DivisionByZero).context("Spread scan failed");
        let msg = failure_message(&e);
        assert!(msg.starts_with("Spread scan failed"));
        assert!(msg.contains("division by zero"));
    }

    #[test]
    fn test_failure_exit_code_sees_through_context() {
        let scan =
            anyhow::Error::new(ScanError::Decode("short".into())).context("Spread scan failed");
        assert_eq!(failure_exit_code(&scan), 1);

        let config = anyhow::Error::new(ScanError::Config(USAGE.to_string())).context("loading");
        assert_eq!(failure_exit_code(&config), 2);

        assert_eq!(failure_exit_code(&anyhow::anyhow!("other")), 1);
    }
}
