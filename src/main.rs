//! Transaction Analytics - Replay Driver
//!
//! Feeds newline-delimited JSON transactions through the analytics service,
//! logs fraud alerts and prints a metrics summary at the end.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{error, info, warn};
use transaction_analytics::{logging, AnalyticsService, AppConfig, Transaction};

fn main() -> Result<()> {
    let config = if Path::new("config/config.toml").exists() {
        AppConfig::load()?
    } else {
        AppConfig::default()
    };

    logging::init(&config.logging)?;
    info!("Starting transaction analytics replay");

    let service = AnalyticsService::new(config.detection.clone())?;

    let input: Box<dyn BufRead> = match std::env::args().nth(1).as_deref() {
        None | Some("-") => Box::new(BufReader::new(io::stdin())),
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path))?,
        )),
    };

    for (line_no, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let transaction: Transaction = match serde_json::from_str(&line) {
            Ok(tx) => tx,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Failed to deserialize transaction");
                continue;
            }
        };
        let tx_id = transaction.transaction_id;

        match service.ingest(transaction) {
            Ok(Some(alert)) => {
                info!(
                    transaction_id = tx_id,
                    account_id = alert.account_id,
                    score = alert.score,
                    risk_level = alert.risk_level.as_str(),
                    reason = %alert.reason,
                    "Fraud alert raised"
                );
                println!("{}", serde_json::to_string(&alert)?);
            }
            Ok(None) => {}
            Err(e) => {
                error!(transaction_id = tx_id, error = %e, "Transaction rejected");
            }
        }
    }

    let pattern = service.pattern()?;
    if pattern != 0 {
        info!(
            step = pattern,
            threshold = config.detection.pattern_threshold,
            "Step pattern detected"
        );
    }

    info!("Replay finished");
    service.metrics().print_summary();

    Ok(())
}
