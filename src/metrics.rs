//! Counters and timing statistics for the analytics service.

use crate::analytics::scoring::Assessment;
use crate::types::alert::RiskLevel;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for engine activity
pub struct EngineMetrics {
    /// Transactions scored, including duplicates
    pub transactions_scored: AtomicU64,
    /// Transactions appended to history
    pub transactions_recorded: AtomicU64,
    /// Transactions skipped because their id was already recorded
    pub duplicates_skipped: AtomicU64,
    /// Credits, which are never scored
    pub credits_seen: AtomicU64,
    /// Debits scored without a baseline
    pub cold_starts: AtomicU64,
    /// Total alerts generated
    pub alerts_generated: AtomicU64,
    /// Alerts by risk level
    alerts_by_level: RwLock<HashMap<RiskLevel, u64>>,
    /// Scoring times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    start_time: Instant,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self {
            transactions_scored: AtomicU64::new(0),
            transactions_recorded: AtomicU64::new(0),
            duplicates_skipped: AtomicU64::new(0),
            credits_seen: AtomicU64::new(0),
            cold_starts: AtomicU64::new(0),
            alerts_generated: AtomicU64::new(0),
            alerts_by_level: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record one add-and-score call
    pub fn record_assessment(&self, assessment: &Assessment, processing_time: Duration) {
        self.transactions_scored.fetch_add(1, Ordering::Relaxed);

        match assessment {
            Assessment::Duplicate => {
                self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
            }
            Assessment::Credit => {
                self.credits_seen.fetch_add(1, Ordering::Relaxed);
                self.transactions_recorded.fetch_add(1, Ordering::Relaxed);
            }
            Assessment::NoBaseline { .. } => {
                self.cold_starts.fetch_add(1, Ordering::Relaxed);
                self.transactions_recorded.fetch_add(1, Ordering::Relaxed);
            }
            Assessment::Compared { .. } => {
                self.transactions_recorded.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only last 10000
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }
    }

    /// Record an alert
    pub fn record_alert(&self, risk_level: RiskLevel) {
        self.alerts_generated.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_level) = self.alerts_by_level.write() {
            *by_level.entry(risk_level).or_insert(0) += 1;
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let Ok(times) = self.processing_times.read() else {
            return ProcessingStats::default();
        };
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p99_us: sorted[((count as f64 * 0.99) as usize).min(count - 1)],
            max_us: sorted[count - 1],
        }
    }

    /// Transactions scored per second since start
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.transactions_scored.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_alerts_by_level(&self) -> HashMap<RiskLevel, u64> {
        self.alerts_by_level
            .read()
            .map(|by_level| by_level.clone())
            .unwrap_or_default()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let scored = self.transactions_scored.load(Ordering::Relaxed);
        let recorded = self.transactions_recorded.load(Ordering::Relaxed);
        let duplicates = self.duplicates_skipped.load(Ordering::Relaxed);
        let credits = self.credits_seen.load(Ordering::Relaxed);
        let cold_starts = self.cold_starts.load(Ordering::Relaxed);
        let alerts = self.alerts_generated.load(Ordering::Relaxed);
        let alert_rate = if scored > 0 {
            (alerts as f64 / scored as f64) * 100.0
        } else {
            0.0
        };

        let processing = self.get_processing_stats();

        info!(
            scored,
            recorded,
            duplicates,
            credits,
            cold_starts,
            throughput = format!("{:.1} tx/s", self.get_throughput()),
            "Engine activity"
        );
        info!(
            alerts,
            alert_rate = format!("{:.1}%", alert_rate),
            mean_us = processing.mean_us,
            p50_us = processing.p50_us,
            p99_us = processing.p99_us,
            max_us = processing.max_us,
            "Scoring summary"
        );
        for (level, count) in self.get_alerts_by_level() {
            info!(level = level.as_str(), count, "Alerts by risk level");
        }
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}
