//! Thread-safe access to one engine, plus alerting and metrics

use crate::analytics::engine::TransactionEngine;
use crate::analytics::scoring::Assessment;
use crate::config::DetectionConfig;
use crate::error::AnalyticsError;
use crate::metrics::EngineMetrics;
use crate::types::alert::{FraudAlert, RiskLevel};
use crate::types::transaction::{AccountId, Amount, Transaction};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::{debug, info};

/// A [`TransactionEngine`] behind a read-write lock.
///
/// Add-and-score holds the write lock across its check-then-append, so
/// concurrent callers never record the same id twice.
#[derive(Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<TransactionEngine>>,
}

impl SharedEngine {
    pub fn new(engine: TransactionEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TransactionEngine>, AnalyticsError> {
        self.inner.read().map_err(|_| AnalyticsError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TransactionEngine>, AnalyticsError> {
        self.inner.write().map_err(|_| AnalyticsError::LockPoisoned)
    }

    pub fn average_amount(&self, account_id: AccountId) -> Result<Amount, AnalyticsError> {
        Ok(self.read()?.average_amount(account_id))
    }

    pub fn detect_pattern(&self, threshold: Amount) -> Result<Amount, AnalyticsError> {
        self.read()?.detect_pattern(threshold)
    }

    pub fn detect_pattern_for_account(
        &self,
        account_id: AccountId,
        threshold: Amount,
    ) -> Result<Amount, AnalyticsError> {
        self.read()?.detect_pattern_for_account(account_id, threshold)
    }

    pub fn score(&self, transaction: &Transaction) -> Result<Amount, AnalyticsError> {
        self.read()?.score(transaction)
    }

    pub fn add_and_score(&self, transaction: Transaction) -> Result<Amount, AnalyticsError> {
        self.write()?.add_and_score(transaction)
    }

    pub fn add_and_assess(&self, transaction: Transaction) -> Result<Assessment, AnalyticsError> {
        self.write()?.add_and_assess(transaction)
    }

    /// Insert a record directly, bypassing scoring and duplicate checks
    pub fn insert(&self, transaction: Transaction) -> Result<(), AnalyticsError> {
        self.write()?.history_mut().push(transaction)
    }

    pub fn history_len(&self) -> Result<usize, AnalyticsError> {
        Ok(self.read()?.history().len())
    }
}

/// Ingests transactions through a shared engine and raises fraud alerts
pub struct AnalyticsService {
    engine: SharedEngine,
    metrics: Arc<EngineMetrics>,
    config: DetectionConfig,
}

impl AnalyticsService {
    pub fn new(config: DetectionConfig) -> Result<Self, AnalyticsError> {
        let engine = SharedEngine::new(TransactionEngine::from_config(&config)?);
        info!(
            alert_threshold = config.alert_threshold,
            pattern_threshold = config.pattern_threshold,
            "Analytics service initialized"
        );
        Ok(Self {
            engine,
            metrics: Arc::new(EngineMetrics::new()),
            config,
        })
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        self.metrics.clone()
    }

    /// Add and score a transaction; returns an alert when the score reaches
    /// the alert threshold.
    pub fn ingest(&self, transaction: Transaction) -> Result<Option<FraudAlert>, AnalyticsError> {
        let start_time = Instant::now();
        let assessment = self.engine.add_and_assess(transaction.clone())?;
        self.metrics
            .record_assessment(&assessment, start_time.elapsed());

        let score = assessment.score();
        if score == 0 || score < self.config.alert_threshold {
            debug!(
                transaction_id = transaction.transaction_id,
                score,
                "Transaction processed (below alert threshold)"
            );
            return Ok(None);
        }

        let risk_level =
            RiskLevel::from_score(score, transaction.amount, &self.config.risk_levels);
        self.metrics.record_alert(risk_level);

        Ok(Some(
            FraudAlert::new(&transaction, score, risk_level).with_reason(assessment.reason()),
        ))
    }

    /// Step pattern across the whole history at the configured threshold
    pub fn pattern(&self) -> Result<Amount, AnalyticsError> {
        self.engine.detect_pattern(self.config.pattern_threshold)
    }
}
