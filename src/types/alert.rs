//! Fraud alert data structures

use crate::types::transaction::{AccountId, Amount, Transaction, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify a fraud score relative to the amount it was computed for.
    ///
    /// A cold-start debit scores its full amount and lands at ratio 1.0.
    pub fn from_score(score: Amount, amount: Amount, thresholds: &RiskLevelThresholds) -> Self {
        let ratio = if amount > 0 {
            score as f64 / amount as f64
        } else {
            0.0
        };

        if ratio >= thresholds.critical {
            RiskLevel::Critical
        } else if ratio >= thresholds.high {
            RiskLevel::High
        } else if ratio >= thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Configurable risk level thresholds, as fractions of the transaction amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLevelThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            low: 0.25,
            medium: 0.5,
            high: 0.75,
            critical: 0.9,
        }
    }
}

/// Fraud alert raised when an ingested transaction scores above the alert threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Unique alert identifier
    pub alert_id: String,

    /// Scored transaction
    pub transaction_id: TransactionId,

    /// Owning account
    pub account_id: AccountId,

    /// Transaction amount
    pub amount: Amount,

    /// Fraud score reported by the engine
    pub score: Amount,

    /// Risk level classification
    pub risk_level: RiskLevel,

    /// Which scoring branch produced the score
    pub reason: String,

    /// Alert generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl FraudAlert {
    /// Create a new fraud alert for a scored transaction
    pub fn new(transaction: &Transaction, score: Amount, risk_level: RiskLevel) -> Self {
        Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            transaction_id: transaction.transaction_id,
            account_id: transaction.account_id,
            amount: transaction.amount,
            score,
            risk_level,
            reason: String::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach the scoring branch that triggered the alert
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}
