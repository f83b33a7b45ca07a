//! Fraud scoring of a single transaction against account history

use crate::error::AnalyticsError;
use crate::history::TransactionHistory;
use crate::types::transaction::{Amount, Transaction};
use serde::Deserialize;
use tracing::debug;

/// Tunable parameters of the fraud scorer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoringPolicy {
    /// A debit scores the amount by which it exceeds this multiple of the
    /// account's previous debit
    pub jump_multiplier: Amount,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self { jump_multiplier: 2 }
    }
}

/// Outcome of scoring one transaction, naming the branch taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    /// The transaction id is already recorded
    Duplicate,
    /// Credits carry no fraud risk
    Credit,
    /// No prior debit to compare against; the whole amount is at risk
    NoBaseline { amount: Amount },
    /// Compared against the account's most recent debit
    Compared { baseline: Amount, score: Amount },
}

impl Assessment {
    /// Integer fraud score; 0 means no risk
    pub fn score(&self) -> Amount {
        match self {
            Assessment::Duplicate | Assessment::Credit => 0,
            Assessment::NoBaseline { amount } => *amount,
            Assessment::Compared { score, .. } => *score,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Assessment::Duplicate => "duplicate",
            Assessment::Credit => "credit",
            Assessment::NoBaseline { .. } => "no_baseline",
            Assessment::Compared { .. } => "debit_jump",
        }
    }
}

/// Scores transactions against the history they would join
#[derive(Debug, Clone, Default)]
pub struct FraudScorer {
    policy: ScoringPolicy,
}

impl FraudScorer {
    pub fn new(policy: ScoringPolicy) -> Result<Self, AnalyticsError> {
        if policy.jump_multiplier < 0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "jump multiplier must not be negative, got {}",
                policy.jump_multiplier
            )));
        }
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Assess a transaction without touching the history
    pub fn assess(
        &self,
        history: &TransactionHistory,
        transaction: &Transaction,
    ) -> Result<Assessment, AnalyticsError> {
        transaction.validate()?;

        let assessment = if history.contains(transaction) {
            Assessment::Duplicate
        } else if !transaction.is_debit {
            Assessment::Credit
        } else {
            match history.last_debit_for(transaction.account_id) {
                None => Assessment::NoBaseline {
                    amount: transaction.amount,
                },
                Some(previous) => {
                    let limit = previous.amount.saturating_mul(self.policy.jump_multiplier);
                    Assessment::Compared {
                        baseline: previous.amount,
                        score: transaction.amount.saturating_sub(limit).max(0),
                    }
                }
            }
        };

        debug!(
            transaction_id = transaction.transaction_id,
            account_id = transaction.account_id,
            reason = assessment.reason(),
            score = assessment.score(),
            "Transaction assessed"
        );

        Ok(assessment)
    }
}
