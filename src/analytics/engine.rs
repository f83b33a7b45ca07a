//! Transaction analytics engine

use crate::analytics::aggregation;
use crate::analytics::pattern::PatternDetector;
use crate::analytics::scoring::{Assessment, FraudScorer, ScoringPolicy};
use crate::config::DetectionConfig;
use crate::error::AnalyticsError;
use crate::history::TransactionHistory;
use crate::types::transaction::{AccountId, Amount, Transaction};
use tracing::{debug, info};

/// Analytics engine over one owned transaction history.
///
/// Each instance is independent; nothing is shared between engines.
#[derive(Debug, Clone, Default)]
pub struct TransactionEngine {
    history: TransactionHistory,
    scorer: FraudScorer,
}

impl TransactionEngine {
    /// Create an engine with an empty history and the default scoring policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom scoring policy
    pub fn with_policy(policy: ScoringPolicy) -> Result<Self, AnalyticsError> {
        Ok(Self {
            history: TransactionHistory::new(),
            scorer: FraudScorer::new(policy)?,
        })
    }

    /// Create an engine from detection configuration
    pub fn from_config(config: &DetectionConfig) -> Result<Self, AnalyticsError> {
        let engine = Self::with_policy(config.scoring_policy())?;
        info!(
            jump_multiplier = config.jump_multiplier,
            "Transaction engine initialized"
        );
        Ok(engine)
    }

    /// Wrap a pre-populated history
    pub fn with_history(history: TransactionHistory) -> Self {
        Self {
            history,
            scorer: FraudScorer::default(),
        }
    }

    pub fn history(&self) -> &TransactionHistory {
        &self.history
    }

    /// Direct access for callers inserting records themselves
    pub fn history_mut(&mut self) -> &mut TransactionHistory {
        &mut self.history
    }

    pub fn scoring_policy(&self) -> &ScoringPolicy {
        self.scorer.policy()
    }

    /// Mean amount over an account's transactions, 0 if it has none
    pub fn average_amount(&self, account_id: AccountId) -> Amount {
        aggregation::average_amount(&self.history, account_id)
    }

    /// Recurring step across the whole history, 0 if there is none
    pub fn detect_pattern(&self, threshold: Amount) -> Result<Amount, AnalyticsError> {
        let detector = PatternDetector::new(threshold)?;
        Ok(detector.detect(self.history.iter().map(|tx| tx.amount)))
    }

    /// Recurring step across one account's transactions, 0 if there is none
    pub fn detect_pattern_for_account(
        &self,
        account_id: AccountId,
        threshold: Amount,
    ) -> Result<Amount, AnalyticsError> {
        let detector = PatternDetector::new(threshold)?;
        Ok(detector.detect(self.history.for_account(account_id).map(|tx| tx.amount)))
    }

    /// Assess a transaction without recording it
    pub fn assess(&self, transaction: &Transaction) -> Result<Assessment, AnalyticsError> {
        self.scorer.assess(&self.history, transaction)
    }

    /// Fraud score of a transaction without recording it
    pub fn score(&self, transaction: &Transaction) -> Result<Amount, AnalyticsError> {
        Ok(self.assess(transaction)?.score())
    }

    /// Score a transaction and record it if its id is not yet present.
    ///
    /// Returns the same score as [`TransactionEngine::score`].
    pub fn add_and_score(&mut self, transaction: Transaction) -> Result<Amount, AnalyticsError> {
        Ok(self.add_and_assess(transaction)?.score())
    }

    /// Like [`TransactionEngine::add_and_score`], keeping the scoring branch
    pub fn add_and_assess(&mut self, transaction: Transaction) -> Result<Assessment, AnalyticsError> {
        let assessment = self.assess(&transaction)?;

        if assessment != Assessment::Duplicate {
            debug!(
                transaction_id = transaction.transaction_id,
                account_id = transaction.account_id,
                history_len = self.history.len() + 1,
                "Transaction recorded"
            );
            self.history.push(transaction)?;
        }

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(transactions: Vec<Transaction>) -> TransactionEngine {
        let mut engine = TransactionEngine::new();
        for tx in transactions {
            engine.history_mut().push(tx).unwrap();
        }
        engine
    }

    #[test]
    fn test_average_no_transactions() {
        let engine = TransactionEngine::new();
        assert_eq!(engine.average_amount(1), 0);
    }

    #[test]
    fn test_average_with_transactions() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 200),
            Transaction::credit(2, 1, 400),
            Transaction::credit(3, 2, 500),
        ]);

        assert_eq!(engine.average_amount(1), 300);
    }

    #[test]
    fn test_pattern_no_transactions() {
        let engine = TransactionEngine::new();
        assert_eq!(engine.detect_pattern(500).unwrap(), 0);
    }

    #[test]
    fn test_pattern_single_transaction() {
        let engine = engine_with(vec![Transaction::credit(1, 100, 1500)]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 0);
    }

    #[test]
    fn test_pattern_two_transactions() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 1200),
            Transaction::credit(2, 1, 1500),
        ]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 300);
    }

    #[test]
    fn test_pattern_same_direction_pair() {
        let engine = engine_with(vec![
            Transaction::debit(1, 100, 500),
            Transaction::debit(2, 100, 1500),
        ]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 1000);
    }

    #[test]
    fn test_pattern_same_step() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 1200),
            Transaction::credit(2, 1, 1500),
            Transaction::debit(3, 1, 1800),
        ]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 300);
    }

    #[test]
    fn test_pattern_stops_without_contradiction() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 1200),
            Transaction::credit(2, 1, 1500),
            Transaction::credit(3, 1, 500),
        ]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 300);
    }

    #[test]
    fn test_pattern_different_step() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 1200),
            Transaction::credit(2, 1, 1500),
            Transaction::debit(3, 1, 1900),
            Transaction::debit(4, 1, 2200),
        ]);
        assert_eq!(engine.detect_pattern(1000).unwrap(), 0);
    }

    #[test]
    fn test_pattern_for_account_ignores_others() {
        let engine = engine_with(vec![
            Transaction::debit(1, 1, 1200),
            Transaction::debit(2, 2, 9000),
            Transaction::debit(3, 1, 1500),
            Transaction::debit(4, 1, 1800),
        ]);

        assert_eq!(engine.detect_pattern(1000).unwrap(), 0);
        assert_eq!(engine.detect_pattern_for_account(1, 1000).unwrap(), 300);
        assert_eq!(engine.detect_pattern_for_account(2, 1000).unwrap(), 0);
    }

    #[test]
    fn test_score_existing_transaction() {
        let tx = Transaction::debit(1, 1, 200);
        let engine = engine_with(vec![tx.clone()]);

        assert_eq!(engine.score(&tx).unwrap(), 0);
    }

    #[test]
    fn test_score_fraud_detected() {
        let engine = engine_with(vec![Transaction::debit(1, 1, 100)]);
        let score = engine.score(&Transaction::debit(2, 1, 500)).unwrap();

        assert!(score > 0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_score_credit_is_zero() {
        let engine = engine_with(vec![Transaction::debit(1, 1, 10)]);
        assert_eq!(engine.score(&Transaction::credit(2, 1, 99_999)).unwrap(), 0);
    }

    #[test]
    fn test_add_existing_transaction() {
        let tx = Transaction::debit(1, 1, 300);
        let mut engine = engine_with(vec![tx.clone()]);

        assert_eq!(engine.add_and_score(tx).unwrap(), 0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_add_new_account() {
        let mut engine = TransactionEngine::new();
        let assessment = engine.add_and_assess(Transaction::debit(1, 100, 1200)).unwrap();

        assert_eq!(assessment, Assessment::NoBaseline { amount: 1200 });
        assert_eq!(assessment.score(), 1200);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_add_credit_after_debits() {
        let mut engine = engine_with(vec![
            Transaction::debit(1, 1, 200),
            Transaction::debit(2, 1, 400),
        ]);

        assert_eq!(engine.add_and_score(Transaction::credit(3, 1, 1800)).unwrap(), 0);
        assert_eq!(engine.history().len(), 3);
    }

    #[test]
    fn test_add_twice_appends_once() {
        let mut engine = TransactionEngine::new();
        let tx = Transaction::debit(7, 1, 100);

        let first = engine.add_and_score(tx.clone()).unwrap();
        let second = engine.add_and_assess(tx).unwrap();

        assert_eq!(first, 100);
        assert_eq!(second, Assessment::Duplicate);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_add_matches_read_only_score() {
        let mut engine = engine_with(vec![Transaction::debit(1, 1, 100)]);
        let tx = Transaction::debit(2, 1, 500);

        let read_only = engine.score(&tx).unwrap();
        let added = engine.add_and_score(tx).unwrap();

        assert_eq!(read_only, added);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_invalid_input_not_recorded() {
        let mut engine = TransactionEngine::new();

        assert!(engine.add_and_score(Transaction::debit(1, 1, -5)).is_err());
        assert!(engine.detect_pattern(-1).is_err());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_engines_are_independent() {
        let mut first = TransactionEngine::new();
        let second = TransactionEngine::new();

        first.add_and_score(Transaction::debit(1, 1, 100)).unwrap();

        assert_eq!(first.average_amount(1), 100);
        assert_eq!(second.average_amount(1), 0);
    }
}
