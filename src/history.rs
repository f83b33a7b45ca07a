//! Insertion-ordered transaction history shared by all analytics operations

use crate::error::AnalyticsError;
use crate::types::transaction::{AccountId, Transaction, TransactionId};

/// Append-only, insertion-ordered record of transactions.
///
/// Order of insertion is significant to pattern detection. Records are never
/// removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct TransactionHistory {
    transactions: Vec<Transaction>,
}

impl TransactionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Build a history from pre-existing records, validating each one
    pub fn with_transactions(
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> Result<Self, AnalyticsError> {
        let mut history = Self::new();
        for tx in transactions {
            history.push(tx)?;
        }
        Ok(history)
    }

    /// Append a record.
    ///
    /// Duplicates are not filtered here; callers inserting directly own that
    /// decision. Only the engine's add-and-score path guarantees exactly-once.
    pub fn push(&mut self, transaction: Transaction) -> Result<(), AnalyticsError> {
        transaction.validate()?;
        self.transactions.push(transaction);
        Ok(())
    }

    /// True if a record with the same identity is already present
    pub fn contains(&self, transaction: &Transaction) -> bool {
        self.contains_id(transaction.transaction_id)
    }

    pub fn contains_id(&self, transaction_id: TransactionId) -> bool {
        self.transactions
            .iter()
            .any(|tx| tx.transaction_id == transaction_id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Iterate one account's records in insertion order
    pub fn for_account(&self, account_id: AccountId) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.account_id == account_id)
    }

    /// Most recently inserted debit of an account
    pub fn last_debit_for(&self, account_id: AccountId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .find(|tx| tx.account_id == account_id && tx.is_debit)
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }
}
