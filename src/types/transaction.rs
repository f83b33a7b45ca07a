//! Transaction records fed into the analytics engine

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Identifier of a single transaction
pub type TransactionId = u64;

/// Identifier of the account owning a transaction
pub type AccountId = u64;

/// Transaction amount in minor units
pub type Amount = i64;

/// A single account transaction.
///
/// Two transactions are equal when their ids match, whatever their other
/// fields hold. See [`Transaction::same_identity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(alias = "transactionId")]
    pub transaction_id: TransactionId,

    /// Owning account
    #[serde(alias = "accountId")]
    pub account_id: AccountId,

    /// Magnitude of the transaction, never negative once validated
    pub amount: Amount,

    /// True when money leaves the account
    #[serde(alias = "isDebit", alias = "debit")]
    pub is_debit: bool,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Amount,
        is_debit: bool,
    ) -> Self {
        Self {
            transaction_id,
            account_id,
            amount,
            is_debit,
        }
    }

    /// Create a debit (money leaving the account)
    pub fn debit(transaction_id: TransactionId, account_id: AccountId, amount: Amount) -> Self {
        Self::new(transaction_id, account_id, amount, true)
    }

    /// Create a credit (money entering the account)
    pub fn credit(transaction_id: TransactionId, account_id: AccountId, amount: Amount) -> Self {
        Self::new(transaction_id, account_id, amount, false)
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_debit(&self) -> bool {
        self.is_debit
    }

    pub fn set_transaction_id(&mut self, transaction_id: TransactionId) {
        self.transaction_id = transaction_id;
    }

    pub fn set_account_id(&mut self, account_id: AccountId) {
        self.account_id = account_id;
    }

    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }

    pub fn set_debit(&mut self, is_debit: bool) {
        self.is_debit = is_debit;
    }

    /// Identity comparison: true when both records carry the same id.
    ///
    /// This is not structural equality. Account, amount and direction are
    /// ignored.
    pub fn same_identity(&self, other: &Transaction) -> bool {
        self.transaction_id == other.transaction_id
    }

    /// Reject records the engine cannot reason about
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.amount < 0 {
            return Err(AnalyticsError::negative_amount(
                self.transaction_id,
                self.amount,
            ));
        }
        Ok(())
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.transaction_id.hash(state);
    }
}
