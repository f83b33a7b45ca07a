//! Per-account amount aggregation

use crate::history::TransactionHistory;
use crate::types::transaction::{AccountId, Amount};

/// Arithmetic mean of an account's transaction amounts.
///
/// Debits and credits weigh the same. The result is truncated toward zero
/// and is 0 when the account has no transactions.
pub fn average_amount(history: &TransactionHistory, account_id: AccountId) -> Amount {
    let (total, count) = history
        .for_account(account_id)
        .fold((0i128, 0i128), |(total, count), tx| {
            (total + tx.amount as i128, count + 1)
        });

    if count == 0 {
        return 0;
    }

    (total / count) as Amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::Transaction;

    #[test]
    fn test_no_transactions() {
        let history = TransactionHistory::new();
        assert_eq!(average_amount(&history, 1), 0);
    }

    #[test]
    fn test_mixed_directions_same_weight() {
        let history = TransactionHistory::with_transactions([
            Transaction::debit(1, 1, 200),
            Transaction::credit(2, 1, 400),
            Transaction::credit(3, 2, 500),
        ])
        .unwrap();

        assert_eq!(average_amount(&history, 1), 300);
        assert_eq!(average_amount(&history, 2), 500);
        assert_eq!(average_amount(&history, 3), 0);
    }

    #[test]
    fn test_fractional_mean_truncates() {
        let history = TransactionHistory::with_transactions([
            Transaction::debit(1, 1, 100),
            Transaction::debit(2, 1, 101),
        ])
        .unwrap();

        assert_eq!(average_amount(&history, 1), 100);
    }
}
