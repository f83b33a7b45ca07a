//! Analytics engine errors

use thiserror::Error;

/// Errors raised by the analytics core.
///
/// Unknown accounts and empty histories are not errors: they produce zero
/// or cold-start results. Only malformed input is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transaction history lock poisoned")]
    LockPoisoned,
}

impl AnalyticsError {
    pub(crate) fn negative_amount(transaction_id: u64, amount: i64) -> Self {
        AnalyticsError::InvalidInput(format!(
            "transaction {} has negative amount {}",
            transaction_id, amount
        ))
    }
}
