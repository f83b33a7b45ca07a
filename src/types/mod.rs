//! Type definitions for the transaction analytics engine

pub mod alert;
pub mod transaction;

pub use alert::{FraudAlert, RiskLevel, RiskLevelThresholds};
pub use transaction::{AccountId, Amount, Transaction, TransactionId};
