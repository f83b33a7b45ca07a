//! Transaction Analytics Library
//!
//! Derives three signals from an insertion-ordered record of account
//! transactions: the mean amount per account, a recurring step between
//! consecutive amounts, and a fraud score for an incoming transaction.

pub mod analytics;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod service;
pub mod types;

pub use analytics::{Assessment, TransactionEngine};
pub use config::AppConfig;
pub use error::AnalyticsError;
pub use history::TransactionHistory;
pub use service::{AnalyticsService, SharedEngine};
pub use types::{alert::FraudAlert, transaction::Transaction};
