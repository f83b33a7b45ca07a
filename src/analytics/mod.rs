//! Analytics over the transaction history

pub mod aggregation;
pub mod engine;
pub mod pattern;
pub mod scoring;

pub use engine::TransactionEngine;
pub use pattern::PatternDetector;
pub use scoring::{Assessment, FraudScorer, ScoringPolicy};
