//! Step-pattern detection across consecutive transaction amounts

use crate::error::AnalyticsError;
use crate::types::transaction::Amount;
use tracing::debug;

/// Detects a recurring amount step between consecutive transactions.
///
/// Pairs are walked in insertion order. A pair counts only when its later
/// amount reaches the threshold. The first counted pair fixes the step and
/// every later counted pair must reproduce it exactly, otherwise no pattern
/// is reported. Pairs whose later amount stays below the threshold do not
/// continue the progression and are skipped.
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    threshold: Amount,
}

impl PatternDetector {
    /// Create a detector for the given threshold
    pub fn new(threshold: Amount) -> Result<Self, AnalyticsError> {
        if threshold < 0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "pattern threshold must not be negative, got {}",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> Amount {
        self.threshold
    }

    /// Return the consistent step, or 0 when there is none.
    pub fn detect<I>(&self, amounts: I) -> Amount
    where
        I: IntoIterator<Item = Amount>,
    {
        let mut amounts = amounts.into_iter();
        let Some(mut previous) = amounts.next() else {
            return 0;
        };

        let mut step: Option<Amount> = None;

        for current in amounts {
            if current >= self.threshold {
                let diff = current - previous;
                match step {
                    None => step = Some(diff),
                    Some(established) if established != diff => {
                        debug!(
                            established,
                            diff,
                            threshold = self.threshold,
                            "Step pattern contradicted"
                        );
                        return 0;
                    }
                    Some(_) => {}
                }
            }
            previous = current;
        }

        step.unwrap_or(0)
    }
}
