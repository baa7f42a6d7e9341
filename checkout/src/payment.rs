//! The simulated payment step.
//!
//! No payment network exists in this system; the port stands in for one so
//! the checkout flow has a seam to fail through. A decline is surfaced to
//! the user with a retry affordance — retrying is always the user's call,
//! never automatic.

use freshcart_orders::PaymentMethod;
use rust_decimal::Decimal;
use thiserror::Error;

/// A declined charge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payment declined: {reason}")]
pub struct PaymentDeclined {
    /// Human-readable decline reason, shown in the retry alert
    pub reason: String,
}

/// Port for charging an order total
pub trait PaymentProcessor: Send + Sync {
    /// Attempt to charge `amount` via `method`
    ///
    /// # Errors
    ///
    /// Returns [`PaymentDeclined`] when the charge is rejected. Declines
    /// are expected outcomes, not faults.
    fn charge(&self, method: PaymentMethod, amount: Decimal) -> Result<(), PaymentDeclined>;
}

/// Mock processor used in place of a real gateway
///
/// Approves every charge by default; can be configured to decline
/// unconditionally to exercise the failure path.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentProcessor {
    decline_with: Option<String>,
}

impl MockPaymentProcessor {
    /// A processor that approves every charge
    #[must_use]
    pub const fn approving() -> Self {
        Self { decline_with: None }
    }

    /// A processor that declines every charge with the given reason
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            decline_with: Some(reason.into()),
        }
    }
}

impl PaymentProcessor for MockPaymentProcessor {
    fn charge(&self, method: PaymentMethod, amount: Decimal) -> Result<(), PaymentDeclined> {
        match &self.decline_with {
            Some(reason) => {
                tracing::debug!(?method, %amount, reason, "mock charge declined");
                Err(PaymentDeclined {
                    reason: reason.clone(),
                })
            },
            None => {
                tracing::debug!(?method, %amount, "mock charge approved");
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approving_processor_accepts() {
        let processor = MockPaymentProcessor::approving();
        assert!(
            processor
                .charge(PaymentMethod::Card, Decimal::from(50))
                .is_ok()
        );
    }

    #[test]
    fn declining_processor_reports_reason() {
        let processor = MockPaymentProcessor::declining("card expired");
        let err = processor
            .charge(PaymentMethod::Card, Decimal::from(50))
            .unwrap_err();
        assert_eq!(err.reason, "card expired");
        assert_eq!(err.to_string(), "payment declined: card expired");
    }
}
