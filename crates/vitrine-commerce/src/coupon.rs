//! Discount code types.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Backend verdict on a discount code for a given cart total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponResult {
    /// The code that was checked.
    pub code: String,
    /// Whether the code applies.
    pub valid: bool,
    /// Computed discount for the cart total at validation time.
    pub discount: Option<Money>,
    /// Human-readable rejection reason when invalid.
    pub reason: Option<String>,
}

impl CouponResult {
    /// Create an accepted result.
    pub fn accepted(code: impl Into<String>, discount: Money) -> Self {
        Self {
            code: code.into(),
            valid: true,
            discount: Some(discount),
            reason: None,
        }
    }

    /// Create a rejected result.
    pub fn rejected(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            valid: false,
            discount: None,
            reason: Some(reason.into()),
        }
    }
}

/// A discount applied to a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// The discount code used.
    pub code: String,
    /// Amount discounted.
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_accepted_result() {
        let result = CouponResult::accepted("SAVE10", Money::new(1000, Currency::EUR));
        assert!(result.valid);
        assert_eq!(result.discount.unwrap().amount_cents, 1000);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_rejected_result() {
        let result = CouponResult::rejected("INVALID10", "unknown code");
        assert!(!result.valid);
        assert!(result.discount.is_none());
        assert_eq!(result.reason.as_deref(), Some("unknown code"));
    }
}
