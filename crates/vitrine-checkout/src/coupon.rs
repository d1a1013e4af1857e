//! Coupon validation and staging.

use tracing::{debug, warn};

use vitrine_commerce::coupon::AppliedCoupon;
use vitrine_commerce::money::Money;
use vitrine_data::CommerceApi;

/// A validated discount, staged against the cart revision it was
/// computed for.
///
/// The discount is not applied to any total until order construction,
/// and only while the cart revision still matches.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedCoupon {
    /// The validated code.
    pub code: String,
    /// Discount computed by the backend for the cart total at
    /// validation time.
    pub discount: Money,
    cart_revision: u64,
}

/// Coupon field state: at most one staged discount plus an inline,
/// non-blocking error message.
#[derive(Debug, Default)]
pub struct CouponState {
    staged: Option<StagedCoupon>,
    error: Option<String>,
}

impl CouponState {
    /// Create an empty coupon state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a code against the current cart total.
    ///
    /// On success the discount is staged; on rejection or transport
    /// failure an inline error is recorded and nothing is staged.
    /// Returns true when a discount was staged.
    pub async fn validate<A: CommerceApi>(
        &mut self,
        api: &A,
        code: &str,
        cart_total: Money,
        cart_revision: u64,
    ) -> bool {
        let code = code.trim();
        if code.is_empty() {
            self.staged = None;
            self.error = Some("Enter a discount code".to_string());
            return false;
        }

        match api.validate_coupon(code, cart_total).await {
            Ok(result) if result.valid => {
                let discount = result
                    .discount
                    .unwrap_or_else(|| Money::zero(cart_total.currency));
                debug!(code = %code, discount = %discount, "coupon staged");
                self.staged = Some(StagedCoupon {
                    code: code.to_string(),
                    discount,
                    cart_revision,
                });
                self.error = None;
                true
            }
            Ok(result) => {
                self.staged = None;
                self.error = Some(
                    result
                        .reason
                        .unwrap_or_else(|| "Invalid discount code".to_string()),
                );
                false
            }
            Err(e) => {
                warn!(code = %code, error = %e, "coupon validation call failed");
                self.staged = None;
                self.error = Some("Could not validate the discount code".to_string());
                false
            }
        }
    }

    /// The staged coupon, regardless of freshness.
    pub fn staged(&self) -> Option<&StagedCoupon> {
        self.staged.as_ref()
    }

    /// The staged coupon, only while it is still fresh for the given
    /// cart revision.
    pub fn staged_for(&self, cart_revision: u64) -> Option<&StagedCoupon> {
        self.staged
            .as_ref()
            .filter(|s| s.cart_revision == cart_revision)
    }

    /// Check if a staged coupon exists but was validated against an
    /// older cart revision.
    pub fn is_stale(&self, cart_revision: u64) -> bool {
        self.staged
            .as_ref()
            .is_some_and(|s| s.cart_revision != cart_revision)
    }

    /// The applied-discount record for order assembly, fresh only.
    pub fn applied(&self, cart_revision: u64) -> Option<AppliedCoupon> {
        self.staged_for(cart_revision).map(|s| AppliedCoupon {
            code: s.code.clone(),
            amount: s.discount,
        })
    }

    /// The inline error message, if the last validation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Remove the code, staging, and error.
    pub fn clear(&mut self) {
        self.staged = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use vitrine_commerce::coupon::CouponResult;
    use vitrine_commerce::customer::{Customer, CustomerPatch};
    use vitrine_commerce::gateway::PaymentGateway;
    use vitrine_commerce::ids::CustomerId;
    use vitrine_commerce::money::Currency;
    use vitrine_commerce::order::{CreateOrderData, Order};
    use vitrine_data::ApiError;

    struct FakeApi {
        outcome: Result<CouponResult, ApiError>,
    }

    #[async_trait]
    impl CommerceApi for FakeApi {
        async fn customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
            Err(ApiError::NotFound(id.to_string()))
        }

        async fn update_customer(
            &self,
            id: &CustomerId,
            _patch: CustomerPatch,
        ) -> Result<Customer, ApiError> {
            Err(ApiError::NotFound(id.to_string()))
        }

        async fn payment_gateways(&self) -> Result<Vec<PaymentGateway>, ApiError> {
            Ok(Vec::new())
        }

        async fn validate_coupon(
            &self,
            _code: &str,
            _cart_total: Money,
        ) -> Result<CouponResult, ApiError> {
            self.outcome.clone()
        }

        async fn create_order(&self, _data: CreateOrderData) -> Result<Order, ApiError> {
            Err(ApiError::Timeout)
        }
    }

    const TOTAL: Money = Money {
        amount_cents: 10_000,
        currency: Currency::EUR,
    };

    #[tokio::test]
    async fn test_valid_coupon_is_staged() {
        let api = FakeApi {
            outcome: Ok(CouponResult::accepted(
                "SAVE10",
                Money::new(1000, Currency::EUR),
            )),
        };
        let mut state = CouponState::new();

        assert!(state.validate(&api, "SAVE10", TOTAL, 7).await);
        assert_eq!(state.staged_for(7).unwrap().discount.amount_cents, 1000);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_coupon_records_inline_error() {
        let api = FakeApi {
            outcome: Ok(CouponResult::rejected("INVALID10", "unknown code")),
        };
        let mut state = CouponState::new();

        assert!(!state.validate(&api, "INVALID10", TOTAL, 7).await);
        assert!(state.staged().is_none());
        assert_eq!(state.error(), Some("unknown code"));
    }

    #[tokio::test]
    async fn test_transport_failure_records_inline_error() {
        let api = FakeApi {
            outcome: Err(ApiError::Timeout),
        };
        let mut state = CouponState::new();

        assert!(!state.validate(&api, "SAVE10", TOTAL, 7).await);
        assert!(state.staged().is_none());
        assert!(state.error().is_some());
    }

    #[tokio::test]
    async fn test_cart_mutation_invalidates_staging() {
        let api = FakeApi {
            outcome: Ok(CouponResult::accepted(
                "SAVE10",
                Money::new(1000, Currency::EUR),
            )),
        };
        let mut state = CouponState::new();
        state.validate(&api, "SAVE10", TOTAL, 7).await;

        // Cart revision moved on; the staged discount must not apply.
        assert!(state.is_stale(8));
        assert!(state.staged_for(8).is_none());
        assert!(state.applied(8).is_none());

        // Re-validation against the new revision restores it.
        state.validate(&api, "SAVE10", TOTAL, 8).await;
        assert!(state.applied(8).is_some());
    }

    #[tokio::test]
    async fn test_empty_code_rejected_without_call() {
        let api = FakeApi {
            outcome: Err(ApiError::Timeout),
        };
        let mut state = CouponState::new();

        assert!(!state.validate(&api, "   ", TOTAL, 0).await);
        assert!(state.error().is_some());
    }
}
