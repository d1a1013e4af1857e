//! Checkout error types.

use thiserror::Error;

use crate::form::FieldErrors;
use vitrine_commerce::error::CommerceError;
use vitrine_commerce::ids::GatewayId;
use vitrine_data::ApiError;

/// Errors that can occur in the checkout pipeline.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// A submission is already in flight; submit is not re-entrant.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// No enabled payment gateway is available.
    #[error("No payment method available")]
    NoPaymentMethod,

    /// The selected gateway is not in the enabled set.
    #[error("Unknown payment gateway: {0}")]
    UnknownGateway(GatewayId),

    /// The cart has no items to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Exhaustive form validation failed; no network call was made.
    #[error("Validation failed: {} field(s) invalid", .0.len())]
    ValidationFailed(FieldErrors),

    /// The staged coupon was validated against an older cart revision.
    #[error("Coupon must be re-validated against the current cart")]
    StaleCoupon,

    /// Illegal submission state transition.
    #[error("Invalid submission transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Domain-level failure (overflow, currency mismatch).
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// External collaborator failure.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
}
