//! Commerce backend contract.

use async_trait::async_trait;

use crate::error::ApiError;
use vitrine_commerce::coupon::CouponResult;
use vitrine_commerce::customer::{Customer, CustomerPatch};
use vitrine_commerce::gateway::PaymentGateway;
use vitrine_commerce::ids::CustomerId;
use vitrine_commerce::money::Money;
use vitrine_commerce::order::{CreateOrderData, Order};

/// The external commerce backend.
///
/// One checkout session performs at most one `create_order` call per
/// attempt; everything else is read-only or best-effort.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Fetch a stored customer profile.
    async fn customer(&self, id: &CustomerId) -> Result<Customer, ApiError>;

    /// Apply a partial update to a stored customer profile.
    async fn update_customer(
        &self,
        id: &CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, ApiError>;

    /// List the configured payment gateways.
    async fn payment_gateways(&self) -> Result<Vec<PaymentGateway>, ApiError>;

    /// Validate a discount code against a cart total.
    async fn validate_coupon(&self, code: &str, cart_total: Money)
        -> Result<CouponResult, ApiError>;

    /// Submit an order.
    async fn create_order(&self, data: CreateOrderData) -> Result<Order, ApiError>;
}
