//! Order payload and order types.

use crate::cart::LineItem;
use crate::coupon::AppliedCoupon;
use crate::gateway::PaymentToken;
use crate::ids::{CheckoutId, GatewayId, OrderId, OrderLineItemId, ProductId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Order status, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed and processing.
    Confirmed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Shipping destination captured from the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingDetails {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    pub address1: String,
    /// City (resolved from geography, or free-text fallback).
    pub city: String,
    /// State/province code.
    pub region_code: Option<String>,
    /// Country code.
    pub country_code: String,
    /// Postal/ZIP code.
    pub postal_code: String,
}

/// The order payload sent to the backend.
///
/// Assembled exactly once, at submit time, from validated inputs. Carries
/// a client-generated idempotency key so a retried submission after a
/// network ambiguity cannot create a duplicate order. Payment is
/// referenced by opaque token only; raw card fields never appear here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderData {
    /// Client-generated key, stable across retries of one attempt.
    pub idempotency_key: CheckoutId,
    /// Buyer email.
    pub email: String,
    /// Shipping destination.
    pub shipping: ShippingDetails,
    /// Items frozen from the cart at submit time.
    pub line_items: Vec<OrderLineItem>,
    /// Selected payment gateway.
    pub gateway_id: GatewayId,
    /// Processor-issued payment token (card gateways only).
    pub payment_token: Option<PaymentToken>,
    /// Applied discount, if a fresh coupon was staged.
    pub coupon: Option<AppliedCoupon>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Grand total charged.
    pub grand_total: Money,
    /// Order currency.
    pub currency: Currency,
}

/// A confirmed order returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Buyer email.
    pub email: String,
    /// Order status.
    pub status: OrderStatus,
    /// Items in the order.
    pub line_items: Vec<OrderLineItem>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Grand total charged.
    pub grand_total: Money,
    /// Order currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Generate a new order number.
    pub fn generate_order_number() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("ORD-{}", ts)
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// A line item frozen into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Unique line item identifier.
    pub id: OrderLineItemId,
    /// Variant ID.
    pub variant_id: VariantId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at time of order.
    pub unit_price: Money,
    /// Total price for this line.
    pub total_price: Money,
}

impl OrderLineItem {
    /// Freeze a cart line item into an order line.
    pub fn from_cart_item(item: &LineItem) -> Self {
        Self {
            id: OrderLineItemId::generate(),
            variant_id: item.variant_id.clone(),
            product_id: item.product_id.clone(),
            name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_generation() {
        let num = Order::generate_order_number();
        assert!(num.starts_with("ORD-"));
    }

    #[test]
    fn test_order_line_from_cart_item() {
        let item = LineItem::new(
            VariantId::new("var-1"),
            ProductId::new("prod-1"),
            "Linen Tablecloth",
            2,
            Money::new(4500, Currency::EUR),
        )
        .unwrap();

        let line = OrderLineItem::from_cart_item(&item);
        assert_eq!(line.variant_id, item.variant_id);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.total_price.amount_cents, 9000);
    }
}
