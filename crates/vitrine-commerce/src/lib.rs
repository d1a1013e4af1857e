//! E-commerce domain types for the Vitrine checkout engine.
//!
//! This crate provides the data model the checkout pipeline operates on:
//!
//! - **Money**: cents-based monetary values with checked arithmetic
//! - **Cart**: the externally injected cart container and its line items
//! - **Customer**: stored buyer profiles and partial profile updates
//! - **Gateway**: payment gateway descriptors and card tokenization types
//! - **Coupon**: discount-code validation results and applied discounts
//! - **Order**: the single-shot order payload and the confirmed order
//! - **Geo**: country / state / city lookup data
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::EUR);
//! cart.add_item(
//!     VariantId::new("var-1"),
//!     ProductId::new("prod-1"),
//!     "Linen Tablecloth",
//!     2,
//!     Money::new(4500, Currency::EUR),
//! )?;
//!
//! let subtotal = cart.subtotal()?;
//! println!("Subtotal: {}", subtotal.display());
//! ```

pub mod cart;
pub mod coupon;
pub mod customer;
pub mod error;
pub mod gateway;
pub mod geo;
pub mod ids;
pub mod money;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartController, LineItem};
    pub use crate::coupon::{AppliedCoupon, CouponResult};
    pub use crate::customer::{Customer, CustomerAddress, CustomerPatch};
    pub use crate::gateway::{CardDetails, GatewayType, PaymentGateway, PaymentToken};
    pub use crate::geo::{City, Country, Region};
    pub use crate::order::{CreateOrderData, Order, OrderLineItem, OrderStatus, ShippingDetails};
}
