//! # Vitrine SDK
//!
//! Single entry point for storefront shells building on the Vitrine
//! checkout engine.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vitrine_sdk::prelude::*;
//!
//! let mut session = CheckoutSession::new(api, geo, processor, cart, customer_id);
//! session.begin().await;
//!
//! session.set_field(Field::Email, "buyer@example.com");
//! session.select_country("FR").await;
//! session.select_state("IDF").await;
//! session.select_city("Paris");
//!
//! let order = session.submit().await?;
//! println!("placed {}", order.order_number);
//! ```
//!
//! ## Architecture
//!
//! - [`vitrine_commerce`] - domain types (money, cart, gateways, orders)
//! - [`vitrine_data`] - the async contracts external collaborators implement
//! - [`vitrine_checkout`] - the checkout pipeline and session facade

pub mod prelude;

// Re-export the engine crates
pub use vitrine_checkout;
pub use vitrine_commerce;
pub use vitrine_data;

// Re-export the types shells touch most
pub use vitrine_checkout::{CheckoutError, CheckoutSession};
pub use vitrine_commerce::{CommerceError, Currency, Money};
pub use vitrine_data::ApiError;
