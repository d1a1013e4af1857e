//! External collaborator interfaces for the Vitrine checkout engine.
//!
//! The checkout pipeline talks to three independent external systems:
//!
//! - `CommerceApi` - the commerce backend (customers, gateways, coupons,
//!   order creation)
//! - `GeoProvider` - the geography data provider (country / state / city
//!   cascades)
//! - `PaymentProcessor` - the payment processor that exchanges raw card
//!   details for an opaque token
//!
//! Each seam is an async trait; implementations are injected by the
//! surrounding shell and held behind `Arc`. This crate defines only the
//! contracts and the shared `ApiError` type - it performs no I/O itself.

mod commerce;
mod error;
mod geo;
mod payment;

pub use commerce::CommerceApi;
pub use error::ApiError;
pub use geo::GeoProvider;
pub use payment::PaymentProcessor;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, CommerceApi, GeoProvider, PaymentProcessor};
}
