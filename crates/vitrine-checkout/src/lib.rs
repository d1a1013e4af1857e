//! Checkout pipeline for the Vitrine storefront.
//!
//! Coordinates several independent asynchronous data sources into one
//! consistent, validated, single-submission transaction:
//!
//! - **Form**: owned field values with a declarative validation rule set
//! - **Geography**: country / state / city cascades guarded by generation
//!   tokens, so a stale response never overwrites a newer selection
//! - **Profile**: stored-profile prefill and best-effort write-back
//! - **Gateways**: the enabled payment methods for this session
//! - **Coupon**: discount staging tied to the cart revision
//! - **Submit**: the submission state machine, guaranteeing at most one
//!   in-flight order call
//! - **Session**: the in-process facade the UI shell drives
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_checkout::prelude::*;
//!
//! let mut session = CheckoutSession::new(api, geo, processor, cart, customer_id);
//! session.begin().await;
//!
//! session.set_field(Field::Email, "amelie@example.com");
//! session.select_country("FR").await;
//! session.select_state("IDF").await;
//! session.select_city("Paris");
//!
//! match session.submit().await {
//!     Ok(order) => println!("order {}", order.order_number),
//!     Err(e) => eprintln!("checkout failed: {}", e),
//! }
//! ```

pub mod coupon;
pub mod error;
pub mod form;
pub mod gateways;
pub mod geography;
pub mod profile;
pub mod session;
pub mod submit;

pub use error::CheckoutError;
pub use session::CheckoutSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::coupon::{CouponState, StagedCoupon};
    pub use crate::error::CheckoutError;
    pub use crate::form::{CheckoutForm, Field, FieldErrors, ValidationContext};
    pub use crate::gateways::GatewayRegistry;
    pub use crate::geography::{GeographyResolver, GeographySelection};
    pub use crate::profile::ProfileSync;
    pub use crate::session::CheckoutSession;
    pub use crate::submit::{OrderSubmitter, SubmissionState};
}
