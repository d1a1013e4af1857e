//! Convenient imports for storefront shells.

pub use vitrine_checkout::prelude::*;
pub use vitrine_commerce::prelude::*;
pub use vitrine_data::prelude::*;
