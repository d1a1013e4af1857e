//! Payment processor contract.

use async_trait::async_trait;

use crate::error::ApiError;
use vitrine_commerce::gateway::{CardDetails, PaymentToken};

/// The external payment processor.
///
/// Card details collected by the form are exchanged for an opaque token
/// before any order payload is built; the commerce backend never sees
/// raw card data.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Exchange card details for a single-use payment token.
    async fn tokenize(&self, card: CardDetails) -> Result<PaymentToken, ApiError>;
}
