//! Payment gateway types.

use crate::ids::GatewayId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a payment gateway.
///
/// The type drives which additional fields the checkout form requires:
/// only `Card` gateways collect card details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayType {
    /// Credit/debit card.
    Card,
    /// Digital wallet (e.g., hosted pay button).
    DigitalWallet,
    /// Direct bank transfer.
    BankTransfer,
    /// Pay on delivery.
    CashOnDelivery,
}

impl GatewayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayType::Card => "card",
            GatewayType::DigitalWallet => "digital_wallet",
            GatewayType::BankTransfer => "bank_transfer",
            GatewayType::CashOnDelivery => "cash_on_delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GatewayType::Card => "Card",
            GatewayType::DigitalWallet => "Digital Wallet",
            GatewayType::BankTransfer => "Bank Transfer",
            GatewayType::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Check if this gateway type collects card details at checkout.
    pub fn requires_card_details(&self) -> bool {
        matches!(self, GatewayType::Card)
    }
}

/// A configured payment gateway.
///
/// Sourced read-only from the backend once per checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentGateway {
    /// Unique gateway identifier.
    pub id: GatewayId,
    /// Display name (e.g., "Visa / Mastercard").
    pub name: String,
    /// Gateway classification.
    pub gateway_type: GatewayType,
    /// Whether the gateway is enabled for this store.
    pub enabled: bool,
}

impl PaymentGateway {
    /// Create a new gateway descriptor.
    pub fn new(
        id: impl Into<GatewayId>,
        name: impl Into<String>,
        gateway_type: GatewayType,
        enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gateway_type,
            enabled,
        }
    }
}

/// Card details collected by the checkout form.
///
/// Held transiently and exchanged for a `PaymentToken` before any order
/// payload is built; never serialized into an order.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// Primary account number, digits only.
    pub number: String,
    /// Expiry in "MM/YY" form.
    pub expiry: String,
    /// Card verification value.
    pub cvv: String,
}

impl CardDetails {
    /// Create card details from the raw form fields.
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Last four digits of the card number, for display.
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        if len >= 4 {
            &self.number[len - 4..]
        } else {
            &self.number
        }
    }
}

// Manual Debug: the PAN and CVV must never reach logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format!("****{}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

/// An opaque token returned by the payment processor in exchange for
/// card details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentToken(String);

impl PaymentToken {
    /// Wrap a processor-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
