//! Payment gateway registry.

use tracing::{debug, warn};

use crate::error::CheckoutError;
use vitrine_commerce::gateway::PaymentGateway;
use vitrine_commerce::ids::GatewayId;
use vitrine_data::CommerceApi;

/// The set of payment gateways available to this checkout session.
///
/// Fetched once per session, filtered to enabled gateways, kept in
/// backend order. The selected gateway's type drives which conditional
/// fields the form requires.
#[derive(Debug, Default)]
pub struct GatewayRegistry {
    gateways: Vec<PaymentGateway>,
    selected: Option<GatewayId>,
    loaded: bool,
}

impl GatewayRegistry {
    /// Create an empty, unloaded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the gateway list. Subsequent calls are no-ops.
    ///
    /// Fetch failure degrades to an empty set (which blocks submission
    /// with a no-payment-method condition); default selection is the
    /// first enabled gateway.
    pub async fn load<A: CommerceApi>(&mut self, api: &A) {
        if self.loaded {
            debug!("gateway registry already loaded for this session");
            return;
        }
        self.loaded = true;

        let fetched = match api.payment_gateways().await {
            Ok(gateways) => gateways,
            Err(e) => {
                warn!(error = %e, "gateway fetch failed, no payment methods available");
                Vec::new()
            }
        };

        self.gateways = fetched.into_iter().filter(|g| g.enabled).collect();
        self.selected = self.gateways.first().map(|g| g.id.clone());
    }

    /// The enabled gateways, in backend order.
    pub fn gateways(&self) -> &[PaymentGateway] {
        &self.gateways
    }

    /// Check if no payment method is available.
    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }

    /// Whether `load` has run for this session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Select a gateway by id.
    pub fn select(&mut self, id: &GatewayId) -> Result<(), CheckoutError> {
        if !self.gateways.iter().any(|g| &g.id == id) {
            return Err(CheckoutError::UnknownGateway(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// The currently selected gateway.
    pub fn selected_gateway(&self) -> Option<&PaymentGateway> {
        let id = self.selected.as_ref()?;
        self.gateways.iter().find(|g| &g.id == id)
    }

    /// Check if the selected gateway collects card details.
    pub fn requires_card_details(&self) -> bool {
        self.selected_gateway()
            .map(|g| g.gateway_type.requires_card_details())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use vitrine_commerce::coupon::CouponResult;
    use vitrine_commerce::customer::{Customer, CustomerPatch};
    use vitrine_commerce::gateway::GatewayType;
    use vitrine_commerce::ids::CustomerId;
    use vitrine_commerce::money::Money;
    use vitrine_commerce::order::{CreateOrderData, Order};
    use vitrine_data::ApiError;

    struct FakeApi {
        gateways: Result<Vec<PaymentGateway>, ApiError>,
    }

    #[async_trait]
    impl CommerceApi for FakeApi {
        async fn customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
            Err(ApiError::NotFound(id.to_string()))
        }

        async fn update_customer(
            &self,
            id: &CustomerId,
            _patch: CustomerPatch,
        ) -> Result<Customer, ApiError> {
            Err(ApiError::NotFound(id.to_string()))
        }

        async fn payment_gateways(&self) -> Result<Vec<PaymentGateway>, ApiError> {
            self.gateways.clone()
        }

        async fn validate_coupon(
            &self,
            code: &str,
            _cart_total: Money,
        ) -> Result<CouponResult, ApiError> {
            Ok(CouponResult::rejected(code, "unknown code"))
        }

        async fn create_order(&self, _data: CreateOrderData) -> Result<Order, ApiError> {
            Err(ApiError::Timeout)
        }
    }

    fn three_gateways() -> Vec<PaymentGateway> {
        vec![
            PaymentGateway::new("gw-card", "Visa / Mastercard", GatewayType::Card, true),
            PaymentGateway::new("gw-wallet", "Wallet Pay", GatewayType::DigitalWallet, false),
            PaymentGateway::new("gw-cod", "Cash on Delivery", GatewayType::CashOnDelivery, true),
        ]
    }

    #[tokio::test]
    async fn test_load_filters_disabled_and_selects_first() {
        let api = FakeApi {
            gateways: Ok(three_gateways()),
        };
        let mut registry = GatewayRegistry::new();
        registry.load(&api).await;

        assert_eq!(registry.gateways().len(), 2);
        assert_eq!(
            registry.selected_gateway().unwrap().id,
            GatewayId::new("gw-card")
        );
        assert!(registry.requires_card_details());
    }

    #[tokio::test]
    async fn test_load_runs_once_per_session() {
        let api = FakeApi {
            gateways: Ok(three_gateways()),
        };
        let mut registry = GatewayRegistry::new();
        registry.load(&api).await;

        let empty_api = FakeApi {
            gateways: Ok(Vec::new()),
        };
        registry.load(&empty_api).await;
        assert_eq!(registry.gateways().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty() {
        let api = FakeApi {
            gateways: Err(ApiError::Timeout),
        };
        let mut registry = GatewayRegistry::new();
        registry.load(&api).await;

        assert!(registry.is_empty());
        assert!(registry.selected_gateway().is_none());
        assert!(!registry.requires_card_details());
    }

    #[tokio::test]
    async fn test_select_switches_required_fields() {
        let api = FakeApi {
            gateways: Ok(three_gateways()),
        };
        let mut registry = GatewayRegistry::new();
        registry.load(&api).await;

        registry.select(&GatewayId::new("gw-cod")).unwrap();
        assert!(!registry.requires_card_details());
    }

    #[tokio::test]
    async fn test_select_rejects_disabled_or_unknown() {
        let api = FakeApi {
            gateways: Ok(three_gateways()),
        };
        let mut registry = GatewayRegistry::new();
        registry.load(&api).await;

        assert!(matches!(
            registry.select(&GatewayId::new("gw-wallet")),
            Err(CheckoutError::UnknownGateway(_))
        ));
        assert!(matches!(
            registry.select(&GatewayId::new("gw-missing")),
            Err(CheckoutError::UnknownGateway(_))
        ));
    }
}
