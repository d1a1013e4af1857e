//! Checkout session orchestration.
//!
//! `CheckoutSession` wires the pipeline components together behind the
//! in-process API the UI shell calls. The shell owns rendering and
//! routing; the session owns every piece of checkout state.

use std::sync::Arc;

use crate::coupon::CouponState;
use crate::error::CheckoutError;
use crate::form::{CheckoutForm, Field, FieldErrors, ValidationContext};
use crate::gateways::GatewayRegistry;
use crate::geography::GeographyResolver;
use crate::profile::ProfileSync;
use crate::submit::{OrderSubmitter, SubmissionState};
use vitrine_commerce::cart::CartController;
use vitrine_commerce::ids::{CustomerId, GatewayId};
use vitrine_commerce::order::Order;
use vitrine_data::{CommerceApi, GeoProvider, PaymentProcessor};

/// One buyer's checkout, from entry to order or abandonment.
pub struct CheckoutSession<A, G, T, C> {
    api: Arc<A>,
    form: CheckoutForm,
    geography: GeographyResolver<G>,
    profile: ProfileSync<A>,
    gateways: GatewayRegistry,
    coupon: CouponState,
    submitter: OrderSubmitter<A, T>,
    cart: C,
}

impl<A, G, T, C> CheckoutSession<A, G, T, C>
where
    A: CommerceApi,
    G: GeoProvider,
    T: PaymentProcessor,
    C: CartController,
{
    /// Create a session over the injected collaborators.
    pub fn new(
        api: Arc<A>,
        geo: Arc<G>,
        processor: Arc<T>,
        cart: C,
        customer_id: Option<CustomerId>,
    ) -> Self {
        Self {
            form: CheckoutForm::new(),
            geography: GeographyResolver::new(geo),
            profile: ProfileSync::new(Arc::clone(&api), customer_id),
            gateways: GatewayRegistry::new(),
            coupon: CouponState::new(),
            submitter: OrderSubmitter::new(Arc::clone(&api), processor),
            api,
            cart,
        }
    }

    /// Initialize the session: profile prefill, gateway load, and
    /// country load run concurrently; none of them is fatal.
    pub async fn begin(&mut self) {
        let api = Arc::clone(&self.api);
        let Self {
            form,
            profile,
            gateways,
            geography,
            ..
        } = self;

        futures::join!(
            profile.prefill(form),
            gateways.load(api.as_ref()),
            geography.load_countries(),
        );

        // Mirror the default gateway selection into the form.
        if let Some(gateway) = self.gateways.selected_gateway() {
            let id = gateway.id.clone();
            self.form.set_field(Field::PaymentMethod, id.as_str());
        }
    }

    /// Update a field and re-check it incrementally.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
        let ctx = self.validation_ctx();
        self.form.validate_field(field, &ctx);
    }

    /// Select a country; clears the state/city levels and loads the
    /// country's states.
    pub async fn select_country(&mut self, code: impl Into<String>) {
        let code = code.into();
        self.geography.select_country(code.clone());
        self.form.set_field(Field::Country, code);
        self.form.set_field(Field::State, "");
        self.form.set_field(Field::City, "");

        let batch = self.geography.request_states().fetch().await;
        self.geography.apply_states(batch);
    }

    /// Select a state; clears the city level and loads the state's
    /// cities.
    pub async fn select_state(&mut self, code: impl Into<String>) {
        let code = code.into();
        self.geography.select_state(code.clone());
        self.form.set_field(Field::State, code);
        self.form.set_field(Field::City, "");

        let batch = self.geography.request_cities().fetch().await;
        self.geography.apply_cities(batch);
    }

    /// Select a resolved city.
    pub fn select_city(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.geography.select_city(name.clone());
        self.form.set_field(Field::City, name);
        let ctx = self.validation_ctx();
        self.form.validate_field(Field::City, &ctx);
    }

    /// Enter a free-text city when the provider has no city data.
    pub fn set_custom_city(&mut self, value: impl Into<String>) {
        self.form.set_field(Field::CustomCity, value);
        let ctx = self.validation_ctx();
        self.form.validate_field(Field::City, &ctx);
    }

    /// Switch the payment gateway.
    ///
    /// When the new gateway stops requiring card details, lingering
    /// card-field errors are dropped.
    pub fn select_gateway(&mut self, id: &GatewayId) -> Result<(), CheckoutError> {
        self.gateways.select(id)?;
        self.form.set_field(Field::PaymentMethod, id.as_str());
        if !self.gateways.requires_card_details() {
            self.form.clear_card_errors();
        }
        Ok(())
    }

    /// Validate a discount code against the current cart total.
    ///
    /// Returns true when a discount was staged.
    pub async fn apply_coupon(&mut self, code: &str) -> Result<bool, CheckoutError> {
        let total = self.cart.subtotal()?;
        let revision = self.cart.revision();
        Ok(self
            .coupon
            .validate(self.api.as_ref(), code, total, revision)
            .await)
    }

    /// Remove the coupon code, staging, and error.
    pub fn remove_coupon(&mut self) {
        self.coupon.clear();
    }

    /// Validate and submit the order.
    ///
    /// On success the cart is cleared and closed, the address is written
    /// back to the profile (best-effort), and the form state is
    /// destroyed.
    pub async fn submit(&mut self) -> Result<Order, CheckoutError> {
        let Self {
            form,
            gateways,
            coupon,
            cart,
            submitter,
            ..
        } = self;
        let order = submitter.submit(form, gateways, coupon, cart).await?;

        self.profile.persist(&self.form).await;
        self.form.reset();
        self.coupon.clear();
        Ok(order)
    }

    /// Abandon the checkout: pending geography lookups become inert and
    /// the form state is destroyed.
    pub fn abandon(&mut self) {
        self.geography.invalidate();
        self.form.reset();
        self.coupon.clear();
        self.submitter.reset();
    }

    /// The form state.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Current field-level errors.
    pub fn errors(&self) -> &FieldErrors {
        self.form.errors()
    }

    /// The geography resolver, for shells that race their own lookups.
    pub fn geography(&self) -> &GeographyResolver<G> {
        &self.geography
    }

    /// Mutable access to the geography resolver.
    pub fn geography_mut(&mut self) -> &mut GeographyResolver<G> {
        &mut self.geography
    }

    /// The gateway registry.
    pub fn gateways(&self) -> &GatewayRegistry {
        &self.gateways
    }

    /// The coupon state.
    pub fn coupon(&self) -> &CouponState {
        &self.coupon
    }

    /// The injected cart.
    pub fn cart(&self) -> &C {
        &self.cart
    }

    /// The current submission state.
    pub fn state(&self) -> SubmissionState {
        self.submitter.state()
    }

    /// The root-level error from the last failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.submitter.last_error()
    }

    fn validation_ctx(&self) -> ValidationContext {
        ValidationContext {
            requires_card: self.gateways.requires_card_details(),
        }
    }
}
