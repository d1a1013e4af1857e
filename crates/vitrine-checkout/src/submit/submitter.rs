//! Order assembly and submission.

use std::sync::Arc;

use tracing::info;

use crate::coupon::CouponState;
use crate::error::CheckoutError;
use crate::form::{CheckoutForm, Field, ValidationContext};
use crate::gateways::GatewayRegistry;
use crate::submit::state::{SubmissionMachine, SubmissionState};
use vitrine_commerce::cart::CartController;
use vitrine_commerce::coupon::AppliedCoupon;
use vitrine_commerce::error::CommerceError;
use vitrine_commerce::gateway::{PaymentGateway, PaymentToken};
use vitrine_commerce::ids::CheckoutId;
use vitrine_commerce::money::Money;
use vitrine_commerce::order::{CreateOrderData, Order, OrderLineItem, ShippingDetails};
use vitrine_data::{CommerceApi, PaymentProcessor};

/// Drives the submission state machine.
///
/// Exactly one order call per attempt: the in-flight guard rejects
/// re-entrant submits, and the payload is assembled only after exhaustive
/// validation passes. Card details, when required, are exchanged for a
/// processor token before assembly; raw card fields never enter the
/// payload.
pub struct OrderSubmitter<A, T> {
    api: Arc<A>,
    processor: Arc<T>,
    machine: SubmissionMachine,
    last_error: Option<String>,
    attempt_key: Option<CheckoutId>,
}

impl<A: CommerceApi, T: PaymentProcessor> OrderSubmitter<A, T> {
    /// Create a submitter over the backend and payment processor.
    pub fn new(api: Arc<A>, processor: Arc<T>) -> Self {
        Self {
            api,
            processor,
            machine: SubmissionMachine::new(),
            last_error: None,
            attempt_key: None,
        }
    }

    /// The current submission state.
    pub fn state(&self) -> SubmissionState {
        self.machine.state()
    }

    /// The root-level error from the last failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The idempotency key for the current attempt, if one was issued.
    pub fn attempt_key(&self) -> Option<&CheckoutId> {
        self.attempt_key.as_ref()
    }

    /// Validate the form and, if valid, submit the order.
    ///
    /// On success the cart is cleared and closed. On failure the form
    /// values are preserved and a user-initiated retry is permitted;
    /// the retry reuses the same idempotency key so an ambiguous
    /// network outcome cannot create a duplicate order.
    pub async fn submit(
        &mut self,
        form: &mut CheckoutForm,
        registry: &GatewayRegistry,
        coupon: &CouponState,
        cart: &mut dyn CartController,
    ) -> Result<Order, CheckoutError> {
        if self.machine.state().is_in_flight() {
            return Err(CheckoutError::SubmissionInFlight);
        }
        self.machine.transition(SubmissionState::Validating)?;

        let ctx = ValidationContext {
            requires_card: registry.requires_card_details(),
        };
        let errors = form.validate(&ctx);
        if !errors.is_empty() {
            self.machine.transition(SubmissionState::Idle)?;
            return Err(CheckoutError::ValidationFailed(errors));
        }

        let Some(gateway) = registry.selected_gateway() else {
            self.machine.transition(SubmissionState::Idle)?;
            return Err(CheckoutError::NoPaymentMethod);
        };
        if cart.is_empty() {
            self.machine.transition(SubmissionState::Idle)?;
            return Err(CheckoutError::EmptyCart);
        }
        if coupon.is_stale(cart.revision()) {
            self.machine.transition(SubmissionState::Idle)?;
            return Err(CheckoutError::StaleCoupon);
        }

        self.machine.transition(SubmissionState::Submitting)?;

        match self.run_submission(form, gateway, coupon, cart).await {
            Ok(order) => {
                self.machine.transition(SubmissionState::Succeeded)?;
                self.last_error = None;
                self.attempt_key = None;
                cart.clear();
                cart.close();
                info!(order = %order.order_number, "order accepted");
                Ok(order)
            }
            Err(e) => {
                self.machine.transition(SubmissionState::Failed)?;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Return the machine to `Idle` after a terminal state, dropping
    /// the attempt key and last error. No-op while in flight.
    pub fn reset(&mut self) {
        match self.machine.state() {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                // Both terminal states may transition back to Idle.
                let _ = self.machine.transition(SubmissionState::Idle);
            }
            _ => {}
        }
        if !self.machine.state().is_in_flight() {
            self.attempt_key = None;
            self.last_error = None;
        }
    }

    async fn run_submission(
        &mut self,
        form: &CheckoutForm,
        gateway: &PaymentGateway,
        coupon: &CouponState,
        cart: &dyn CartController,
    ) -> Result<Order, CheckoutError> {
        let token = if gateway.gateway_type.requires_card_details() {
            Some(self.processor.tokenize(form.card_details()).await?)
        } else {
            None
        };

        let key = self
            .attempt_key
            .get_or_insert_with(CheckoutId::generate)
            .clone();
        let data = build_order_data(form, gateway, token, coupon.applied(cart.revision()), cart, key)?;

        Ok(self.api.create_order(data).await?)
    }
}

/// Assemble the order payload from validated inputs.
///
/// Pure with respect to its arguments; called exactly once per attempt,
/// after validation has passed.
fn build_order_data(
    form: &CheckoutForm,
    gateway: &PaymentGateway,
    payment_token: Option<PaymentToken>,
    coupon: Option<AppliedCoupon>,
    cart: &dyn CartController,
    idempotency_key: CheckoutId,
) -> Result<CreateOrderData, CheckoutError> {
    let currency = cart.currency();
    let subtotal = cart.subtotal()?;
    let discount_total = coupon
        .as_ref()
        .map(|c| c.amount)
        .unwrap_or_else(|| Money::zero(currency));
    let grand_total = subtotal
        .subtract_clamped(&discount_total)
        .ok_or_else(|| CommerceError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: discount_total.currency.code().to_string(),
        })?;

    let line_items: Vec<OrderLineItem> = cart
        .items()
        .iter()
        .map(OrderLineItem::from_cart_item)
        .collect();

    Ok(CreateOrderData {
        idempotency_key,
        email: form.get(Field::Email).to_string(),
        shipping: ShippingDetails {
            first_name: form.get(Field::FirstName).to_string(),
            last_name: form.get(Field::LastName).to_string(),
            address1: form.get(Field::Address1).to_string(),
            city: form.effective_city().to_string(),
            region_code: match form.get(Field::State) {
                "" => None,
                state => Some(state.to_string()),
            },
            country_code: form.get(Field::Country).to_string(),
            postal_code: form.get(Field::PostalCode).to_string(),
        },
        line_items,
        gateway_id: gateway.id.clone(),
        payment_token,
        coupon,
        subtotal,
        discount_total,
        grand_total,
        currency,
    })
}
