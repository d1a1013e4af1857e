//! Customer profile pre-fill and best-effort write-back.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::form::{CheckoutForm, Field};
use vitrine_commerce::customer::{CustomerAddress, CustomerPatch};
use vitrine_commerce::ids::CustomerId;
use vitrine_data::CommerceApi;

/// Fetches the buyer's stored profile on checkout entry and writes
/// updated address data back on submit.
///
/// Both directions are best-effort: failures are logged and swallowed,
/// and never block the checkout flow. Anonymous checkouts (no customer
/// id) skip both.
pub struct ProfileSync<A> {
    api: Arc<A>,
    customer_id: Option<CustomerId>,
}

impl<A: CommerceApi> ProfileSync<A> {
    /// Create a profile sync for an optional signed-in customer.
    pub fn new(api: Arc<A>, customer_id: Option<CustomerId>) -> Self {
        Self { api, customer_id }
    }

    /// The signed-in customer, if any.
    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    /// Pre-fill empty form fields from the stored profile.
    pub async fn prefill(&self, form: &mut CheckoutForm) {
        let Some(id) = &self.customer_id else {
            debug!("anonymous checkout, skipping profile prefill");
            return;
        };

        let customer = match self.api.customer(id).await {
            Ok(customer) => customer,
            Err(e) => {
                warn!(customer = %id, error = %e, "profile fetch failed, starting from a blank form");
                return;
            }
        };

        form.prefill_field(Field::Email, customer.email);
        form.prefill_field(Field::FirstName, customer.first_name);
        form.prefill_field(Field::LastName, customer.last_name);

        if let Some(address) = customer.default_address {
            if address.is_usable() {
                form.prefill_field(Field::Address1, address.address1);
                form.prefill_field(Field::City, address.city);
                if let Some(region) = address.region_code {
                    form.prefill_field(Field::State, region);
                }
                form.prefill_field(Field::Country, address.country_code);
                form.prefill_field(Field::PostalCode, address.postal_code);
            }
        }
    }

    /// Write updated address data back to the profile.
    ///
    /// Single attempt; failure is logged and swallowed so it cannot
    /// block order submission.
    pub async fn persist(&self, form: &CheckoutForm) {
        let Some(id) = &self.customer_id else {
            return;
        };

        let patch = CustomerPatch {
            first_name: Some(form.get(Field::FirstName).to_string()),
            last_name: Some(form.get(Field::LastName).to_string()),
            default_address: Some(CustomerAddress {
                address1: form.get(Field::Address1).to_string(),
                city: form.effective_city().to_string(),
                region_code: match form.get(Field::State) {
                    "" => None,
                    state => Some(state.to_string()),
                },
                country_code: form.get(Field::Country).to_string(),
                postal_code: form.get(Field::PostalCode).to_string(),
            }),
        };

        if let Err(e) = self.api.update_customer(id, patch).await {
            warn!(customer = %id, error = %e, "profile write-back failed, continuing");
        }
    }
}
