//! Checkout form fields and owned state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::rules::{self, ValidationContext};
use vitrine_commerce::gateway::CardDetails;

/// A checkout form field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    FirstName,
    LastName,
    Address1,
    City,
    /// Free-text fallback when the geography provider has no city data.
    CustomCity,
    State,
    PostalCode,
    Country,
    PaymentMethod,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Address1 => "address1",
            Field::City => "city",
            Field::CustomCity => "custom_city",
            Field::State => "state",
            Field::PostalCode => "postal_code",
            Field::Country => "country",
            Field::PaymentMethod => "payment_method",
            Field::CardNumber => "card_number",
            Field::ExpiryDate => "expiry_date",
            Field::Cvv => "cvv",
        }
    }

    /// All form fields, in display order.
    pub const ALL: [Field; 13] = [
        Field::Email,
        Field::FirstName,
        Field::LastName,
        Field::Address1,
        Field::City,
        Field::CustomCity,
        Field::State,
        Field::PostalCode,
        Field::Country,
        Field::PaymentMethod,
        Field::CardNumber,
        Field::ExpiryDate,
        Field::Cvv,
    ];

    /// The conditional card-detail fields.
    pub const CARD_FIELDS: [Field; 3] = [Field::CardNumber, Field::ExpiryDate, Field::Cvv];
}

/// Field-level validation errors, empty when the form is valid.
pub type FieldErrors = BTreeMap<Field, String>;

/// Owned checkout form state.
///
/// The single owner of field values and field-level errors; mutated only
/// through `set_field` and `reset`. Validation is incremental on field
/// change and exhaustive on submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    values: BTreeMap<Field, String>,
    errors: FieldErrors,
}

impl CheckoutForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's current value ("" when unset).
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Set a field value and clear any stale error on that field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    /// Set a field value only if it is currently empty (profile prefill).
    pub fn prefill_field(&mut self, field: Field, value: impl Into<String>) {
        if self.get(field).is_empty() {
            let value = value.into();
            if !value.is_empty() {
                self.values.insert(field, value);
            }
        }
    }

    /// Re-check a single field and record its error, if any.
    ///
    /// Returns the error message when the field is invalid.
    pub fn validate_field(&mut self, field: Field, ctx: &ValidationContext) -> Option<String> {
        match rules::validate_field(self, field, ctx) {
            Some(message) => {
                self.errors.insert(field, message.clone());
                Some(message)
            }
            None => {
                self.errors.remove(&field);
                None
            }
        }
    }

    /// Run the full rule set and record every field error.
    ///
    /// Submission is blocked while the returned map is non-empty.
    pub fn validate(&mut self, ctx: &ValidationContext) -> FieldErrors {
        let errors = rules::validate(self, ctx);
        self.errors = errors.clone();
        errors
    }

    /// Current field-level errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Check if any field-level error is recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drop errors recorded on the card-detail fields.
    ///
    /// Used when the selected gateway stops requiring card details.
    pub fn clear_card_errors(&mut self) {
        for field in Field::CARD_FIELDS {
            self.errors.remove(&field);
        }
    }

    /// The city that will ship: the resolved geography city, or the
    /// free-text fallback when no city was resolved.
    pub fn effective_city(&self) -> &str {
        let city = self.get(Field::City);
        if !city.is_empty() {
            city
        } else {
            self.get(Field::CustomCity)
        }
    }

    /// Assemble the transient card details from the card fields.
    pub fn card_details(&self) -> CardDetails {
        CardDetails::new(
            self.get(Field::CardNumber),
            self.get(Field::ExpiryDate),
            self.get(Field::Cvv),
        )
    }

    /// Clear all values and errors.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut form = CheckoutForm::new();
        assert_eq!(form.get(Field::Email), "");

        form.set_field(Field::Email, "amelie@example.com");
        assert_eq!(form.get(Field::Email), "amelie@example.com");
    }

    #[test]
    fn test_prefill_does_not_overwrite() {
        let mut form = CheckoutForm::new();
        form.set_field(Field::FirstName, "Jean");
        form.prefill_field(Field::FirstName, "Am\u{e9}lie");
        form.prefill_field(Field::LastName, "Laurent");

        assert_eq!(form.get(Field::FirstName), "Jean");
        assert_eq!(form.get(Field::LastName), "Laurent");
    }

    #[test]
    fn test_set_field_clears_error() {
        let mut form = CheckoutForm::new();
        let ctx = ValidationContext::default();

        form.validate_field(Field::Email, &ctx);
        assert!(form.has_errors());

        form.set_field(Field::Email, "amelie@example.com");
        assert!(!form.has_errors());
    }

    #[test]
    fn test_effective_city_prefers_resolved() {
        let mut form = CheckoutForm::new();
        form.set_field(Field::CustomCity, "Saint-Quay-Portrieux");
        assert_eq!(form.effective_city(), "Saint-Quay-Portrieux");

        form.set_field(Field::City, "Paris");
        assert_eq!(form.effective_city(), "Paris");
    }

    #[test]
    fn test_reset() {
        let mut form = CheckoutForm::new();
        form.set_field(Field::Email, "amelie@example.com");
        form.validate_field(Field::LastName, &ValidationContext::default());

        form.reset();
        assert_eq!(form.get(Field::Email), "");
        assert!(!form.has_errors());
    }
}
