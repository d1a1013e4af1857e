//! Form state and declarative validation.

mod fields;
mod rules;

pub use fields::{CheckoutForm, Field, FieldErrors};
pub use rules::{ValidationContext, validate, validate_field};
