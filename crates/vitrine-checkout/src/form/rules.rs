//! Declarative validation rule set.
//!
//! Validation is an explicit rule table evaluated by a pure function:
//! each rule names a field, a predicate, and a message. No reflection,
//! no framework - the same table serves incremental (single-field) and
//! exhaustive (submit-time) validation.

use crate::form::fields::{CheckoutForm, Field, FieldErrors};

/// Context a rule may condition on.
///
/// Card-detail rules apply only while the selected gateway collects card
/// details.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext {
    /// Whether the selected payment gateway is of type `card`.
    pub requires_card: bool,
}

/// A single validation rule.
struct Rule {
    field: Field,
    message: &'static str,
    applies: fn(&ValidationContext) -> bool,
    check: fn(&CheckoutForm) -> bool,
}

fn always(_: &ValidationContext) -> bool {
    true
}

fn card_only(ctx: &ValidationContext) -> bool {
    ctx.requires_card
}

/// The full rule set, in field display order.
const RULES: &[Rule] = &[
    Rule {
        field: Field::Email,
        message: "Enter a valid email address",
        applies: always,
        check: |form| is_email(form.get(Field::Email)),
    },
    Rule {
        field: Field::FirstName,
        message: "First name must be at least 2 characters",
        applies: always,
        check: |form| has_min_len(form.get(Field::FirstName), 2),
    },
    Rule {
        field: Field::LastName,
        message: "Last name must be at least 2 characters",
        applies: always,
        check: |form| has_min_len(form.get(Field::LastName), 2),
    },
    Rule {
        field: Field::Address1,
        message: "Address must be at least 5 characters",
        applies: always,
        check: |form| has_min_len(form.get(Field::Address1), 5),
    },
    // Either a resolved city or the free-text fallback satisfies this;
    // the two are never both required.
    Rule {
        field: Field::City,
        message: "Select a city or enter one manually",
        applies: always,
        check: |form| !form.effective_city().trim().is_empty(),
    },
    Rule {
        field: Field::State,
        message: "Select a state",
        applies: always,
        check: |form| !form.get(Field::State).trim().is_empty(),
    },
    Rule {
        field: Field::PostalCode,
        message: "Enter a postal code",
        applies: always,
        check: |form| !form.get(Field::PostalCode).trim().is_empty(),
    },
    Rule {
        field: Field::Country,
        message: "Select a country",
        applies: always,
        check: |form| !form.get(Field::Country).trim().is_empty(),
    },
    Rule {
        field: Field::PaymentMethod,
        message: "Select a payment method",
        applies: always,
        check: |form| !form.get(Field::PaymentMethod).trim().is_empty(),
    },
    Rule {
        field: Field::CardNumber,
        message: "Enter a valid card number",
        applies: card_only,
        check: |form| is_card_number(form.get(Field::CardNumber)),
    },
    Rule {
        field: Field::ExpiryDate,
        message: "Enter expiry as MM/YY",
        applies: card_only,
        check: |form| is_expiry(form.get(Field::ExpiryDate)),
    },
    Rule {
        field: Field::Cvv,
        message: "Enter the 3-4 digit security code",
        applies: card_only,
        check: |form| is_cvv(form.get(Field::Cvv)),
    },
];

/// Evaluate the full rule set.
///
/// Pure: reads the form, returns a field-to-message map, empty when the
/// form is valid. The first failing rule per field wins.
pub fn validate(form: &CheckoutForm, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in RULES {
        if (rule.applies)(ctx) && !(rule.check)(form) {
            errors
                .entry(rule.field)
                .or_insert_with(|| rule.message.to_string());
        }
    }
    errors
}

/// Evaluate only the rules for one field.
pub fn validate_field(form: &CheckoutForm, field: Field, ctx: &ValidationContext) -> Option<String> {
    RULES
        .iter()
        .filter(|r| r.field == field)
        .find(|r| (r.applies)(ctx) && !(r.check)(form))
        .map(|r| r.message.to_string())
}

fn has_min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

fn is_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    // Domain needs a dot with something on both sides.
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

fn is_card_number(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();
    (13..=19).contains(&digits.len()) && luhn_checksum(&digits) == 0
}

/// Luhn mod-10 checksum over the full number (0 when valid).
fn luhn_checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum::<u32>()
        % 10
}

fn is_expiry(value: &str) -> bool {
    let Some((month, year)) = value.trim().split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let Ok(month) = month.parse::<u32>() else {
        return false;
    };
    (1..=12).contains(&month) && year.chars().all(|c| c.is_ascii_digit())
}

fn is_cvv(value: &str) -> bool {
    let value = value.trim();
    (3..=4).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}
