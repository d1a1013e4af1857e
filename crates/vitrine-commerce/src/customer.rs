//! Customer profile types.

use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// A stored customer profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// Customer email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Default billing address, if any.
    pub default_address: Option<CustomerAddress>,
}

impl Customer {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A customer's stored billing address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerAddress {
    /// Street address.
    pub address1: String,
    /// City.
    pub city: String,
    /// State/province code (e.g., "IDF").
    pub region_code: Option<String>,
    /// Country code (e.g., "FR").
    pub country_code: String,
    /// Postal/ZIP code.
    pub postal_code: String,
}

impl CustomerAddress {
    /// Check if the address has enough data to pre-fill a checkout form.
    pub fn is_usable(&self) -> bool {
        !self.address1.is_empty() && !self.country_code.is_empty()
    }
}

/// A partial update to a stored customer profile.
///
/// `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CustomerPatch {
    /// New first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New default billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_address: Option<CustomerAddress>,
}

impl CustomerPatch {
    /// Check if the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.default_address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let customer = Customer {
            id: CustomerId::new("cust-1"),
            email: "amelie@example.com".to_string(),
            first_name: "Am\u{e9}lie".to_string(),
            last_name: "Laurent".to_string(),
            default_address: None,
        };
        assert_eq!(customer.full_name(), "Am\u{e9}lie Laurent");
    }

    #[test]
    fn test_empty_patch() {
        assert!(CustomerPatch::default().is_empty());

        let patch = CustomerPatch {
            first_name: Some("Jean".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
