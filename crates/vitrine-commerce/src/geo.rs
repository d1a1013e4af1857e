//! Geography lookup data.
//!
//! Countries, states/regions, and cities form a strict hierarchy: a region
//! is meaningful only within a country, a city only within a region.

use serde::{Deserialize, Serialize};

/// A country available for shipping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g., "FR").
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Country {
    /// Create a new country entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A state or province within a country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    /// Region code (e.g., "IDF"). Unique within its country only.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Region {
    /// Create a new region entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A city within a region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    /// Display name.
    pub name: String,
}

impl City {
    /// Create a new city entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
