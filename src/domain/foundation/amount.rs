//! Amount value object for currency values.
//!
//! Money is held in minor units (kopecks/cents) so product and payment
//! snapshots never drift. Rendering always uses exactly two decimals.
//! Provider callback amounts are not converted to this type; the digest is
//! built from the float the provider sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Non-negative currency amount in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from minor units.
    pub fn from_minor_units(minor: i64) -> Result<Self, ValidationError> {
        if minor < 0 {
            return Err(ValidationError::invalid_format("amount", "must not be negative"));
        }
        Ok(Self(minor))
    }

    /// Creates an amount from a decimal value, rounding to the nearest minor unit.
    pub fn from_decimal(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("amount", "must be a finite number"));
        }
        Self::from_minor_units((value * 100.0).round() as i64)
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal value in major units.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("amount", format!("'{}' is not a number", s)))?;
        Self::from_decimal(value)
    }
}
