//! Strongly-typed identifier value objects.
//!
//! Every identifier that can travel inside a payment label is a string
//! newtype that refuses the label delimiter, so a formatted label always
//! splits back into exactly the identifiers it was built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Delimiter reserved by the payment label wire format.
pub const LABEL_DELIMITER: char = ':';

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting empty values and the label delimiter.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                if id.contains(LABEL_DELIMITER) {
                    return Err(ValidationError::invalid_format(
                        $field,
                        format!("must not contain '{}'", LABEL_DELIMITER),
                    ));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier of a tenant ("application") that owns products and a callback secret.
    TenantId,
    "tenant_id"
);

string_id!(
    /// Identifier of a product sold by a tenant.
    ProductId,
    "product_id"
);

string_id!(
    /// Identifier of a payment record.
    PaymentId,
    "payment_id"
);

string_id!(
    /// Identifier of a user account.
    UserId,
    "user_id"
);

/// Unchecked constructor for identifiers that are parsed out of a label.
macro_rules! label_component {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Wraps a label component that is already delimiter-free.
                pub(crate) fn from_label_component(component: &str) -> Self {
                    debug_assert!(!component.contains(LABEL_DELIMITER));
                    Self(component.to_string())
                }
            }
        )+
    };
}

label_component!(TenantId, ProductId, PaymentId);

fn generated_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl PaymentId {
    /// Mints a fresh payment id (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(generated_id())
    }
}

impl UserId {
    /// Mints a fresh user id (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(generated_id())
    }
}
