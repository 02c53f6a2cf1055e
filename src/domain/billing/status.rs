//! Payment status state machine.
//!
//! `created -> paid -> confirm`, with `created -> confirm` tolerated because a
//! provider callback can arrive before the buyer's browser returns.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payment.
///
/// Wire names are `created`, `paid` and `confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment record exists, buyer has not come back from the provider yet.
    Created,

    /// Buyer's browser returned through the provider success redirect.
    Paid,

    /// Provider callback was authenticated. Terminal.
    Confirm,
}

impl PaymentStatus {
    /// Returns the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Confirm => "confirm",
        }
    }

    /// Status after a success redirect, or `None` when the redirect changes nothing.
    pub fn after_success_redirect(&self) -> Option<PaymentStatus> {
        match self {
            PaymentStatus::Created => Some(PaymentStatus::Paid),
            PaymentStatus::Paid | PaymentStatus::Confirm => None,
        }
    }

    /// Status after an authenticated callback, or `None` when already confirmed.
    pub fn after_authentic_callback(&self) -> Option<PaymentStatus> {
        match self {
            PaymentStatus::Created | PaymentStatus::Paid => Some(PaymentStatus::Confirm),
            PaymentStatus::Confirm => None,
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Created, Paid) | (Created, Confirm) | (Paid, Confirm)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Created => vec![Paid, Confirm],
            Paid => vec![Confirm],
            Confirm => vec![],
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(PaymentStatus::Created),
            "paid" => Ok(PaymentStatus::Paid),
            "confirm" => Ok(PaymentStatus::Confirm),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Created,
        PaymentStatus::Paid,
        PaymentStatus::Confirm,
    ];

    fn rank(status: PaymentStatus) -> u8 {
        match status {
            PaymentStatus::Created => 0,
            PaymentStatus::Paid => 1,
            PaymentStatus::Confirm => 2,
        }
    }

    #[test]
    fn success_redirect_only_moves_created() {
        assert_eq!(
            PaymentStatus::Created.after_success_redirect(),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(PaymentStatus::Paid.after_success_redirect(), None);
        assert_eq!(PaymentStatus::Confirm.after_success_redirect(), None);
    }

    #[test]
    fn authentic_callback_confirms_any_unconfirmed_status() {
        assert_eq!(
            PaymentStatus::Created.after_authentic_callback(),
            Some(PaymentStatus::Confirm)
        );
        assert_eq!(
            PaymentStatus::Paid.after_authentic_callback(),
            Some(PaymentStatus::Confirm)
        );
        assert_eq!(PaymentStatus::Confirm.after_authentic_callback(), None);
    }

    #[test]
    fn confirm_is_terminal() {
        assert!(PaymentStatus::Confirm.is_terminal());
        assert!(!PaymentStatus::Created.is_terminal());
        assert!(!PaymentStatus::Paid.is_terminal());
    }

    #[test]
    fn no_transition_moves_backward() {
        for from in ALL {
            for to in from.valid_transitions() {
                assert!(rank(to) > rank(from), "{:?} -> {:?} regresses", from, to);
            }
        }
    }

    #[test]
    fn lifecycle_rules_agree_with_state_machine() {
        for status in ALL {
            if let Some(next) = status.after_success_redirect() {
                assert!(status.can_transition_to(&next));
            }
            if let Some(next) = status.after_authentic_callback() {
                assert!(status.can_transition_to(&next));
            }
        }
    }

    #[test]
    fn paid_cannot_return_to_created() {
        assert!(PaymentStatus::Paid.transition_to(PaymentStatus::Created).is_err());
        assert!(PaymentStatus::Confirm.transition_to(PaymentStatus::Paid).is_err());
    }

    #[test]
    fn wire_names_roundtrip() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Confirm).unwrap(),
            "\"confirm\""
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
