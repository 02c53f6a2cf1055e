//! Provider callback notification.
//!
//! The provider posts one notification per incoming transfer. Only the fields
//! below take part in authentication; `bill_id` and `operation_label` are
//! accepted on the wire but carry nothing we act on.

/// Separator between canonical message fields.
pub const CANONICAL_SEPARATOR: &str = "&";

/// Callback from the payment provider, not yet authenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackNotification {
    pub notification_type: String,
    pub operation_id: String,
    /// Amount as the provider sent it. Formatted with `{:.2}` for the digest,
    /// never rounded to minor units first.
    pub amount: f64,
    pub currency: u32,
    /// Provider timestamp, kept exactly as received.
    pub datetime: String,
    pub sender: String,
    pub codepro: bool,
    /// Label exactly as received.
    pub label: String,
    /// Provider-supplied hex digest.
    pub sha1_hash: String,
}

impl CallbackNotification {
    /// Builds the message the provider hashes, with `secret` spliced in
    /// before the label:
    ///
    /// `notification_type&operation_id&amount&currency&datetime&sender&codepro&secret&label`
    pub fn canonical_message(&self, secret: &str) -> String {
        let amount = format!("{:.2}", self.amount);
        let currency = self.currency.to_string();
        let codepro = if self.codepro { "true" } else { "false" };

        let fields: [&str; 9] = [
            &self.notification_type,
            &self.operation_id,
            &amount,
            &currency,
            &self.datetime,
            &self.sender,
            codepro,
            secret,
            &self.label,
        ];
        fields.join(CANONICAL_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> CallbackNotification {
        CallbackNotification {
            notification_type: "p2p-incoming".to_string(),
            operation_id: "test-notification".to_string(),
            amount: 130.43,
            currency: 643,
            datetime: "2024-09-08T11:58:25Z".to_string(),
            sender: "41001000040".to_string(),
            codepro: false,
            label: "pay1:P1:T1".to_string(),
            sha1_hash: String::new(),
        }
    }

    #[test]
    fn canonical_message_uses_fixed_field_order() {
        assert_eq!(
            notification().canonical_message("s3cret"),
            "p2p-incoming&test-notification&130.43&643&2024-09-08T11:58:25Z&41001000040&false&s3cret&pay1:P1:T1"
        );
    }

    #[test]
    fn canonical_message_pads_amount_and_prints_codepro() {
        let mut n = notification();
        n.amount = 5.0;
        n.codepro = true;

        let message = n.canonical_message("k");
        assert!(message.contains("&5.00&"));
        assert!(message.contains("&true&k&"));
    }

    #[test]
    fn canonical_amount_rounds_the_binary_value() {
        let mut n = notification();

        // 2.675 is stored as 2.67499999..., so printf-style formatting gives 2.67.
        n.amount = 2.675;
        assert!(n.canonical_message("k").contains("&2.67&"));

        n.amount = 1e20;
        assert!(n
            .canonical_message("k")
            .contains("&100000000000000000000.00&"));
    }
}
