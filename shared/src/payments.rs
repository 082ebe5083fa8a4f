//! Payment backend types and the in-session payment flow state.
//!
//! Three request/response endpoints (create-intent, confirm, cash). There
//! is no retry or idempotency-key scheme; a failed call surfaces an error
//! and leaves the flow in `Failed` until the user starts over.

use serde::{Deserialize, Serialize};

use crate::model::BookingId;
use crate::{AppError, ErrorKind, MAX_PRICE_MINOR, MIN_PRICE_MINOR};

pub const CREATE_INTENT_PATH: &str = "/v1/payments/create-intent";
pub const CONFIRM_PATH: &str = "/v1/payments/confirm";
pub const CASH_PATH: &str = "/v1/payments/cash";

/// Rejects out-of-range prices before any request is made.
pub fn validate_amount(amount_minor: u64) -> Result<u64, AppError> {
    if !(MIN_PRICE_MINOR..=MAX_PRICE_MINOR).contains(&amount_minor) {
        return Err(AppError::new(
            ErrorKind::Validation,
            format!(
                "Price must be between {} and {} (minor units), got {amount_minor}",
                MIN_PRICE_MINOR, MAX_PRICE_MINOR
            ),
        ));
    }
    Ok(amount_minor)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIntentRequest {
    pub booking_id: BookingId,
    pub amount_minor: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIntentResponse {
    pub intent_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub intent_id: String,
    pub booking_id: BookingId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPaymentResponse {
    pub status: String,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashPaymentRequest {
    pub booking_id: BookingId,
    pub amount_minor: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashPaymentResponse {
    pub recorded: bool,
}

/// Session-local payment progress. One payment at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentFlow {
    #[default]
    Idle,
    CreatingIntent {
        booking_id: BookingId,
        amount_minor: u64,
    },
    Confirming {
        booking_id: BookingId,
        intent_id: String,
    },
    RecordingCash {
        booking_id: BookingId,
    },
    Completed {
        booking_id: BookingId,
    },
    Failed {
        message: String,
    },
}

impl PaymentFlow {
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::CreatingIntent { .. } | Self::Confirming { .. } | Self::RecordingCash { .. }
        )
    }

    /// Short status string for the view layer.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CreatingIntent { .. } => "creating_intent",
            Self::Confirming { .. } => "confirming",
            Self::RecordingCash { .. } => "recording_cash",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_bounds_are_inclusive() {
        assert!(validate_amount(MIN_PRICE_MINOR).is_ok());
        assert!(validate_amount(MAX_PRICE_MINOR).is_ok());
        assert!(validate_amount(MIN_PRICE_MINOR - 1).is_err());
        assert!(validate_amount(MAX_PRICE_MINOR + 1).is_err());
        assert!(validate_amount(0).is_err());
    }

    #[test]
    fn amount_error_is_validation_kind() {
        let err = validate_amount(0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.user_facing_message().contains("Price"));
    }

    #[test]
    fn flow_in_flight_states() {
        assert!(!PaymentFlow::Idle.is_in_flight());
        assert!(PaymentFlow::CreatingIntent {
            booking_id: BookingId::new("b1"),
            amount_minor: 500,
        }
        .is_in_flight());
        assert!(PaymentFlow::Confirming {
            booking_id: BookingId::new("b1"),
            intent_id: "pi_1".into(),
        }
        .is_in_flight());
        assert!(!PaymentFlow::Completed {
            booking_id: BookingId::new("b1"),
        }
        .is_in_flight());
        assert!(!PaymentFlow::Failed {
            message: "declined".into(),
        }
        .is_in_flight());
    }

    #[test]
    fn request_bodies_serialize_with_expected_fields() {
        let req = CreateIntentRequest {
            booking_id: BookingId::new("b42"),
            amount_minor: 2500,
            currency: "usd".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["booking_id"], "b42");
        assert_eq!(json["amount_minor"], 2500);

        let resp: ConfirmPaymentResponse =
            serde_json::from_str(r#"{"status":"succeeded"}"#).unwrap();
        assert_eq!(resp.status, "succeeded");
        assert_eq!(resp.receipt_url, None);
    }
}
