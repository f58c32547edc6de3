//! Unified error type for the checkout engine
//!
//! Every variant is recoverable: the engine never enters an
//! unrecoverable state from operator input alone. `code()` yields a
//! stable identifier for the notification sink so the UI layer can
//! localize without parsing display strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Checkout errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// Requested quantity exceeds available stock net of cart reservation
    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: i32,
        available: i32,
    },

    /// Non-positive or non-numeric quantity
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    /// Finalize attempted with zero lines
    #[error("Cannot checkout an empty cart")]
    EmptyCartOnCheckout,

    /// Advance past the customer step without a selection or walk-in flag
    #[error("No customer selected")]
    NoCustomerSelected,
}

impl CheckoutError {
    /// Stable error code for the notification sink.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::EmptyCartOnCheckout => "EMPTY_CART_ON_CHECKOUT",
            Self::NoCustomerSelected => "NO_CUSTOMER_SELECTED",
        }
    }
}

/// Serializable error payload for the notification sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutErrorPayload {
    pub code: String,
    pub message: String,
}

impl From<&CheckoutError> for CheckoutErrorPayload {
    fn from(err: &CheckoutError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = CheckoutError::InsufficientStock {
            name: "Beans".to_string(),
            requested: 5,
            available: 3,
        };
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
        assert_eq!(CheckoutError::EmptyCartOnCheckout.code(), "EMPTY_CART_ON_CHECKOUT");
    }

    #[test]
    fn test_payload_carries_display_message() {
        let err = CheckoutError::InvalidQuantity(-2);
        let payload = CheckoutErrorPayload::from(&err);
        assert_eq!(payload.code, "INVALID_QUANTITY");
        assert!(payload.message.contains("-2"));
    }
}
