//! Payment Method

use serde::{Deserialize, Serialize};

/// Payment method for a finished invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Credit,
}

impl PaymentMethod {
    /// The two methods reachable by Left/Right cycling in payment mode.
    /// The full set stays reachable through the digit shortcuts.
    pub const CYCLE: [PaymentMethod; 2] = [PaymentMethod::Cash, PaymentMethod::Card];

    /// Direct digit selection (keys 1-4 on the review step).
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Cash),
            '2' => Some(Self::Card),
            '3' => Some(Self::Transfer),
            '4' => Some(Self::Credit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Transfer => "Transfer",
            Self::Credit => "Credit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(PaymentMethod::from_digit('1'), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::from_digit('4'), Some(PaymentMethod::Credit));
        assert_eq!(PaymentMethod::from_digit('5'), None);
        assert_eq!(PaymentMethod::from_digit('0'), None);
    }
}
