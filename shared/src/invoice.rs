//! Invoice aggregate
//!
//! Created once at checkout confirmation and immutable thereafter;
//! ownership passes to the persistence/printing collaborator.

use crate::cart::{CartTotals, LineItem, OverallAdjustment};
use crate::models::PaymentMethod;
use serde::{Deserialize, Serialize};

/// Invoice status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Full checkout (F12)
    #[default]
    Completed,
    /// Quick save, print preview skipped (F9)
    QuickSaved,
}

/// Customer identity recorded on the invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceCustomer {
    /// Customer reference; `None` for walk-in sales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,
    pub name: String,
}

impl InvoiceCustomer {
    pub fn known(customer_ref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            customer_ref: Some(customer_ref.into()),
            name: name.into(),
        }
    }

    /// Walk-in placeholder identity.
    pub fn walk_in() -> Self {
        Self {
            customer_ref: None,
            name: "Walk-in Customer".to_string(),
        }
    }

    pub fn is_walk_in(&self) -> bool {
        self.customer_ref.is_none()
    }
}

/// Finished invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    /// Invoice ID (uuid)
    pub invoice_id: String,
    pub customer: InvoiceCustomer,
    pub items: Vec<LineItem>,
    /// Adjustment the totals were computed under
    pub adjustment: OverallAdjustment,
    /// Totals rounded to 2 decimal places
    pub totals: CartTotals,
    pub payment_method: PaymentMethod,
    pub status: InvoiceStatus,
    /// Creation timestamp (milliseconds since epoch)
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_in_placeholder() {
        let c = InvoiceCustomer::walk_in();
        assert!(c.is_walk_in());
        assert_eq!(c.name, "Walk-in Customer");

        let k = InvoiceCustomer::known("cust-1", "Ana");
        assert!(!k.is_walk_in());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(InvoiceStatus::QuickSaved).unwrap();
        assert_eq!(json, serde_json::json!("QUICK_SAVED"));

        // Walk-in customers omit the reference entirely
        let json = serde_json::to_value(InvoiceCustomer::walk_in()).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Walk-in Customer" }));
    }
}
