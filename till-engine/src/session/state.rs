//! Session state types
//!
//! Everything key routing depends on lives in explicit fields here;
//! no state is inferred from the UI at dispatch time.

use serde::{Deserialize, Serialize};
use shared::cart::{ItemDiscount, PriceSelection};
use shared::error::CheckoutError;
use shared::invoice::Invoice;

/// Wizard step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Customer,
    #[default]
    Products,
    Review,
}

/// Interaction mode, at most one active per step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Search,
    Quantity,
    Cart,
    Payment,
    Discount,
    PriceMode,
    ItemDiscount,
}

/// Explicit focus target; arrow keys are interpreted against this,
/// never against an inspected UI element
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FocusTarget {
    #[default]
    SearchField,
    ProductList,
    CustomerList,
    CartList,
    PaymentPanel,
    None,
}

/// Scrollable panes the UI keeps in view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaneId {
    ProductList,
    CustomerList,
    CartList,
}

/// A catalog entry resolved from scanner/search input but not yet
/// committed, awaiting quantity confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingScan {
    pub entry_id: String,
    pub quantity: i32,
    pub selection: PriceSelection,
    pub discount: ItemDiscount,
}

impl PendingScan {
    pub fn new(entry_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            entry_id: entry_id.into(),
            quantity: quantity.max(1),
            selection: PriceSelection::default(),
            discount: ItemDiscount::default(),
        }
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
}

/// Operator-visible notification for the notification sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    /// Stable error code when the notification wraps a checkout error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: None,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: message.into(),
        }
    }

    pub fn from_error(err: &CheckoutError) -> Self {
        Self {
            severity: Severity::Warning,
            code: Some(err.code().to_string()),
            message: err.to_string(),
        }
    }
}

/// Side effects emitted by key dispatch, consumed by the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Surface a recoverable warning or confirmation
    Notify(Notification),
    /// Keep the highlighted row of a pane visible; does not feed back
    /// into engine state
    ScrollIntoView(PaneId),
    /// Retreat from the first step: leave the checkout surface
    ExitRequested,
    /// Checkout confirmed; ownership of the invoice passes to the
    /// persistence/printing collaborator
    CheckoutCompleted(Invoice),
}
