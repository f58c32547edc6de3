//! Cart line types
//!
//! Data carried by cart lines and the knobs that shape a line's unit
//! price before it enters the ledger. Monetary fields are `f64` at
//! this boundary; arithmetic happens in `rust_decimal` inside the
//! engine and rounding is applied only when an invoice is built.

use serde::{Deserialize, Serialize};

// ============================================================================
// Price Selection
// ============================================================================

/// Price tier selection strategy for a staged product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    /// Retail unless the customer class says wholesale
    #[default]
    Auto,
    Retail,
    Wholesale,
    Custom,
}

impl PriceMode {
    /// Ordered option list for Left/Right cycling (wraps around).
    pub const CYCLE: [PriceMode; 4] = [
        PriceMode::Auto,
        PriceMode::Retail,
        PriceMode::Wholesale,
        PriceMode::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Retail => "Retail",
            Self::Wholesale => "Wholesale",
            Self::Custom => "Custom",
        }
    }
}

/// Price selection for one staged line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceSelection {
    pub mode: PriceMode,
    /// Manual override value, only meaningful with `PriceMode::Custom`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_value: Option<f64>,
}

impl PriceSelection {
    pub fn custom(value: f64) -> Self {
        Self {
            mode: PriceMode::Custom,
            custom_value: Some(value),
        }
    }
}

// ============================================================================
// Item Discount
// ============================================================================

/// Per-item discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    #[default]
    None,
    Percentage,
    Fixed,
}

impl DiscountKind {
    /// Ordered option list for Left/Right cycling (wraps around).
    pub const CYCLE: [DiscountKind; 3] = [
        DiscountKind::None,
        DiscountKind::Percentage,
        DiscountKind::Fixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed",
        }
    }
}

/// Per-item discount, ignored entirely under a custom price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ItemDiscount {
    pub kind: DiscountKind,
    pub value: f64,
}

impl ItemDiscount {
    pub fn percentage(value: f64) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
        }
    }

    /// A non-positive value behaves as `DiscountKind::None`.
    pub fn is_effective(&self) -> bool {
        self.kind != DiscountKind::None && self.value > 0.0
    }
}

// ============================================================================
// Line Item
// ============================================================================

/// One cart line
///
/// Two lines never share both `catalog_ref` and `unit_price`; such
/// additions merge quantities. Distinct pricing contexts for the same
/// product stay separate so the invoice keeps one audit row per price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Line instance ID (uuid)
    pub id: String,
    /// Catalog reference; `None` for quick-add lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_ref: Option<String>,
    pub name: String,
    /// Positive integer, enforced by the ledger
    pub quantity: i32,
    /// Resolved unit price actually charged
    pub unit_price: f64,
    /// Pre-discount price of the selected tier
    pub original_price: f64,
    /// Unit price came from a manual override
    #[serde(default)]
    pub is_custom_price: bool,
    /// Line not backed by any catalog entry
    #[serde(default)]
    pub is_quick_add: bool,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

// ============================================================================
// Overall Adjustment & Totals
// ============================================================================

/// Invoice-level adjustment, applied once after per-item discounts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OverallAdjustment {
    pub discount_kind: DiscountKind,
    pub discount_value: f64,
    pub tax_enabled: bool,
    /// Tax rate in percent (e.g. 21 for 21% IVA)
    pub tax_rate: f64,
}

/// Computed cart totals, recomputed from scratch on every query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
}
