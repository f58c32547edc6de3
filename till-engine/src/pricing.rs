//! Price resolver
//!
//! Computes a line's final unit price from the catalog entry, the
//! operator's price-mode selection, the customer class, and the
//! per-item discount. Resolution is pure: identical inputs always
//! yield identical prices.
//!
//! Uses rust_decimal for precision calculations. No rounding happens
//! here; currency rounding (2 decimal places) is applied only when an
//! invoice is built.

use rust_decimal::prelude::*;
use shared::cart::{DiscountKind, ItemDiscount, PriceMode, PriceSelection};
use shared::models::{CatalogEntry, CustomerClass};

/// Monetary values round to 2 decimal places, half away from zero
const DECIMAL_PLACES: u32 = 2;

/// Which base tier a resolution used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLabel {
    Retail,
    Wholesale,
    Custom,
}

impl PriceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Wholesale => "Wholesale",
            Self::Custom => "Custom",
        }
    }
}

/// Result of price resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceResolution {
    /// Final unit price after discount, full precision
    pub unit_price: f64,
    /// Pre-discount price of the selected tier
    pub original_price: f64,
    pub label: PriceLabel,
}

impl PriceResolution {
    pub fn is_custom(&self) -> bool {
        self.label == PriceLabel::Custom
    }
}

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 without rounding (intermediate values)
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Round a monetary value to 2 decimal places, half away from zero.
/// Applied at invoice-build time only.
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// 2-dp equality, the merge criterion for cart lines.
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    round_money(a) == round_money(b)
}

// ==================== Resolution ====================

/// Resolve the unit price for one staged line.
///
/// # Resolution Order
/// 1. `Custom` mode: unit price is the override value, discount ignored
/// 2. Base tier: retail, unless wholesale was selected explicitly or
///    `Auto` met a wholesale-class customer
/// 3. Discount: percentage clamps at zero, fixed floors at zero; a
///    non-positive discount value behaves as none
///
/// A missing or zero wholesale tier falls back to retail so a
/// misconfigured catalog entry never silently charges 0.
pub fn resolve_price(
    entry: &CatalogEntry,
    selection: &PriceSelection,
    customer_class: CustomerClass,
    discount: &ItemDiscount,
) -> PriceResolution {
    // Step 1: manual override wins outright
    if selection.mode == PriceMode::Custom {
        let value = selection.custom_value.unwrap_or(entry.retail_price);
        return PriceResolution {
            unit_price: value,
            original_price: value,
            label: PriceLabel::Custom,
        };
    }

    // Step 2: select the base tier
    let wants_wholesale = match selection.mode {
        PriceMode::Wholesale => true,
        PriceMode::Auto => customer_class == CustomerClass::Wholesale,
        _ => false,
    };

    let (base, label) = if wants_wholesale && entry.wholesale_price > 0.0 {
        (to_decimal(entry.wholesale_price), PriceLabel::Wholesale)
    } else {
        (to_decimal(entry.retail_price), PriceLabel::Retail)
    };

    // Step 3: apply the per-item discount
    let unit = if discount.is_effective() {
        let value = to_decimal(discount.value);
        match discount.kind {
            DiscountKind::Percentage => {
                (base * (Decimal::ONE - value / Decimal::ONE_HUNDRED)).max(Decimal::ZERO)
            }
            DiscountKind::Fixed => (base - value).max(Decimal::ZERO),
            DiscountKind::None => base,
        }
    } else {
        base
    };

    PriceResolution {
        unit_price: to_f64(unit),
        original_price: to_f64(base),
        label,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(retail: f64, wholesale: f64) -> CatalogEntry {
        CatalogEntry {
            id: "prod-1".to_string(),
            name: "Test Product".to_string(),
            sku: "SKU1".to_string(),
            barcode: None,
            category: None,
            stock: 100,
            reorder_level: 5,
            cost_price: retail / 2.0,
            wholesale_price: wholesale,
            retail_price: retail,
            is_active: true,
        }
    }

    #[test]
    fn test_auto_defaults_to_retail() {
        let entry = make_entry(12.5, 9.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::default(),
        );
        assert_eq!(r.unit_price, 12.5);
        assert_eq!(r.label, PriceLabel::Retail);
    }

    #[test]
    fn test_auto_with_wholesale_customer() {
        let entry = make_entry(12.5, 9.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Wholesale,
            &ItemDiscount::default(),
        );
        assert_eq!(r.unit_price, 9.0);
        assert_eq!(r.label, PriceLabel::Wholesale);
    }

    #[test]
    fn test_explicit_wholesale_for_retail_customer() {
        let entry = make_entry(12.5, 9.0);
        let selection = PriceSelection {
            mode: PriceMode::Wholesale,
            custom_value: None,
        };
        let r = resolve_price(
            &entry,
            &selection,
            CustomerClass::Retail,
            &ItemDiscount::default(),
        );
        assert_eq!(r.unit_price, 9.0);
    }

    #[test]
    fn test_missing_wholesale_falls_back_to_retail() {
        // Never silently charge 0 on a misconfigured entry
        let entry = make_entry(12.5, 0.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Wholesale,
            &ItemDiscount::default(),
        );
        assert_eq!(r.unit_price, 12.5);
        assert_eq!(r.label, PriceLabel::Retail);
    }

    #[test]
    fn test_custom_ignores_discount() {
        let entry = make_entry(12.5, 9.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::custom(7.77),
            CustomerClass::Retail,
            &ItemDiscount::percentage(50.0),
        );
        assert_eq!(r.unit_price, 7.77);
        assert_eq!(r.original_price, 7.77);
        assert_eq!(r.label, PriceLabel::Custom);
    }

    #[test]
    fn test_percentage_discount() {
        let entry = make_entry(100.0, 0.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::percentage(10.0),
        );
        assert_eq!(r.unit_price, 90.0);
        assert_eq!(r.original_price, 100.0);
    }

    #[test]
    fn test_percentage_discount_clamps_at_zero() {
        // 150% discount resolves to 0.00, never negative
        let entry = make_entry(100.0, 0.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::percentage(150.0),
        );
        assert_eq!(r.unit_price, 0.0);
    }

    #[test]
    fn test_fixed_discount_floors_at_zero() {
        let entry = make_entry(5.0, 0.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::fixed(8.0),
        );
        assert_eq!(r.unit_price, 0.0);

        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::fixed(1.5),
        );
        assert_eq!(r.unit_price, 3.5);
    }

    #[test]
    fn test_non_positive_discount_value_is_none() {
        let entry = make_entry(100.0, 0.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::percentage(0.0),
        );
        assert_eq!(r.unit_price, 100.0);

        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::fixed(-3.0),
        );
        assert_eq!(r.unit_price, 100.0);
    }

    #[test]
    fn test_resolution_is_pure() {
        let entry = make_entry(99.99, 80.0);
        let selection = PriceSelection::default();
        let discount = ItemDiscount::percentage(33.0);
        let a = resolve_price(&entry, &selection, CustomerClass::Wholesale, &discount);
        let b = resolve_price(&entry, &selection, CustomerClass::Wholesale, &discount);
        assert_eq!(a, b);
    }

    #[test]
    fn test_discount_on_wholesale_base() {
        let entry = make_entry(12.0, 10.0);
        let r = resolve_price(
            &entry,
            &PriceSelection::default(),
            CustomerClass::Wholesale,
            &ItemDiscount::percentage(25.0),
        );
        assert_eq!(r.unit_price, 7.5);
        assert_eq!(r.original_price, 10.0);
        assert_eq!(r.label, PriceLabel::Wholesale);
    }

    #[test]
    fn test_money_eq_rounds_to_cents() {
        assert!(money_eq(10.004, 10.0));
        assert!(!money_eq(10.01, 10.0));
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(10.004), 10.0);
    }
}
