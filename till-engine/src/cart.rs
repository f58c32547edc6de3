//! Cart ledger
//!
//! Owns the ordered line-item collection. Additions are stock-aware:
//! the requested quantity is validated against the entry's stock net
//! of what the cart already reserves. Lines with the same catalog
//! reference and the same unit price merge; different prices stay as
//! separate audit rows. Totals are recomputed from scratch on every
//! query, never cached.

use crate::pricing::{PriceResolution, money_eq, to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::cart::{CartTotals, DiscountKind, LineItem, OverallAdjustment};
use shared::error::{CheckoutError, CheckoutResult};
use shared::models::CatalogEntry;

/// Ordered cart line collection
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<LineItem>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Queries ====================

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, item_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.id == item_id)
    }

    /// ID of the most recently appended line.
    pub fn last_line_id(&self) -> Option<&str> {
        self.lines.last().map(|l| l.id.as_str())
    }

    /// Quantity the cart already holds for a catalog entry, optionally
    /// excluding one line (used when revalidating that line itself).
    fn reserved_quantity(&self, catalog_ref: &str, exclude: Option<&str>) -> i32 {
        self.lines
            .iter()
            .filter(|l| l.catalog_ref.as_deref() == Some(catalog_ref))
            .filter(|l| exclude != Some(l.id.as_str()))
            .map(|l| l.quantity)
            .sum()
    }

    // ==================== Mutations ====================

    /// Add a catalog-backed line at an already-resolved price.
    ///
    /// Fails with `InsufficientStock` if `quantity` exceeds the entry's
    /// stock net of existing cart reservation; the cart is unchanged on
    /// failure. Merges into an existing line with the same catalog ref
    /// and the same unit price, otherwise appends.
    pub fn add_item(
        &mut self,
        entry: &CatalogEntry,
        quantity: i32,
        resolution: &PriceResolution,
    ) -> CheckoutResult<String> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }

        let reserved = self.reserved_quantity(&entry.id, None);
        let available = entry.stock - reserved;
        if quantity > available {
            return Err(CheckoutError::InsufficientStock {
                name: entry.name.clone(),
                requested: quantity,
                available: available.max(0),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| {
            l.catalog_ref.as_deref() == Some(entry.id.as_str())
                && money_eq(l.unit_price, resolution.unit_price)
        }) {
            line.quantity += quantity;
            tracing::debug!(line_id = %line.id, quantity = line.quantity, "merged cart line");
            return Ok(line.id.clone());
        }

        let line = LineItem {
            id: uuid::Uuid::new_v4().to_string(),
            catalog_ref: Some(entry.id.clone()),
            name: entry.name.clone(),
            quantity,
            unit_price: resolution.unit_price,
            original_price: resolution.original_price,
            is_custom_price: resolution.is_custom(),
            is_quick_add: false,
        };
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Add a line not backed by any catalog entry.
    ///
    /// Bypasses catalog and stock checks entirely; merges on the same
    /// (name, price) the way catalog lines merge on (ref, price).
    pub fn add_quick_item(
        &mut self,
        name: &str,
        price: f64,
        quantity: i32,
    ) -> CheckoutResult<String> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.is_quick_add && l.name == name && money_eq(l.unit_price, price))
        {
            line.quantity += quantity;
            return Ok(line.id.clone());
        }

        let line = LineItem {
            id: uuid::Uuid::new_v4().to_string(),
            catalog_ref: None,
            name: name.to_string(),
            quantity,
            unit_price: price,
            original_price: price,
            is_custom_price: false,
            is_quick_add: true,
        };
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Set a line's quantity.
    ///
    /// A non-positive `new_qty` is a no-op: removal is a separate,
    /// explicit operation, never decrement-to-zero. Catalog-backed
    /// lines revalidate stock against the supplying entry.
    pub fn set_quantity(
        &mut self,
        item_id: &str,
        new_qty: i32,
        entry: Option<&CatalogEntry>,
    ) -> CheckoutResult<()> {
        if new_qty <= 0 {
            return Ok(());
        }

        let Some(idx) = self.lines.iter().position(|l| l.id == item_id) else {
            return Ok(());
        };

        if let Some(entry) = entry {
            if self.lines[idx].catalog_ref.as_deref() == Some(entry.id.as_str()) {
                let reserved = self.reserved_quantity(&entry.id, Some(item_id));
                let available = entry.stock - reserved;
                if new_qty > available {
                    return Err(CheckoutError::InsufficientStock {
                        name: entry.name.clone(),
                        requested: new_qty,
                        available: available.max(0),
                    });
                }
            }
        }

        self.lines[idx].quantity = new_qty;
        Ok(())
    }

    /// Remove a line, returning it if present.
    pub fn remove_item(&mut self, item_id: &str) -> Option<LineItem> {
        let idx = self.lines.iter().position(|l| l.id == item_id)?;
        Some(self.lines.remove(idx))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // ==================== Totals ====================

    /// Compute totals under an overall adjustment.
    ///
    /// subtotal = sum of line totals; the overall discount applies once
    /// after per-item discounts; tax applies to the discounted base.
    /// Full-precision arithmetic, no caching.
    pub fn totals(&self, adjustment: &OverallAdjustment) -> CartTotals {
        let subtotal: Decimal = self
            .lines
            .iter()
            .map(|l| to_decimal(l.unit_price) * Decimal::from(l.quantity))
            .sum();

        let discount = if adjustment.discount_value > 0.0 {
            let value = to_decimal(adjustment.discount_value);
            match adjustment.discount_kind {
                DiscountKind::Percentage => subtotal * value / Decimal::ONE_HUNDRED,
                DiscountKind::Fixed => value.min(subtotal),
                DiscountKind::None => Decimal::ZERO,
            }
        } else {
            Decimal::ZERO
        };

        let taxed_base = (subtotal - discount).max(Decimal::ZERO);
        let tax = if adjustment.tax_enabled && adjustment.tax_rate > 0.0 {
            taxed_base * to_decimal(adjustment.tax_rate) / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        CartTotals {
            subtotal: to_f64(subtotal),
            discount_amount: to_f64(discount),
            tax_amount: to_f64(tax),
            total: to_f64((taxed_base + tax).max(Decimal::ZERO)),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PriceLabel, resolve_price};
    use shared::cart::{ItemDiscount, PriceSelection};
    use shared::models::CustomerClass;

    fn make_entry(id: &str, stock: i32, retail: f64) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: format!("Product {id}"),
            sku: format!("SKU-{id}"),
            barcode: None,
            category: None,
            stock,
            reorder_level: 0,
            cost_price: retail / 2.0,
            wholesale_price: 0.0,
            retail_price: retail,
            is_active: true,
        }
    }

    fn retail_resolution(entry: &CatalogEntry) -> PriceResolution {
        resolve_price(
            entry,
            &PriceSelection::default(),
            CustomerClass::Retail,
            &ItemDiscount::default(),
        )
    }

    fn assert_subtotal_invariant(cart: &CartLedger) {
        let expected: f64 = cart.lines().iter().map(|l| l.line_total()).sum();
        let totals = cart.totals(&OverallAdjustment::default());
        assert!((totals.subtotal - expected).abs() < 1e-9);
    }

    #[test]
    fn test_add_and_merge_same_price() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 10, 4.0);
        let res = retail_resolution(&entry);

        let id1 = cart.add_item(&entry, 2, &res).unwrap();
        let id2 = cart.add_item(&entry, 3, &res).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_subtotal_invariant(&cart);
    }

    #[test]
    fn test_different_price_creates_second_line() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 10, 4.0);

        cart.add_item(&entry, 2, &retail_resolution(&entry)).unwrap();
        let custom = PriceResolution {
            unit_price: 3.5,
            original_price: 3.5,
            label: PriceLabel::Custom,
        };
        cart.add_item(&entry, 1, &custom).unwrap();

        assert_eq!(cart.len(), 2);
        assert!(cart.lines()[1].is_custom_price);
        assert_subtotal_invariant(&cart);
    }

    #[test]
    fn test_insufficient_stock_leaves_cart_unchanged() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 3, 4.0);
        let res = retail_resolution(&entry);

        let err = cart.add_item(&entry, 5, &res).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InsufficientStock {
                name: entry.name.clone(),
                requested: 5,
                available: 3,
            }
        );
        assert!(cart.is_empty());
        assert_eq!(cart.totals(&OverallAdjustment::default()).subtotal, 0.0);
    }

    #[test]
    fn test_stock_net_of_existing_reservation() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 5, 4.0);
        let res = retail_resolution(&entry);

        cart.add_item(&entry, 3, &res).unwrap();
        let err = cart.add_item(&entry, 3, &res).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock { available: 2, .. }
        ));
        // Reservation counts across distinct price lines too
        let custom = PriceResolution {
            unit_price: 1.0,
            original_price: 1.0,
            label: PriceLabel::Custom,
        };
        cart.add_item(&entry, 2, &custom).unwrap();
        assert!(cart.add_item(&entry, 1, &res).is_err());
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 10, 4.0);
        let res = retail_resolution(&entry);

        assert_eq!(
            cart.add_item(&entry, 0, &res),
            Err(CheckoutError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_item(&entry, -2, &res),
            Err(CheckoutError::InvalidQuantity(-2))
        );
        assert_eq!(
            cart.add_quick_item("Bag", 0.1, 0),
            Err(CheckoutError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_quick_item_bypasses_stock() {
        let mut cart = CartLedger::new();
        let id1 = cart.add_quick_item("Delivery fee", 2.5, 1).unwrap();
        let id2 = cart.add_quick_item("Delivery fee", 2.5, 2).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert!(cart.lines()[0].is_quick_add);
        assert!(cart.lines()[0].catalog_ref.is_none());
        assert_subtotal_invariant(&cart);
    }

    #[test]
    fn test_set_quantity_zero_is_noop() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 10, 4.0);
        let id = cart.add_item(&entry, 2, &retail_resolution(&entry)).unwrap();

        cart.set_quantity(&id, 0, Some(&entry)).unwrap();
        cart.set_quantity(&id, -1, Some(&entry)).unwrap();
        assert_eq!(cart.line(&id).unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_revalidates_stock() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 5, 4.0);
        let id = cart.add_item(&entry, 2, &retail_resolution(&entry)).unwrap();

        cart.set_quantity(&id, 5, Some(&entry)).unwrap();
        assert_eq!(cart.line(&id).unwrap().quantity, 5);

        let err = cart.set_quantity(&id, 6, Some(&entry)).unwrap_err();
        assert!(matches!(err, CheckoutError::InsufficientStock { .. }));
        assert_eq!(cart.line(&id).unwrap().quantity, 5);
        assert_subtotal_invariant(&cart);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 10, 4.0);
        let id = cart.add_item(&entry, 2, &retail_resolution(&entry)).unwrap();

        let removed = cart.remove_item(&id).unwrap();
        assert_eq!(removed.quantity, 2);
        assert!(cart.is_empty());
        assert!(cart.remove_item(&id).is_none());
    }

    #[test]
    fn test_subtotal_invariant_across_sequence() {
        let mut cart = CartLedger::new();
        let a = make_entry("a", 50, 3.3);
        let b = make_entry("b", 50, 7.25);

        cart.add_item(&a, 4, &retail_resolution(&a)).unwrap();
        assert_subtotal_invariant(&cart);
        cart.add_item(&b, 2, &retail_resolution(&b)).unwrap();
        assert_subtotal_invariant(&cart);
        let id = cart.lines()[0].id.clone();
        cart.set_quantity(&id, 7, Some(&a)).unwrap();
        assert_subtotal_invariant(&cart);
        cart.remove_item(&id);
        assert_subtotal_invariant(&cart);
        cart.add_quick_item("Misc", 0.99, 3).unwrap();
        assert_subtotal_invariant(&cart);
    }

    #[test]
    fn test_totals_with_adjustment() {
        let mut cart = CartLedger::new();
        let entry = make_entry("p1", 100, 10.0);
        cart.add_item(&entry, 10, &retail_resolution(&entry)).unwrap();

        // 10% off 100.00 = 90.00, 21% tax on 90.00 = 18.90
        let adjustment = OverallAdjustment {
            discount_kind: DiscountKind::Percentage,
            discount_value: 10.0,
            tax_enabled: true,
            tax_rate: 21.0,
        };
        let totals = cart.totals(&adjustment);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.discount_amount, 10.0);
        assert_eq!(totals.tax_amount, 18.9);
        assert_eq!(totals.total, 108.9);
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let mut cart = CartLedger::new();
        cart.add_quick_item("Small", 5.0, 1).unwrap();

        let adjustment = OverallAdjustment {
            discount_kind: DiscountKind::Fixed,
            discount_value: 50.0,
            tax_enabled: false,
            tax_rate: 0.0,
        };
        let totals = cart.totals(&adjustment);
        assert_eq!(totals.discount_amount, 5.0);
        assert_eq!(totals.total, 0.0);
    }
}
