//! Price-mode and item-discount cycling
//!
//! Both modes edit the staged product and cycle an ordered option
//! list with wraparound (unlike the clamped search highlight). They
//! are reachable only while a product is staged.

use super::CheckoutSession;
use super::dispatch::Key;
use super::state::{Mode, SessionEffect};
use shared::cart::{DiscountKind, PriceMode, PriceSelection};

impl CheckoutSession {
    pub(super) fn handle_cycle_key(&mut self, key: Key) -> Vec<SessionEffect> {
        if self.pending_scan.is_none() {
            self.enter_mode(Mode::Search);
            return Vec::new();
        }

        let step: i32 = match key {
            Key::Left => -1,
            Key::Right => 1,
            // Enter returns to the staging hub
            Key::Enter => {
                self.enter_mode(Mode::Quantity);
                return Vec::new();
            }
            _ => return Vec::new(),
        };

        match self.mode {
            Mode::PriceMode => self.cycle_price_mode(step),
            Mode::ItemDiscount => self.cycle_item_discount(step),
            _ => {}
        }
        Vec::new()
    }

    fn cycle_price_mode(&mut self, step: i32) {
        let Some(pending) = self.pending_scan.as_ref() else {
            return;
        };
        let cycle = PriceMode::CYCLE;
        let idx = cycle
            .iter()
            .position(|m| *m == pending.selection.mode)
            .unwrap_or(0) as i32;
        let next = cycle[(idx + step).rem_euclid(cycle.len() as i32) as usize];
        let entry_id = pending.entry_id.clone();
        let needs_seed = next == PriceMode::Custom && pending.selection.custom_value.is_none();

        // A fresh custom selection starts from the retail tier
        let seed = if needs_seed {
            self.catalog_entry(&entry_id).map(|e| e.retail_price)
        } else {
            None
        };

        if let Some(pending) = self.pending_scan.as_mut() {
            pending.selection.mode = next;
            if needs_seed {
                pending.selection.custom_value = seed;
            }
        }
    }

    fn cycle_item_discount(&mut self, step: i32) {
        if let Some(pending) = self.pending_scan.as_mut() {
            let cycle = DiscountKind::CYCLE;
            let idx = cycle
                .iter()
                .position(|k| *k == pending.discount.kind)
                .unwrap_or(0) as i32;
            pending.discount.kind = cycle[(idx + step).rem_euclid(cycle.len() as i32) as usize];
        }
    }

    /// Set the manual override value for the staged product
    /// (pointer/numpad driven; no dedicated key binding).
    pub fn set_pending_custom_price(&mut self, value: f64) -> bool {
        match self.pending_scan.as_mut() {
            Some(pending) => {
                pending.selection = PriceSelection::custom(value);
                true
            }
            None => false,
        }
    }

    /// Set the per-item discount value for the staged product.
    pub fn set_pending_discount_value(&mut self, value: f64) -> bool {
        match self.pending_scan.as_mut() {
            Some(pending) => {
                pending.discount.value = value;
                true
            }
            None => false,
        }
    }
}
