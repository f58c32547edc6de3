//! Payment and overall-discount modes (review step)
//!
//! Payment mode cycles the two primary methods with Left/Right; the
//! digit shortcuts 1-4 (handled step-wide in dispatch) reach the full
//! set. Discount mode edits the invoice-level adjustment.

use super::CheckoutSession;
use super::dispatch::Key;
use super::state::{Mode, Notification, SessionEffect};
use shared::cart::DiscountKind;
use shared::models::PaymentMethod;

impl CheckoutSession {
    pub(super) fn handle_payment_key(&mut self, key: Key) -> Vec<SessionEffect> {
        match key {
            Key::Left | Key::Right => {
                let cycle = PaymentMethod::CYCLE;
                let idx = cycle.iter().position(|m| *m == self.payment_method);
                self.payment_method = match (idx, key) {
                    // A digit-selected method outside the cycle snaps
                    // back to the first option
                    (None, _) => cycle[0],
                    (Some(i), Key::Right) => cycle[(i + 1) % cycle.len()],
                    (Some(i), _) => cycle[(i + cycle.len() - 1) % cycle.len()],
                };
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub(super) fn handle_discount_key(&mut self, key: Key) -> Vec<SessionEffect> {
        match key {
            // Cycle the discount kind with wraparound
            Key::Left | Key::Right => {
                let cycle = DiscountKind::CYCLE;
                let idx = cycle
                    .iter()
                    .position(|k| *k == self.adjustment.discount_kind)
                    .unwrap_or(0);
                self.adjustment.discount_kind = match key {
                    Key::Right => cycle[(idx + 1) % cycle.len()],
                    _ => cycle[(idx + cycle.len() - 1) % cycle.len()],
                };
                Vec::new()
            }
            // Step the discount value, clamped at zero
            Key::Up => {
                self.adjustment.discount_value += 1.0;
                Vec::new()
            }
            Key::Down => {
                self.adjustment.discount_value = (self.adjustment.discount_value - 1.0).max(0.0);
                Vec::new()
            }
            // Toggle tax on the adjustment
            Key::Char('t') => {
                self.adjustment.tax_enabled = !self.adjustment.tax_enabled;
                let state = if self.adjustment.tax_enabled {
                    "enabled"
                } else {
                    "disabled"
                };
                vec![SessionEffect::Notify(Notification::info(format!(
                    "Tax {state}"
                )))]
            }
            Key::Enter => {
                self.enter_mode(Mode::Search);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
