//! Quantity mode (rapid surface)
//!
//! Adjusts the staged product's pending quantity; Enter confirms the
//! add and returns to search. The quantity never drops below 1.

use super::CheckoutSession;
use super::dispatch::Key;
use super::state::{Mode, Notification, PaneId, SessionEffect};
use crate::pricing::resolve_price;

impl CheckoutSession {
    pub(super) fn handle_quantity_key(&mut self, key: Key) -> Vec<SessionEffect> {
        let Some(pending) = self.pending_scan.as_mut() else {
            // Mode is unreachable without a staged product; recover
            self.enter_mode(Mode::Search);
            return Vec::new();
        };

        match key {
            Key::Left => {
                pending.quantity = (pending.quantity - 1).max(1);
                Vec::new()
            }
            Key::Right => {
                pending.quantity += 1;
                Vec::new()
            }
            Key::Enter => self.confirm_pending_scan(),
            _ => Vec::new(),
        }
    }

    /// Resolve the staged product's price and add it to the cart.
    /// On failure the staged state is kept so the operator can adjust
    /// the quantity and retry.
    pub(super) fn confirm_pending_scan(&mut self) -> Vec<SessionEffect> {
        let Some(pending) = self.pending_scan.clone() else {
            return Vec::new();
        };
        let Some(entry) = self.catalog_entry(&pending.entry_id).cloned() else {
            self.pending_scan = None;
            self.enter_mode(Mode::Search);
            return Vec::new();
        };

        let resolution = resolve_price(
            &entry,
            &pending.selection,
            self.customer_class(),
            &pending.discount,
        );

        match self.cart.add_item(&entry, pending.quantity, &resolution) {
            Ok(_) => {
                self.pending_scan = None;
                self.enter_mode(Mode::Search);
                vec![
                    SessionEffect::Notify(Notification::info(format!(
                        "Added {} x{} @ {}",
                        entry.name,
                        pending.quantity,
                        resolution.label.as_str()
                    ))),
                    SessionEffect::ScrollIntoView(PaneId::CartList),
                ]
            }
            Err(err) => vec![SessionEffect::Notify(Notification::from_error(&err))],
        }
    }
}
