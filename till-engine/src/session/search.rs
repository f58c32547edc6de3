//! Search mode
//!
//! Free-text and scanner input share one buffer. Enter commits the
//! highlighted (or first) result; on the rapid surface the product is
//! staged for quantity entry, on the wizard it is added immediately at
//! the automatically resolved price. Scanner quantity shorthands are
//! honored only when the token's code resolves to an exact SKU/barcode
//! match, so hyphenated codes fall back to plain search.

use super::CheckoutSession;
use super::dispatch::Key;
use super::state::{FocusTarget, Mode, Notification, PaneId, PendingScan, SessionEffect, Step};
use crate::pricing::resolve_price;
use crate::scan::tokenize;
use shared::cart::{ItemDiscount, PriceSelection};

impl CheckoutSession {
    pub(super) fn handle_search_key(&mut self, key: Key) -> Vec<SessionEffect> {
        match key {
            Key::Up | Key::Down => self.move_highlight(key),
            Key::Enter => self.commit_search(),
            Key::Char(c) if self.focus == FocusTarget::SearchField => {
                self.query.push(c);
                self.highlight = 0;
                Vec::new()
            }
            Key::Backspace if self.focus == FocusTarget::SearchField => {
                self.query.pop();
                self.highlight = 0;
                Vec::new()
            }
            Key::Delete => self.remove_last_line(),
            // Unconsumed Left/Right fall through to step navigation
            Key::Left | Key::Right => self.handle_step_nav(key),
            _ => Vec::new(),
        }
    }

    /// Clamped, non-wrapping highlight movement.
    fn move_highlight(&mut self, key: Key) -> Vec<SessionEffect> {
        let (len, pane) = match self.step {
            Step::Customer => (self.filtered_customers().len(), PaneId::CustomerList),
            _ => (self.filtered_entries().len(), PaneId::ProductList),
        };
        if len == 0 {
            return Vec::new();
        }
        self.highlight = match key {
            Key::Up => self.highlight.saturating_sub(1),
            Key::Down => (self.highlight + 1).min(len - 1),
            _ => self.highlight,
        };
        vec![SessionEffect::ScrollIntoView(pane)]
    }

    fn commit_search(&mut self) -> Vec<SessionEffect> {
        match self.step {
            Step::Customer => self.commit_customer(),
            Step::Products => self.commit_product(),
            Step::Review => Vec::new(),
        }
    }

    fn commit_customer(&mut self) -> Vec<SessionEffect> {
        let (id, name) = {
            let customers = self.filtered_customers();
            let Some(customer) = customers
                .get(self.highlight)
                .copied()
                .or_else(|| customers.first().copied())
            else {
                return Vec::new();
            };
            (customer.id.clone(), customer.name.clone())
        };
        self.select_customer(&id);
        self.query.clear();
        self.highlight = 0;
        vec![SessionEffect::Notify(Notification::info(format!(
            "Customer: {name}"
        )))]
    }

    fn commit_product(&mut self) -> Vec<SessionEffect> {
        // Scanner shorthand first: an exact code match wins and
        // carries the token quantity
        if let Some(token) = tokenize(&self.query) {
            let matched = self
                .catalog
                .iter()
                .find(|e| e.is_active && e.matches_code(&token.code))
                .map(|e| e.id.clone());
            if let Some(entry_id) = matched {
                return self.accept_product(&entry_id, token.quantity);
            }
        }

        // Otherwise the highlighted (or first) filtered result
        let entry_id = {
            let entries = self.filtered_entries();
            entries
                .get(self.highlight)
                .copied()
                .or_else(|| entries.first().copied())
                .map(|e| e.id.clone())
        };
        let Some(entry_id) = entry_id else {
            return vec![SessionEffect::Notify(Notification::warning(
                "No matching product",
            ))];
        };
        self.accept_product(&entry_id, 1)
    }

    /// Stage (rapid) or immediately add (wizard) a resolved product.
    fn accept_product(&mut self, entry_id: &str, quantity: i32) -> Vec<SessionEffect> {
        self.query.clear();
        self.highlight = 0;

        if self.surface.allows(self.step, Mode::Quantity) {
            // Rapid surface: stage for quantity confirmation
            self.pending_scan = Some(PendingScan::new(entry_id, quantity));
            self.enter_mode(Mode::Quantity);
            return Vec::new();
        }

        // Wizard surface: add immediately at the resolved price, then
        // refocus search
        let Some(entry) = self.catalog_entry(entry_id).cloned() else {
            return Vec::new();
        };
        let resolution = resolve_price(
            &entry,
            &PriceSelection::default(),
            self.customer_class(),
            &ItemDiscount::default(),
        );
        let effects = match self.cart.add_item(&entry, quantity, &resolution) {
            Ok(_) => vec![
                SessionEffect::Notify(Notification::info(format!("Added {}", entry.name))),
                SessionEffect::ScrollIntoView(PaneId::CartList),
            ],
            Err(err) => vec![SessionEffect::Notify(Notification::from_error(&err))],
        };
        self.schedule_focus(FocusTarget::SearchField);
        effects
    }
}
