//! Cart mode
//!
//! Arrow keys navigate and adjust the cart; Delete removes the
//! selected line. Decrementing below 1 is refused - removal is a
//! dedicated action, never decrement-to-zero.

use super::CheckoutSession;
use super::dispatch::Key;
use super::state::{Mode, Notification, PaneId, SessionEffect};

impl CheckoutSession {
    pub(super) fn handle_cart_key(&mut self, key: Key) -> Vec<SessionEffect> {
        if self.cart.is_empty() {
            self.enter_mode(Mode::Search);
            return Vec::new();
        }

        match key {
            Key::Up => {
                self.cart_cursor = self.cart_cursor.saturating_sub(1);
                vec![SessionEffect::ScrollIntoView(PaneId::CartList)]
            }
            Key::Down => {
                self.cart_cursor = (self.cart_cursor + 1).min(self.cart.len() - 1);
                vec![SessionEffect::ScrollIntoView(PaneId::CartList)]
            }
            Key::Left => self.adjust_selected_quantity(-1),
            Key::Right => self.adjust_selected_quantity(1),
            Key::Delete => self.remove_selected_line(),
            _ => Vec::new(),
        }
    }

    fn selected_line_id(&self) -> Option<String> {
        self.cart
            .lines()
            .get(self.cart_cursor)
            .map(|l| l.id.clone())
            .or_else(|| self.cart.last_line_id().map(str::to_string))
    }

    fn adjust_selected_quantity(&mut self, delta: i32) -> Vec<SessionEffect> {
        let Some(id) = self.selected_line_id() else {
            return Vec::new();
        };
        let Some(line) = self.cart.line(&id) else {
            return Vec::new();
        };
        let new_qty = line.quantity + delta;

        if new_qty < 1 {
            return vec![SessionEffect::Notify(Notification::warning(
                "Use Delete to remove a line",
            ))];
        }

        let entry = line
            .catalog_ref
            .clone()
            .and_then(|r| self.catalog_entry(&r).cloned());
        match self.cart.set_quantity(&id, new_qty, entry.as_ref()) {
            Ok(()) => Vec::new(),
            Err(err) => vec![SessionEffect::Notify(Notification::from_error(&err))],
        }
    }

    fn remove_selected_line(&mut self) -> Vec<SessionEffect> {
        let Some(id) = self.selected_line_id() else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if let Some(line) = self.cart.remove_item(&id) {
            effects.push(SessionEffect::Notify(Notification::info(format!(
                "Removed {}",
                line.name
            ))));
        }
        self.cart_cursor = self.cart_cursor.min(self.cart.len().saturating_sub(1));
        if self.cart.is_empty() {
            // Cart mode needs a non-empty cart
            self.enter_mode(Mode::Search);
        }
        effects
    }
}
