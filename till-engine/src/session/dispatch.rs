//! Key dispatcher
//!
//! Routes each raw key event using the current step, mode, and focus
//! target. Routing is a pure function of session state: no UI element
//! is ever inspected. Illegal requests fall through as silent no-ops;
//! only validation failures surface notifications.

use super::CheckoutSession;
use super::state::{Mode, Notification, SessionEffect, Step};
use shared::invoice::InvoiceStatus;
use shared::models::PaymentMethod;

/// Engine input event. One scanner/keyboard stream; the UI layer maps
/// its backend's key events onto this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Function keys F1-F12
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Delete,
    Backspace,
    Esc,
    Char(char),
}

impl CheckoutSession {
    /// Process one key event to completion.
    pub fn handle_key(&mut self, key: Key) -> Vec<SessionEffect> {
        // Help overlay toggle is global
        if key == Key::Char('?') {
            self.help_open = !self.help_open;
            return Vec::new();
        }

        if key == Key::Esc {
            return self.handle_escape();
        }

        if let Key::F(n) = key {
            return self.handle_function_key(n);
        }

        // Digit payment selection works anywhere within the review
        // step, regardless of mode
        if self.step == Step::Review {
            if let Key::Char(digit) = key {
                if let Some(method) = PaymentMethod::from_digit(digit) {
                    self.payment_method = method;
                    return vec![SessionEffect::Notify(Notification::info(format!(
                        "Payment method: {}",
                        method.label()
                    )))];
                }
            }
        }

        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Quantity => self.handle_quantity_key(key),
            Mode::Cart => self.handle_cart_key(key),
            Mode::Payment => self.handle_payment_key(key),
            Mode::Discount => self.handle_discount_key(key),
            Mode::PriceMode | Mode::ItemDiscount => self.handle_cycle_key(key),
        }
    }

    /// Escape priority chain: tried in fixed order, first match wins,
    /// at most one action per keypress.
    fn handle_escape(&mut self) -> Vec<SessionEffect> {
        // 1. Close the help overlay
        if self.help_open {
            self.help_open = false;
            return Vec::new();
        }

        // 2. Exit cart/payment focus back to search
        if matches!(self.mode, Mode::Cart | Mode::Payment) {
            self.enter_mode(Mode::Search);
            return Vec::new();
        }

        // 3. Clear the pending scanned product (also leaves any
        //    staging mode, which is unreachable without one)
        if self.pending_scan.is_some() {
            self.pending_scan = None;
            if matches!(
                self.mode,
                Mode::Quantity | Mode::PriceMode | Mode::ItemDiscount
            ) {
                self.enter_mode(Mode::Search);
            }
            return Vec::new();
        }

        // 4. Clear free-text search
        if !self.query.is_empty() {
            self.query.clear();
            self.highlight = 0;
            return Vec::new();
        }

        // 5. Nothing left to cancel: on the first step this leaves
        //    the surface, same as retreating past it
        if self.mode == Mode::Search && self.surface.step_index(self.step) == Some(0) {
            return vec![SessionEffect::ExitRequested];
        }

        Vec::new()
    }

    fn handle_function_key(&mut self, n: u8) -> Vec<SessionEffect> {
        match n {
            // F2: enter search, focus and select the search field
            2 => {
                if self.surface.allows(self.step, Mode::Search) {
                    self.enter_mode(Mode::Search);
                }
                Vec::new()
            }
            3 => {
                self.request_mode(Mode::Quantity);
                Vec::new()
            }
            4 => {
                self.request_mode(Mode::Cart);
                Vec::new()
            }
            5 => {
                self.request_mode(Mode::Payment);
                Vec::new()
            }
            6 => {
                self.request_mode(Mode::Discount);
                Vec::new()
            }
            7 => {
                self.request_mode(Mode::PriceMode);
                Vec::new()
            }
            8 => {
                self.request_mode(Mode::ItemDiscount);
                Vec::new()
            }
            // F9: quick-save, skip print preview
            9 => self.finalize_from_key(InvoiceStatus::QuickSaved),
            // F12: finalize checkout
            12 => self.finalize_from_key(InvoiceStatus::Completed),
            _ => Vec::new(),
        }
    }

    fn finalize_from_key(&mut self, status: InvoiceStatus) -> Vec<SessionEffect> {
        if self.step != Step::Review {
            return Vec::new();
        }
        match self.finalize(status) {
            Ok(invoice) => vec![SessionEffect::CheckoutCompleted(invoice)],
            Err(err) => vec![SessionEffect::Notify(Notification::from_error(&err))],
        }
    }

    /// Left/Right step navigation, the search-mode fallthrough.
    pub(super) fn handle_step_nav(&mut self, key: Key) -> Vec<SessionEffect> {
        match key {
            Key::Left => self.retreat_step(),
            Key::Right => self.advance_step(),
            _ => Vec::new(),
        }
    }

    /// Delete outside cart mode removes the most recently added line.
    pub(super) fn remove_last_line(&mut self) -> Vec<SessionEffect> {
        let Some(id) = self.cart.last_line_id().map(str::to_string) else {
            return Vec::new();
        };
        if let Some(line) = self.cart.remove_item(&id) {
            self.cart_cursor = self.cart_cursor.min(self.cart.len().saturating_sub(1));
            return vec![SessionEffect::Notify(Notification::info(format!(
                "Removed {}",
                line.name
            )))];
        }
        Vec::new()
    }
}
