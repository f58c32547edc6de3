//! Checkout session - the interaction engine
//!
//! One session instance owns all state for one till: current step and
//! mode, the cart ledger, the staged scan, focus, and the pending
//! deferred-focus request. Sessions never share state; scanner and
//! keyboard arrive as a single input stream through
//! [`CheckoutSession::handle_key`].
//!
//! # Event Flow
//!
//! ```text
//! handle_key(key)
//!     ├─ 1. Help overlay toggle (?)
//!     ├─ 2. Escape priority chain (first match wins)
//!     ├─ 3. Function-key mode/step requests (guarded, silent no-ops)
//!     ├─ 4. Review-step digit payment selection (mode-independent)
//!     ├─ 5. Current mode's handler
//!     └─ 6. Search-mode fallthrough: Left/Right step navigation
//! ```

mod cart_keys;
mod cycle;
mod dispatch;
mod payment;
mod quantity;
mod search;
mod state;
mod surface;


pub use dispatch::Key;
pub use state::{
    FocusTarget, Mode, Notification, PaneId, PendingScan, SessionEffect, Severity, Step,
};
pub use surface::Surface;

use crate::cart::CartLedger;
use crate::pricing::round_money;
use shared::cart::{CartTotals, OverallAdjustment};
use shared::error::{CheckoutError, CheckoutResult};
use shared::invoice::{Invoice, InvoiceCustomer, InvoiceStatus};
use shared::models::{CatalogEntry, Customer, CustomerClass, PaymentMethod};

/// One checkout session (one till, one sale at a time)
#[derive(Debug)]
pub struct CheckoutSession {
    surface: Surface,
    /// Read-only catalog, supplied whole by a collaborator
    catalog: Vec<CatalogEntry>,
    /// Read-only customer directory
    customers: Vec<Customer>,

    step: Step,
    mode: Mode,
    focus: FocusTarget,
    /// Deferred focus move, consumed once per render tick; a later
    /// schedule supersedes an unconsumed one
    pending_focus: Option<FocusTarget>,

    /// Free-text search / scanner input buffer
    query: String,
    /// Clamped, non-wrapping highlight over filtered search results
    highlight: usize,

    cart: CartLedger,
    /// Selection cursor over cart lines (cart mode)
    cart_cursor: usize,

    pending_scan: Option<PendingScan>,

    customer_id: Option<String>,
    walk_in: bool,
    payment_method: PaymentMethod,
    adjustment: OverallAdjustment,
    help_open: bool,
}

impl CheckoutSession {
    pub fn new(surface: Surface, catalog: Vec<CatalogEntry>, customers: Vec<Customer>) -> Self {
        let step = surface.first_step();
        Self {
            surface,
            catalog,
            customers,
            step,
            mode: Mode::Search,
            focus: FocusTarget::SearchField,
            pending_focus: Some(FocusTarget::SearchField),
            query: String::new(),
            highlight: 0,
            cart: CartLedger::new(),
            cart_cursor: 0,
            pending_scan: None,
            customer_id: None,
            walk_in: false,
            payment_method: PaymentMethod::default(),
            adjustment: OverallAdjustment::default(),
            help_open: false,
        }
    }

    // ==================== Accessors ====================

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn cart_cursor(&self) -> usize {
        self.cart_cursor
    }

    pub fn pending_scan(&self) -> Option<&PendingScan> {
        self.pending_scan.as_ref()
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn adjustment(&self) -> &OverallAdjustment {
        &self.adjustment
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        let id = self.customer_id.as_deref()?;
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn is_walk_in(&self) -> bool {
        self.walk_in
    }

    /// Customer class driving automatic price tier selection.
    /// Walk-in and no-selection both price as retail.
    pub fn customer_class(&self) -> CustomerClass {
        self.selected_customer()
            .map(|c| c.class)
            .unwrap_or_default()
    }

    pub fn catalog_entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.catalog.iter().find(|e| e.id == id)
    }

    /// Active catalog entries matching the current query; the whole
    /// active catalog when the query is empty.
    pub fn filtered_entries(&self) -> Vec<&CatalogEntry> {
        self.catalog
            .iter()
            .filter(|e| e.is_active)
            .filter(|e| self.query.is_empty() || e.matches_query(&self.query))
            .collect()
    }

    /// Active customers matching the current query.
    pub fn filtered_customers(&self) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|c| c.is_active)
            .filter(|c| self.query.is_empty() || c.matches_query(&self.query))
            .collect()
    }

    /// Totals under the current overall adjustment, recomputed on
    /// every call.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(&self.adjustment)
    }

    // ==================== Deferred Focus ====================

    /// Schedule a focus move for after the current render; replaces
    /// any unconsumed request.
    pub(crate) fn schedule_focus(&mut self, target: FocusTarget) {
        self.focus = target;
        self.pending_focus = Some(target);
    }

    /// Consume the pending focus request. The UI calls this once per
    /// render tick and moves real input focus accordingly.
    pub fn take_pending_focus(&mut self) -> Option<FocusTarget> {
        self.pending_focus.take()
    }

    // ==================== Pointer-driven API ====================

    /// Select a customer by ID (search commit or pointer click).
    pub fn select_customer(&mut self, customer_id: &str) -> bool {
        let known = self.customers.iter().any(|c| c.id == customer_id);
        if known {
            self.customer_id = Some(customer_id.to_string());
            self.walk_in = false;
        }
        known
    }

    /// Flag the sale as walk-in; satisfies the customer-step guard
    /// without a directory entry.
    pub fn mark_walk_in(&mut self) {
        self.walk_in = true;
        self.customer_id = None;
    }

    /// Add a line not backed by the catalog (rapid surface quick-add).
    pub fn add_quick_item(&mut self, name: &str, price: f64, quantity: i32) -> CheckoutResult<()> {
        self.cart.add_quick_item(name, price, quantity)?;
        Ok(())
    }

    pub fn set_adjustment(&mut self, adjustment: OverallAdjustment) {
        self.adjustment = adjustment;
    }

    // ==================== Step Transitions ====================

    /// Guard for advancing past the current step.
    fn advance_guard(&self) -> Result<(), Notification> {
        match self.step {
            Step::Customer if self.customer_id.is_none() && !self.walk_in => Err(
                Notification::from_error(&CheckoutError::NoCustomerSelected),
            ),
            Step::Products if self.cart.is_empty() => {
                Err(Notification::warning("Cart is empty"))
            }
            _ => Ok(()),
        }
    }

    /// Advance to the adjacent step; refused by the step guard.
    pub(crate) fn advance_step(&mut self) -> Vec<SessionEffect> {
        let steps = self.surface.steps();
        let Some(idx) = self.surface.step_index(self.step) else {
            return Vec::new();
        };
        if idx + 1 >= steps.len() {
            return Vec::new();
        }
        if let Err(notification) = self.advance_guard() {
            return vec![SessionEffect::Notify(notification)];
        }
        self.enter_step(steps[idx + 1]);
        Vec::new()
    }

    /// Retreat one step; from the first step this exits the surface.
    pub(crate) fn retreat_step(&mut self) -> Vec<SessionEffect> {
        let steps = self.surface.steps();
        let Some(idx) = self.surface.step_index(self.step) else {
            return Vec::new();
        };
        if idx == 0 {
            return vec![SessionEffect::ExitRequested];
        }
        self.enter_step(steps[idx - 1]);
        Vec::new()
    }

    /// Direct jump, permitted only to an earlier step.
    pub fn jump_to_step(&mut self, target: Step) -> bool {
        let (Some(cur), Some(dst)) = (
            self.surface.step_index(self.step),
            self.surface.step_index(target),
        ) else {
            return false;
        };
        if dst >= cur {
            return false;
        }
        self.enter_step(target);
        true
    }

    /// Any step transition resets the mode to Search and clears
    /// pending scan/selection state.
    fn enter_step(&mut self, step: Step) {
        tracing::debug!(from = ?self.step, to = ?step, "step transition");
        self.step = step;
        self.mode = Mode::Search;
        self.pending_scan = None;
        self.query.clear();
        self.highlight = 0;
        self.cart_cursor = 0;
        self.schedule_focus(FocusTarget::SearchField);
    }

    // ==================== Mode Transitions ====================

    /// Enter a mode if it is meaningful for the current step;
    /// otherwise a silent no-op (reachability guard, not an error).
    pub(crate) fn request_mode(&mut self, mode: Mode) -> bool {
        if !self.surface.allows(self.step, mode) {
            return false;
        }
        match mode {
            Mode::Cart if self.cart.is_empty() => return false,
            // Staging modes need a staged product
            Mode::Quantity | Mode::PriceMode | Mode::ItemDiscount
                if self.pending_scan.is_none() =>
            {
                return false;
            }
            _ => {}
        }
        self.enter_mode(mode);
        true
    }

    pub(crate) fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Search => self.schedule_focus(FocusTarget::SearchField),
            // Entering a list mode removes focus from any text field so
            // arrow keys read as navigation
            Mode::Cart => {
                self.cart_cursor = self.cart_cursor.min(self.cart.len().saturating_sub(1));
                self.schedule_focus(FocusTarget::CartList);
            }
            Mode::Payment => self.schedule_focus(FocusTarget::PaymentPanel),
            _ => self.schedule_focus(FocusTarget::None),
        }
    }

    // ==================== Checkout ====================

    /// Build the invoice for the current sale. Totals and unit prices
    /// are rounded to 2 decimal places here, at the persistence
    /// boundary, and nowhere earlier.
    pub fn finalize(&mut self, status: InvoiceStatus) -> CheckoutResult<Invoice> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCartOnCheckout);
        }

        let customer = match self.selected_customer() {
            Some(c) => InvoiceCustomer::known(c.id.clone(), c.name.clone()),
            None => InvoiceCustomer::walk_in(),
        };

        let raw = self.cart.totals(&self.adjustment);
        let totals = CartTotals {
            subtotal: round_money(raw.subtotal),
            discount_amount: round_money(raw.discount_amount),
            tax_amount: round_money(raw.tax_amount),
            total: round_money(raw.total),
        };

        let items = self
            .cart
            .lines()
            .iter()
            .cloned()
            .map(|mut line| {
                line.unit_price = round_money(line.unit_price);
                line.original_price = round_money(line.original_price);
                line
            })
            .collect();

        let invoice = Invoice {
            invoice_id: uuid::Uuid::new_v4().to_string(),
            customer,
            items,
            adjustment: self.adjustment,
            totals,
            payment_method: self.payment_method,
            status,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        tracing::info!(
            invoice_id = %invoice.invoice_id,
            total = invoice.totals.total,
            method = invoice.payment_method.label(),
            "checkout finalized"
        );

        self.reset_sale();
        Ok(invoice)
    }

    /// Start a fresh sale on the same session after checkout.
    fn reset_sale(&mut self) {
        self.cart.clear();
        self.customer_id = None;
        self.walk_in = false;
        self.payment_method = PaymentMethod::default();
        self.adjustment = OverallAdjustment::default();
        self.enter_step(self.surface.first_step());
    }

    // ==================== Test Helpers ====================

    #[cfg(test)]
    pub(crate) fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }
}
