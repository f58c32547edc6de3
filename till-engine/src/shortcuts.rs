//! Shortcut registry
//!
//! Static lookup of the shortcuts live in a given (surface, step,
//! mode) state, consumed by the help overlay and footer hints. The
//! tables mirror what the dispatcher actually routes; a binding that
//! additionally needs runtime state (e.g. F4 needs a non-empty cart)
//! is listed wherever it is reachable at all.

use crate::session::{Mode, Step, Surface};

/// One help-overlay row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: &'static str,
}

const fn sc(key: &'static str, action: &'static str) -> Shortcut {
    Shortcut { key, action }
}

/// Always available
const GLOBAL: &[Shortcut] = &[
    sc("?", "Toggle shortcut help"),
    sc("Esc", "Cancel (overlay, focus, pending scan, search); exit from first step"),
];

const CUSTOMER_SEARCH: &[Shortcut] = &[
    sc("Type", "Filter customers"),
    sc("Up/Down", "Highlight customer"),
    sc("Enter", "Select customer"),
    sc("Right", "Next step"),
];

const WIZARD_PRODUCT_SEARCH: &[Shortcut] = &[
    sc("Type/Scan", "Search products"),
    sc("Up/Down", "Highlight result"),
    sc("Enter", "Add at resolved price"),
    sc("F2", "Focus search"),
    sc("F4", "Cart mode"),
    sc("Delete", "Remove last line"),
    sc("Left/Right", "Previous/next step"),
];

const RAPID_PRODUCT_SEARCH: &[Shortcut] = &[
    sc("Type/Scan", "Search products"),
    sc("Up/Down", "Highlight result"),
    sc("Enter", "Stage for quantity"),
    sc("F2", "Focus search"),
    sc("F3", "Quantity mode"),
    sc("F4", "Cart mode"),
    sc("Delete", "Remove last line"),
    sc("Left/Right", "Previous/next step"),
];

const QUANTITY: &[Shortcut] = &[
    sc("Left/Right", "Adjust quantity"),
    sc("Enter", "Confirm and add"),
    sc("F7", "Price mode"),
    sc("F8", "Item discount"),
];

const CART: &[Shortcut] = &[
    sc("Up/Down", "Select line"),
    sc("Left/Right", "Adjust quantity"),
    sc("Delete", "Remove line"),
];

const PRICE_MODE: &[Shortcut] = &[
    sc("Left/Right", "Cycle price mode"),
    sc("Enter", "Back to quantity"),
];

const ITEM_DISCOUNT: &[Shortcut] = &[
    sc("Left/Right", "Cycle discount kind"),
    sc("Enter", "Back to quantity"),
];

const REVIEW_SEARCH: &[Shortcut] = &[
    sc("F4", "Cart mode"),
    sc("F5", "Payment mode"),
    sc("F6", "Discount mode"),
    sc("1-4", "Payment method"),
    sc("F9", "Quick save"),
    sc("F12", "Finalize checkout"),
    sc("Left", "Previous step"),
];

const PAYMENT: &[Shortcut] = &[
    sc("Left/Right", "Cycle cash/card"),
    sc("1-4", "Payment method"),
    sc("F9", "Quick save"),
    sc("F12", "Finalize checkout"),
];

const DISCOUNT: &[Shortcut] = &[
    sc("Left/Right", "Cycle discount kind"),
    sc("Up/Down", "Adjust value"),
    sc("t", "Toggle tax"),
    sc("Enter", "Done"),
];

/// Shortcuts live in the given state, global bindings first.
pub fn shortcuts_for(surface: Surface, step: Step, mode: Mode) -> Vec<Shortcut> {
    let local: &[Shortcut] = match (step, mode) {
        (Step::Customer, _) => CUSTOMER_SEARCH,
        (Step::Products, Mode::Search) => match surface {
            Surface::Wizard => WIZARD_PRODUCT_SEARCH,
            Surface::Rapid => RAPID_PRODUCT_SEARCH,
        },
        (Step::Products, Mode::Quantity) => QUANTITY,
        (_, Mode::Cart) => CART,
        (Step::Products, Mode::PriceMode) => PRICE_MODE,
        (Step::Products, Mode::ItemDiscount) => ITEM_DISCOUNT,
        (Step::Review, Mode::Payment) => PAYMENT,
        (Step::Review, Mode::Discount) => DISCOUNT,
        (Step::Review, _) => REVIEW_SEARCH,
        _ => &[],
    };
    GLOBAL.iter().chain(local.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(surface: Surface, step: Step, mode: Mode) -> Vec<&'static str> {
        shortcuts_for(surface, step, mode)
            .iter()
            .map(|s| s.key)
            .collect()
    }

    #[test]
    fn test_global_bindings_everywhere() {
        for mode in [Mode::Search, Mode::Cart, Mode::Payment] {
            let ks = keys(Surface::Rapid, Step::Review, mode);
            assert!(ks.contains(&"?"));
            assert!(ks.contains(&"Esc"));
        }
    }

    #[test]
    fn test_quantity_mode_listed_on_rapid_only() {
        assert!(keys(Surface::Rapid, Step::Products, Mode::Search).contains(&"F3"));
        assert!(!keys(Surface::Wizard, Step::Products, Mode::Search).contains(&"F3"));
    }

    #[test]
    fn test_finalize_keys_only_on_review() {
        assert!(keys(Surface::Rapid, Step::Review, Mode::Search).contains(&"F12"));
        assert!(!keys(Surface::Rapid, Step::Products, Mode::Search).contains(&"F12"));
    }

    #[test]
    fn test_payment_mode_table() {
        let ks = keys(Surface::Wizard, Step::Review, Mode::Payment);
        assert!(ks.contains(&"1-4"));
        assert!(ks.contains(&"Left/Right"));
    }
}
