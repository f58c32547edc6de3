//! Checkout surface configuration
//!
//! The two checkout surfaces run on one engine parameterized by a
//! step list and per-step mode sets, instead of two independent state
//! machines. The wizard adds search commits immediately at the
//! resolved price, so staging modes (Quantity, PriceMode,
//! ItemDiscount) exist only on the rapid surface's products step.

use super::state::{Mode, Step};
use serde::{Deserialize, Serialize};

/// Checkout surface
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Surface {
    /// Three-step guided wizard: customer, products, review
    Wizard,
    /// Single-screen rapid checkout for walk-in sales
    #[default]
    Rapid,
}

const WIZARD_STEPS: [Step; 3] = [Step::Customer, Step::Products, Step::Review];
const RAPID_STEPS: [Step; 2] = [Step::Products, Step::Review];

const CUSTOMER_MODES: [Mode; 1] = [Mode::Search];
const WIZARD_PRODUCT_MODES: [Mode; 2] = [Mode::Search, Mode::Cart];
const RAPID_PRODUCT_MODES: [Mode; 5] = [
    Mode::Search,
    Mode::Quantity,
    Mode::Cart,
    Mode::PriceMode,
    Mode::ItemDiscount,
];
const REVIEW_MODES: [Mode; 4] = [Mode::Search, Mode::Cart, Mode::Payment, Mode::Discount];

impl Surface {
    /// Ordered step list for this surface.
    pub fn steps(&self) -> &'static [Step] {
        match self {
            Self::Wizard => &WIZARD_STEPS,
            Self::Rapid => &RAPID_STEPS,
        }
    }

    pub fn first_step(&self) -> Step {
        self.steps()[0]
    }

    /// Modes meaningful on a step; requests outside this set are
    /// silent no-ops.
    pub fn modes_for(&self, step: Step) -> &'static [Mode] {
        match (self, step) {
            (_, Step::Customer) => &CUSTOMER_MODES,
            (Self::Wizard, Step::Products) => &WIZARD_PRODUCT_MODES,
            (Self::Rapid, Step::Products) => &RAPID_PRODUCT_MODES,
            (_, Step::Review) => &REVIEW_MODES,
        }
    }

    pub fn allows(&self, step: Step, mode: Mode) -> bool {
        self.modes_for(step).contains(&mode)
    }

    /// Position of a step within this surface, if present.
    pub fn step_index(&self, step: Step) -> Option<usize> {
        self.steps().iter().position(|s| *s == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ordering() {
        assert_eq!(Surface::Wizard.first_step(), Step::Customer);
        assert_eq!(Surface::Rapid.first_step(), Step::Products);
        assert_eq!(Surface::Wizard.step_index(Step::Review), Some(2));
        assert_eq!(Surface::Rapid.step_index(Step::Customer), None);
    }

    #[test]
    fn test_quantity_mode_is_rapid_only() {
        assert!(Surface::Rapid.allows(Step::Products, Mode::Quantity));
        assert!(!Surface::Wizard.allows(Step::Products, Mode::Quantity));
    }

    #[test]
    fn test_payment_mode_needs_review() {
        for surface in [Surface::Wizard, Surface::Rapid] {
            assert!(surface.allows(Step::Review, Mode::Payment));
            assert!(!surface.allows(Step::Products, Mode::Payment));
        }
    }
}
