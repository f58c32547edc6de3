//! Till engine - keyboard-driven checkout interaction engine
//!
//! Drives two checkout surfaces over one parameterized state machine:
//! a three-step guided wizard (customer, products, review) and a
//! single-screen rapid checkout for walk-in sales. The engine owns all
//! session state (step, mode, cart, pending scan, focus) and processes
//! one input event to completion at a time; rendering and persistence
//! are external collaborators fed through [`session::SessionEffect`].
//!
//! # Components
//!
//! - [`scan`]: parses scanner/search text into structured tokens
//! - [`pricing`]: deterministic unit-price resolution
//! - [`cart`]: stock-aware line ledger with quantity merging
//! - [`session`]: step/mode state machine and key dispatcher
//! - [`shortcuts`]: live shortcut tables for the help overlay

pub mod cart;
pub mod pricing;
pub mod scan;
pub mod session;
pub mod shortcuts;

pub use cart::CartLedger;
pub use scan::tokenize;
pub use session::{CheckoutSession, Key, SessionEffect, Surface};
