//! Shared types for the till checkout engine
//!
//! Domain data exchanged between the interaction engine and its
//! collaborators: catalog/customer models, cart line types, scan
//! tokens, the finished invoice aggregate, and the unified error type.

pub mod cart;
pub mod error;
pub mod invoice;
pub mod models;
pub mod scan;

// Re-exports
pub use error::{CheckoutError, CheckoutResult};
pub use serde::{Deserialize, Serialize};
