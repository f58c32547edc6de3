//! Data models
//!
//! Catalog and customer directory entries are supplied whole by an
//! external collaborator and treated as read-only by the engine.

pub mod customer;
pub mod payment;
pub mod product;

// Re-exports
pub use customer::*;
pub use payment::*;
pub use product::*;
