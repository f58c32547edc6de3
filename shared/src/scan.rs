//! Scan token
//!
//! Structured result of parsing raw scanner/search input. Resolving
//! the code against the catalog is the caller's job.

use serde::{Deserialize, Serialize};

/// Parsed scanner/search input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanToken {
    /// Product code as typed/scanned (SKU or barcode)
    pub code: String,
    /// Quantity shorthand, defaults to 1
    pub quantity: i32,
}

impl ScanToken {
    pub fn new(code: impl Into<String>, quantity: i32) -> Self {
        Self {
            code: code.into(),
            quantity,
        }
    }

    /// Bare code with implicit quantity 1.
    pub fn bare(code: impl Into<String>) -> Self {
        Self::new(code, 1)
    }
}
