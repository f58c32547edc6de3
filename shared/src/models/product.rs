//! Catalog Entry Model

use serde::{Deserialize, Serialize};

/// Catalog entry (product or variant)
///
/// Carries the three price tiers used by price resolution plus the
/// stock figures used for cart reservation checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Stock keeping unit, unique per entry
    pub sku: String,
    pub barcode: Option<String>,
    /// Category reference (String ID)
    pub category: Option<String>,
    /// Units currently on hand
    pub stock: i32,
    /// Reorder threshold (low-stock warning level)
    pub reorder_level: i32,
    pub cost_price: f64,
    pub wholesale_price: f64,
    pub retail_price: f64,
    pub is_active: bool,
}

impl CatalogEntry {
    /// Exact SKU or barcode match. SKU comparison is case-insensitive
    /// because scanners and operators disagree on casing; barcodes are
    /// compared verbatim.
    pub fn matches_code(&self, code: &str) -> bool {
        if self.sku.eq_ignore_ascii_case(code) {
            return true;
        }
        self.barcode.as_deref() == Some(code)
    }

    /// Substring match on name or SKU for free-text search.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.sku.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            id: "prod-1".to_string(),
            name: "Espresso Beans 1kg".to_string(),
            sku: "SKU123".to_string(),
            barcode: Some("8412345678905".to_string()),
            category: None,
            stock: 10,
            reorder_level: 2,
            cost_price: 6.0,
            wholesale_price: 9.0,
            retail_price: 12.5,
            is_active: true,
        }
    }

    #[test]
    fn test_matches_code_sku_case_insensitive() {
        let e = entry();
        assert!(e.matches_code("SKU123"));
        assert!(e.matches_code("sku123"));
        assert!(!e.matches_code("SKU12"));
    }

    #[test]
    fn test_matches_code_barcode_verbatim() {
        let e = entry();
        assert!(e.matches_code("8412345678905"));
        assert!(!e.matches_code("841234567890"));
    }

    #[test]
    fn test_matches_query_on_name() {
        let e = entry();
        assert!(e.matches_query("espresso"));
        assert!(e.matches_query("sku1"));
        assert!(!e.matches_query("decaf"));
    }
}
