//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer classification, drives automatic price tier selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerClass {
    #[default]
    Retail,
    Wholesale,
}

/// Customer directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub class: CustomerClass,
    /// Credit standing; surfaced to the operator, never enforced here
    pub credit_ok: bool,
    pub is_active: bool,
}

impl Customer {
    /// Substring match on name or phone for free-text search.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.phone.as_deref().is_some_and(|p| p.contains(query))
    }
}
