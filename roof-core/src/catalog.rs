//! Material price catalog with soft-fail lookup.
//!
//! The catalog feeds the informational material-cost figure on an estimate.
//! Catalog data is routinely incomplete (suppliers come and go), so a miss
//! is an expected condition: [`MaterialCatalog::lookup`] answers with a
//! zero-priced placeholder named [`UNKNOWN_MATERIAL`] instead of an error.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MaterialProduct;

/// Name reported for ids with no catalog entry.
pub const UNKNOWN_MATERIAL: &str = "Unknown";

/// Result of a catalog lookup. Always produced, even on a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialPrice {
    pub name: String,
    pub price_per_square: Decimal,
}

impl MaterialPrice {
    fn unknown() -> Self {
        Self {
            name: UNKNOWN_MATERIAL.to_string(),
            price_per_square: Decimal::ZERO,
        }
    }
}

/// In-memory price table keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    products: HashMap<String, MaterialProduct>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products<I>(products: I) -> Self
    where
        I: IntoIterator<Item = MaterialProduct>,
    {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Starter catalog with common Front Range shingle and underlayment
    /// products, used when no database-backed catalog is loaded.
    pub fn builtin() -> Self {
        Self::from_products([
            MaterialProduct {
                id: "SHNG-3TAB".to_string(),
                name: "3-Tab Asphalt Shingle".to_string(),
                price_per_square: Decimal::from(185),
            },
            MaterialProduct {
                id: "SHNG-ARCH".to_string(),
                name: "Architectural Shingle".to_string(),
                price_per_square: Decimal::from(240),
            },
            MaterialProduct {
                id: "SHNG-IMPACT".to_string(),
                name: "Class 4 Impact-Resistant Shingle".to_string(),
                price_per_square: Decimal::from(320),
            },
            MaterialProduct {
                id: "UL-FELT15".to_string(),
                name: "15 lb Felt Underlayment".to_string(),
                price_per_square: Decimal::from(12),
            },
            MaterialProduct {
                id: "UL-SYN".to_string(),
                name: "Synthetic Underlayment".to_string(),
                price_per_square: Decimal::from(28),
            },
        ])
    }

    /// Inserts or replaces a product.
    pub fn insert(&mut self, product: MaterialProduct) {
        self.products.insert(product.id.clone(), product);
    }

    /// Looks up a product id.
    ///
    /// Unknown ids yield a zero-priced `"Unknown"` placeholder and a
    /// warning in the log; absence of a catalog entry is not an error.
    pub fn lookup(&self, id: &str) -> MaterialPrice {
        match self.products.get(id) {
            Some(product) => MaterialPrice {
                name: product.name.clone(),
                price_per_square: product.price_per_square,
            },
            None => {
                tracing::warn!(material_id = %id, "material not in catalog, pricing as zero");
                MaterialPrice::unknown()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
