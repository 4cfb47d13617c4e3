//! Product catalog: a product and its purchasable variants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::VariantId;

/// Errors raised when a catalog cannot back a product display.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// A product must have at least one variant to select.
    #[error("product '{0}' has no variants")]
    NoVariants(String),
    /// Variant ids must be unique within a product.
    #[error("duplicate variant id {0}")]
    DuplicateVariant(VariantId),
    /// The catalog document could not be parsed.
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub color: String,
    /// Image path or URL shown while this variant is selected.
    pub image: String,
    /// Units available to order.
    pub quantity: u32,
}

impl Variant {
    /// A variant is in stock while any quantity remains.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// A product as loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub brand: String,
    pub name: String,
    #[serde(default)]
    pub details: Vec<String>,
    pub variants: Vec<Variant>,
}

impl ProductCatalog {
    /// Parse a catalog from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed input, or the
    /// [`validate`](Self::validate) error for an unusable product.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that the product has variants and that their ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoVariants`] or [`CatalogError::DuplicateVariant`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.variants.is_empty() {
            return Err(CatalogError::NoVariants(self.name.clone()));
        }

        let mut seen = HashSet::with_capacity(self.variants.len());
        for variant in &self.variants {
            if !seen.insert(variant.id) {
                return Err(CatalogError::DuplicateVariant(variant.id));
            }
        }

        Ok(())
    }

    /// The house product: Sac Clothes mittens in brown and gray.
    #[must_use]
    pub fn mittens() -> Self {
        Self {
            brand: "Sac Clothes".to_string(),
            name: "Mittens".to_string(),
            details: vec![
                "80% cotton".to_string(),
                "20% polyester".to_string(),
                "Gender-neutral".to_string(),
            ],
            variants: vec![
                Variant {
                    id: VariantId::new(2234),
                    color: "brown".to_string(),
                    image: "/assets/brown-mittens.png".to_string(),
                    quantity: 10,
                },
                Variant {
                    id: VariantId::new(2235),
                    color: "gray".to_string(),
                    image: "/assets/gray-mittens.png".to_string(),
                    quantity: 0,
                },
            ],
        }
    }
}
