use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::Product;
use crate::CatalogError;

/// Catalog document shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/products.json");

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The full, validated product list plus its distinct categories.
///
/// Built once at startup and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from parsed records, validating product ids and
    /// deriving the category set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProductId`] if two products share an
    /// id, or [`CatalogError::Validation`] for empty ids or categories.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        validate_products(&file.products)?;

        let mut seen = HashSet::new();
        let categories = file
            .categories
            .into_iter()
            .chain(file.products.iter().map(|p| p.category.clone()))
            .filter(|c| !c.trim().is_empty())
            .filter(|c| seen.insert(c.clone()))
            .collect();

        Ok(Self {
            products: file.products,
            categories,
        })
    }

    /// Parses and validates a catalog JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON or records that do
    /// not match the product shape, plus any error from [`Catalog::from_file`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Loads the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled document is itself invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct category labels: declared ones first, then any first seen on
    /// a product.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Looks up a product by exact id.
    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Load and validate a catalog from a JSON file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, or any parse or
/// validation error from [`Catalog::from_json_str`].
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    Catalog::from_json_str(&content)
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();

    for product in products {
        if product.id.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "product '{}' has an empty id",
                product.name
            )));
        }

        if product.category.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "product '{}' has an empty category",
                product.id
            )));
        }

        if !seen_ids.insert(product.id.as_str()) {
            return Err(CatalogError::DuplicateProductId(product.id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
