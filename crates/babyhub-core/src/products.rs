use serde::{Deserialize, Serialize};

/// A single storefront listing from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog-unique identifier, e.g. `"17"`.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in minor currency units (e.g. paise or cents).
    pub price: u64,
    /// Free-form category label; filtering compares it byte-for-byte.
    pub category: String,
    /// Image URI or site-relative path.
    pub image: String,
    /// Outbound retailer link the "View Deal" button points at.
    pub affiliate_url: String,
    pub brand: String,
}

/// Inclusive price bounds in minor currency units. `None` leaves that side
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    /// Builds a range from the storefront's original encoding, where a bound
    /// of `0` means "unset" rather than a literal zero price.
    #[must_use]
    pub fn from_legacy(min: u64, max: u64) -> Self {
        Self {
            min: (min != 0).then_some(min),
            max: (max != 0).then_some(max),
        }
    }

    /// Returns `true` if `price` satisfies both bounds.
    #[must_use]
    pub fn contains(&self, price: u64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Category and price selection applied to a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilters {
    /// Exact category to match. `None` matches every category.
    pub category: Option<String>,
    pub price_range: PriceRange,
}

impl ProductFilters {
    #[must_use]
    pub fn new(category: Option<String>, price_range: PriceRange) -> Self {
        Self {
            category,
            price_range,
        }
    }

    /// Builds filters from the original encoding: an empty category matches
    /// everything and zero price bounds are unset.
    #[must_use]
    pub fn from_legacy(category: &str, min: u64, max: u64) -> Self {
        Self {
            category: (!category.is_empty()).then(|| category.to_string()),
            price_range: PriceRange::from_legacy(min, max),
        }
    }

    /// Returns `true` if `product` passes both the category and the price
    /// predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_match = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        category_match && self.price_range.contains(product.price)
    }
}

/// Returns the products matching `filters`, preserving input order.
#[must_use]
pub fn filter_products<'a, I>(products: I, filters: &ProductFilters) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|product| filters.matches(product))
        .collect()
}
