use serde::Serialize;

use crate::catalog::Catalog;
use crate::pagination::{get_max_price, get_min_price, page_count, paginate_products};
use crate::products::{filter_products, Product, ProductFilters};

/// One rendered catalog page: the products on it plus the numbers a listing
/// needs around them.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    pub products: Vec<&'a Product>,
    /// Requested page after clamping to at least 1.
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// Cheapest product in the whole catalog; seeds the filter's lower bound.
    pub min_price: Option<u64>,
    /// Most expensive product in the whole catalog; seeds the upper bound.
    pub max_price: Option<u64>,
}

impl<'a> CatalogView<'a> {
    /// Filters `catalog`, then cuts out `page`.
    #[must_use]
    pub fn build(catalog: &'a Catalog, filters: &ProductFilters, page: usize) -> Self {
        let filtered = filter_products(catalog.products(), filters);
        let page = page.max(1);

        Self {
            products: paginate_products(&filtered, page).to_vec(),
            page,
            total_pages: page_count(filtered.len()),
            total_matches: filtered.len(),
            min_price: get_min_price(catalog.products()),
            max_price: get_max_price(catalog.products()),
        }
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}
