//! Fixed-size page windows over a filtered product sequence, plus the price
//! bounds used to seed filter defaults.
//!
//! Pages are 1-indexed. Page `0` is treated as page `1`; pages past the end
//! are empty rather than an error.

use crate::products::Product;

/// Number of products shown on one catalog page.
pub const ITEMS_PER_PAGE: usize = 20;

/// Returns the window `[(page - 1) * 20, page * 20)` of `products`.
#[must_use]
pub fn paginate_products<T>(products: &[T], page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(ITEMS_PER_PAGE);
    if start >= products.len() {
        return &[];
    }
    let end = start.saturating_add(ITEMS_PER_PAGE).min(products.len());
    &products[start..end]
}

/// Number of pages needed to show `len` products, i.e. `ceil(len / 20)`.
#[must_use]
pub fn page_count(len: usize) -> usize {
    len.div_ceil(ITEMS_PER_PAGE)
}

/// Highest price in `products`, or `None` when the sequence is empty.
#[must_use]
pub fn get_max_price<'a, I>(products: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().map(|p| p.price).max()
}

/// Lowest price in `products`, or `None` when the sequence is empty.
#[must_use]
pub fn get_min_price<'a, I>(products: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().map(|p| p.price).min()
}
