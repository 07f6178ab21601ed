//! Read-only catalog commands. Everything here runs against the in-memory
//! catalog; nothing touches the network.

use babyhub_core::{Catalog, CatalogView, PriceRange, Product, ProductFilters};

/// Turn `list` flags into filters. An empty `--category` matches everything.
///
/// # Errors
///
/// Returns an error if `min_price` exceeds `max_price`.
pub(crate) fn list_filters(
    category: Option<String>,
    min_price: Option<u64>,
    max_price: Option<u64>,
) -> anyhow::Result<ProductFilters> {
    if let (Some(min), Some(max)) = (min_price, max_price) {
        anyhow::ensure!(
            min <= max,
            "--min-price ({min}) must not exceed --max-price ({max})"
        );
    }

    Ok(ProductFilters::new(
        category.filter(|c| !c.is_empty()),
        PriceRange::new(min_price, max_price),
    ))
}

/// Render minor units as rupees, e.g. `149900` -> `₹1499.00`.
pub(crate) fn fmt_price(minor: u64) -> String {
    format!("\u{20b9}{}.{:02}", minor / 100, minor % 100)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn print_product_rows<'a>(products: impl IntoIterator<Item = &'a Product>) {
    println!("{:<6}{:<14}{:<13}NAME", "ID", "CATEGORY", "PRICE");
    for product in products {
        println!(
            "{:<6}{:<14}{:<13}{}",
            product.id,
            product.category,
            fmt_price(product.price),
            truncate(&product.name, 50)
        );
    }
}

pub(crate) fn run_categories(catalog: &Catalog) {
    if catalog.categories().is_empty() {
        println!("catalog has no categories");
        return;
    }
    for category in catalog.categories() {
        println!("{category}");
    }
}

pub(crate) fn run_list(catalog: &Catalog, filters: &ProductFilters, page: usize) {
    let view = CatalogView::build(catalog, filters, page);

    if view.total_matches == 0 {
        println!("no products match the given filters");
        return;
    }
    if view.products.is_empty() {
        println!(
            "page {} is past the end; {} page(s) available",
            view.page, view.total_pages
        );
        return;
    }

    print_product_rows(view.products.iter().copied());
    println!(
        "\npage {}/{} ({} matching products)",
        view.page, view.total_pages, view.total_matches
    );
    if view.has_next_page() {
        println!("next: --page {}", view.page + 1);
    }
}

/// # Errors
///
/// Returns an error if no product has the given id.
pub(crate) fn run_show(catalog: &Catalog, id: &str) -> anyhow::Result<()> {
    let product = catalog
        .find_product(id)
        .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;

    println!("{} ({})", product.name, product.brand);
    println!("category: {}", product.category);
    println!("price:    {}", fmt_price(product.price));
    println!("image:    {}", product.image);
    println!("deal:     {}", product.affiliate_url);
    println!("\n{}", product.description);
    Ok(())
}

pub(crate) fn run_bounds(catalog: &Catalog) {
    match (
        babyhub_core::get_min_price(catalog.products()),
        babyhub_core::get_max_price(catalog.products()),
    ) {
        (Some(min), Some(max)) => println!("min {}  max {}", fmt_price(min), fmt_price(max)),
        _ => println!("catalog is empty"),
    }
}
