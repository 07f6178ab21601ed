use babyhub_core::{PriceRange, Product};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["babyhub-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_categories_command() {
    let cli = Cli::try_parse_from(["babyhub-cli", "categories"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Categories)));
}

#[test]
fn list_defaults_to_first_page_without_filters() {
    let cli = Cli::try_parse_from(["babyhub-cli", "list"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::List {
            category: None,
            min_price: None,
            max_price: None,
            page: 1
        })
    ));
}

#[test]
fn list_parses_all_filters() {
    let cli = Cli::try_parse_from([
        "babyhub-cli",
        "list",
        "--category",
        "Toys",
        "--min-price",
        "100000",
        "--max-price",
        "300000",
        "--page",
        "2",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::List {
            category: Some(ref c),
            min_price: Some(100_000),
            max_price: Some(300_000),
            page: 2
        }) if c == "Toys"
    ));
}

#[test]
fn list_rejects_negative_price() {
    let result = Cli::try_parse_from(["babyhub-cli", "list", "--min-price", "-5"]);
    assert!(result.is_err());
}

#[test]
fn show_requires_id() {
    assert!(Cli::try_parse_from(["babyhub-cli", "show"]).is_err());

    let cli = Cli::try_parse_from(["babyhub-cli", "show", "17"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Show { ref id }) if id == "17"));
}

#[test]
fn faq_defaults_to_english() {
    let cli = Cli::try_parse_from(["babyhub-cli", "faq", "when to start solids?"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Faq {
            language: Language::En,
            ..
        })
    ));
}

#[test]
fn faq_accepts_hindi() {
    let cli = Cli::try_parse_from(["babyhub-cli", "faq", "neend", "--language", "hi"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Faq {
            language: Language::Hi,
            ..
        })
    ));
}

#[test]
fn faq_rejects_unknown_language() {
    let result = Cli::try_parse_from(["babyhub-cli", "faq", "hello", "--language", "fr"]);
    assert!(result.is_err());
}

#[test]
fn list_filters_treats_empty_category_as_unset() {
    let filters =
        catalog::list_filters(Some(String::new()), None, None).expect("valid filters");
    assert_eq!(filters.category, None);
    assert!(filters.price_range.is_unbounded());
}

#[test]
fn list_filters_keeps_zero_as_literal_bound() {
    let filters = catalog::list_filters(None, Some(0), Some(0)).expect("valid filters");
    assert_eq!(filters.price_range, PriceRange::new(Some(0), Some(0)));
}

#[test]
fn list_filters_rejects_inverted_range() {
    let err = catalog::list_filters(None, Some(500), Some(100)).expect_err("inverted range");
    assert!(err.to_string().contains("--min-price"));
}

#[test]
fn fmt_price_renders_minor_units() {
    assert_eq!(catalog::fmt_price(149_900), "\u{20b9}1499.00");
    assert_eq!(catalog::fmt_price(5), "\u{20b9}0.05");
    assert_eq!(catalog::fmt_price(0), "\u{20b9}0.00");
}

#[test]
fn bundled_catalog_products_are_listable() {
    let catalog = Catalog::bundled().expect("bundled catalog");
    let filters = catalog::list_filters(None, None, None).expect("valid filters");
    catalog::run_list(&catalog, &filters, 1);

    let first: &Product = catalog.products().first().expect("non-empty catalog");
    catalog::run_show(&catalog, &first.id).expect("show first product");
    assert!(catalog::run_show(&catalog, "no-such-id").is_err());
}

#[test]
fn parses_reviews_command() {
    let cli = Cli::try_parse_from(["babyhub-cli", "reviews", "reviews.json", "--language", "hi"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            ref file,
            language: Language::Hi,
        }) if file.as_os_str() == "reviews.json"
    ));
}

#[test]
fn parse_reviews_accepts_optional_rating() {
    let reviews = assist::parse_reviews(
        r#"[{"text": "Soft and comfortable", "rating": 5}, {"text": "Runs small"}]"#,
    )
    .expect("valid reviews");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].rating, Some(5));
    assert_eq!(reviews[1].rating, None);
}

#[test]
fn parse_reviews_rejects_non_array() {
    assert!(assist::parse_reviews(r#"{"text": "just one"}"#).is_err());
}

#[test]
fn read_reviews_reports_missing_file() {
    let err = assist::read_reviews(std::path::Path::new("/nonexistent/babyhub/reviews.json"))
        .expect_err("missing file");
    assert!(err.to_string().contains("reading reviews"));
}
