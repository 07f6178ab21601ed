pub mod app_config;
pub mod catalog;
pub mod config;
pub mod pagination;
pub mod products;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, Catalog, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use pagination::{get_max_price, get_min_price, page_count, paginate_products, ITEMS_PER_PAGE};
pub use products::{filter_products, PriceRange, Product, ProductFilters};
pub use view::CatalogView;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id: '{0}'")]
    DuplicateProductId(String),

    #[error("catalog validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
