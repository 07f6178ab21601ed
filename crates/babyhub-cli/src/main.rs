mod assist;
mod catalog;

use std::path::PathBuf;

use anyhow::Context;
use babyhub_assist::{AssistClient, Language};
use babyhub_core::{load_catalog, AppConfig, Catalog};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "babyhub-cli")]
#[command(about = "BabyHub storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog's categories
    Categories,
    /// List one page of products matching the filters
    List {
        /// Exact category name (case-sensitive)
        #[arg(long)]
        category: Option<String>,
        /// Inclusive lower price bound in minor units
        #[arg(long)]
        min_price: Option<u64>,
        /// Inclusive upper price bound in minor units
        #[arg(long)]
        max_price: Option<u64>,
        /// 1-indexed page number
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Show a single product
    Show {
        /// Product identifier
        id: String,
    },
    /// Print the cheapest and most expensive catalog prices
    Bounds,
    /// Ask the assist service for related products
    Recommend {
        /// Product identifier
        id: String,
    },
    /// Ask the FAQ bot a question
    Faq {
        /// Free-text question
        question: String,
        /// Answer language (en or hi)
        #[arg(long, default_value = "en")]
        language: Language,
    },
    /// Summarize shopper reviews read from a JSON file
    Reviews {
        /// File holding a JSON array of `{"text": ..., "rating": ...}` objects
        file: PathBuf,
        /// Summary language (en or hi)
        #[arg(long, default_value = "en")]
        language: Language,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = babyhub_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("babyhub-cli: run with --help to list commands");
        return Ok(());
    };

    match command {
        Commands::Categories => catalog::run_categories(&open_catalog(&config)?),
        Commands::List {
            category,
            min_price,
            max_price,
            page,
        } => {
            let filters = catalog::list_filters(category, min_price, max_price)?;
            catalog::run_list(&open_catalog(&config)?, &filters, page);
        }
        Commands::Show { id } => catalog::run_show(&open_catalog(&config)?, &id)?,
        Commands::Bounds => catalog::run_bounds(&open_catalog(&config)?),
        Commands::Recommend { id } => {
            let catalog = open_catalog(&config)?;
            assist::run_recommend(&catalog, &assist_client(&config)?, &id).await?;
        }
        Commands::Faq { question, language } => {
            assist::run_faq(&assist_client(&config)?, &question, language).await?;
        }
        Commands::Reviews { file, language } => {
            let reviews = assist::read_reviews(&file)?;
            assist::run_reviews(&assist_client(&config)?, &reviews, language).await?;
        }
    }

    Ok(())
}

fn open_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading catalog from {}", path.display())),
        None => Catalog::bundled().context("loading bundled catalog"),
    }
}

fn assist_client(config: &AppConfig) -> anyhow::Result<AssistClient> {
    let client = AssistClient::new(
        &config.assist_base_url,
        config.assist_timeout_secs,
        config.assist_connect_timeout_secs,
    )
    .context("building assist client")?;
    Ok(client.with_retry(
        config.assist_max_retries,
        config.assist_retry_backoff_base_ms,
    ))
}

#[cfg(test)]
mod tests;
