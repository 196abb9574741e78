//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod grid;
pub mod info;
pub mod keywords;
pub mod listings;
pub mod quiz;
pub mod search;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in titles, descriptions, brands, tags and features.
    pub query: Option<String>,

    /// Exact category (case-insensitive).
    #[arg(long)]
    pub category: Option<String>,

    /// Exact brand (case-insensitive).
    #[arg(long)]
    pub brand: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum average rating.
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order: price-asc, price-desc, rating, popularity or recency.
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of results.
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Number of results to skip.
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only categories with AR-enabled products.
    #[arg(long)]
    pub ar: bool,
}

/// Arguments for the discounts command.
#[derive(Args)]
pub struct DiscountsArgs {
    /// Number of products to show.
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the top command.
#[derive(Args)]
pub struct TopArgs {
    /// Category to rank.
    #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
    pub category: Option<String>,

    /// Lower end of the price range.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Upper end of the price range.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Number of products to show.
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the keywords command.
#[derive(Args)]
pub struct KeywordsArgs {
    /// Keywords to rank products by.
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Restrict to these categories.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Restrict to these brands.
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum average rating.
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Number of products to show.
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for the grid command.
#[derive(Args)]
pub struct GridArgs {
    /// Product IDs, in display order.
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Grid title.
    #[arg(short, long, default_value = "Products")]
    pub title: String,
}

/// Arguments for the quiz command.
#[derive(Args)]
pub struct QuizArgs {
    /// Only sample from this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Number of cards.
    #[arg(short = 'n', long, default_value = "8")]
    pub count: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog URL or file to put in the new config.
        #[arg(long)]
        catalog: Option<String>,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
