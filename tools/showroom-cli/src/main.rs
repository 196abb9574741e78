//! Showroom CLI - Browse and query a product catalog from the terminal.
//!
//! Commands:
//! - `showroom search` - Search, filter, sort and paginate products
//! - `showroom show` - Show one product
//! - `showroom categories` / `brands` / `price-range` - Catalog facets
//! - `showroom info` - Catalog summary and load diagnostics
//! - `showroom discounts` / `top` - Curated listings
//! - `showroom keywords` - Ranked keyword search
//! - `showroom grid` - Compact grid of chosen products
//! - `showroom quiz` - Swipe quiz with a discount unlock
//! - `showroom config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use commands::{
    CategoriesArgs, ConfigArgs, DiscountsArgs, GridArgs, KeywordsArgs, QuizArgs, SearchArgs,
    ShowArgs, TopArgs,
};

/// Showroom CLI - Browse and query an AR storefront catalog
#[derive(Parser)]
#[command(name = "showroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog URL or file, overriding the config
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products with filters, sorting and pagination
    Search(SearchArgs),

    /// Show a single product
    Show(ShowArgs),

    /// List product categories
    Categories(CategoriesArgs),

    /// List product brands
    Brands,

    /// Show the lowest and highest price
    PriceRange,

    /// Summarize the catalog and the last load
    Info,

    /// List the deepest discounts
    Discounts(DiscountsArgs),

    /// List the best rated products in a category or price range
    Top(TopArgs),

    /// Ranked search over several keywords
    Keywords(KeywordsArgs),

    /// Show chosen products as a compact grid
    Grid(GridArgs),

    /// Take a product swipe quiz
    Quiz(QuizArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.source.as_deref(), output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose {
        logging.level = logging.level.min(showroom_observability::LogLevel::Debug);
    }
    showroom_observability::init_logging(&logging).context("Failed to set up logging")?;

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Categories(args) => commands::facets::categories(args, &ctx).await,
        Commands::Brands => commands::facets::brands(&ctx).await,
        Commands::PriceRange => commands::facets::price_range(&ctx).await,
        Commands::Info => commands::info::run(&ctx).await,
        Commands::Discounts(args) => commands::listings::discounts(args, &ctx).await,
        Commands::Top(args) => commands::listings::top(args, &ctx).await,
        Commands::Keywords(args) => commands::keywords::run(args, &ctx).await,
        Commands::Grid(args) => commands::grid::run(args, &ctx).await,
        Commands::Quiz(args) => commands::quiz::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
