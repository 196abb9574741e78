//! Product search command.

use anyhow::{bail, Result};
use showroom_catalog::search::{Pagination, PriceRange, ProductFilters, SearchOptions, SortOption};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let options = build_options(&args)?;
    let store = ctx.load_store().await?;
    let results = store.search_page(&options).await;

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    match &args.query {
        Some(query) => ctx.output.header(&format!("Results for \"{}\"", query)),
        None => ctx.output.header("Products"),
    }

    if results.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    ctx.output.product_table(&results.items);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} match(es)",
        args.offset + 1,
        args.offset + results.len(),
        results.total_matches
    ));
    if results.has_more() {
        ctx.output.info(&format!(
            "Use --offset {} for the next page",
            args.offset + results.len()
        ));
    }

    Ok(())
}

fn build_options(args: &SearchArgs) -> Result<SearchOptions> {
    let mut filters = ProductFilters::new();
    if let Some(category) = &args.category {
        filters = filters.with_category(category.clone());
    }
    if let Some(brand) = &args.brand {
        filters = filters.with_brand(brand.clone());
    }
    match (args.min_price, args.max_price) {
        (Some(min), Some(max)) => filters = filters.with_price_range(PriceRange::between(min, max)),
        (Some(min), None) => filters = filters.with_price_range(PriceRange::at_least(min)),
        (None, Some(max)) => filters = filters.with_price_range(PriceRange::at_most(max)),
        (None, None) => {}
    }
    if let Some(rating) = args.min_rating {
        filters = filters.with_min_rating(rating);
    }
    if args.in_stock {
        filters = filters.with_in_stock(true);
    }

    let mut options = SearchOptions::new()
        .with_filters(filters)
        .with_pagination(Pagination::new(args.offset, args.limit));
    if let Some(query) = &args.query {
        options = options.with_query(query.clone());
    }
    if let Some(sort) = &args.sort {
        let Some(sort) = SortOption::from_str(sort) else {
            bail!(
                "Unknown sort order '{}'. Use price-asc, price-desc, rating, popularity or recency.",
                sort
            );
        };
        options = options.with_sort(sort);
    }

    Ok(options)
}
