//! Ranked keyword search command.

use anyhow::Result;
use showroom_catalog::search::KeywordSearch;

use super::KeywordsArgs;
use crate::context::Context;

/// Run the keywords command.
pub async fn run(args: KeywordsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args);
    let store = ctx.load_store().await?;
    let scored = store.keyword_search(&query).await;

    if ctx.output.is_json() {
        ctx.output.json(&scored);
        return Ok(());
    }

    ctx.output.header(&format!("Best matches for {}", args.keywords.join(" ")));
    if scored.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    ctx.output.table_row(&["SCORE", "HITS", "ID", "TITLE"], &WIDTHS);
    for hit in &scored {
        ctx.output.table_row(
            &[
                &format!("{:.2}", hit.score),
                &format!("{}/{}", hit.keywords_matched, query.keywords.len()),
                hit.product.id.as_str(),
                &hit.product.title,
            ],
            &WIDTHS,
        );
    }
    Ok(())
}

const WIDTHS: [usize; 4] = [6, 5, 8, 40];

fn build_query(args: &KeywordsArgs) -> KeywordSearch {
    let mut query = KeywordSearch::new(args.keywords.iter().cloned())
        .with_categories(args.categories.clone())
        .with_brands(args.brands.clone())
        .with_price_range(args.min_price, args.max_price)
        .with_limit(args.limit);
    if let Some(rating) = args.min_rating {
        query = query.with_min_rating(rating);
    }
    if args.in_stock {
        query = query.in_stock_only();
    }
    query
}
