//! Curated listing commands.

use anyhow::{bail, Result};

use super::{DiscountsArgs, TopArgs};
use crate::context::Context;

/// Run the discounts command.
pub async fn discounts(args: DiscountsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;
    let products = store.top_discounts(args.limit).await;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Top Discounts");
    if products.is_empty() {
        ctx.output.info("No discounted products.");
        return Ok(());
    }
    ctx.output.product_table(&products);
    Ok(())
}

/// Run the top command.
pub async fn top(args: TopArgs, ctx: &Context) -> Result<()> {
    let (title, products) = match (&args.category, args.min_price, args.max_price) {
        (Some(category), _, _) => {
            let store = ctx.load_store().await?;
            (
                format!("Top in {}", category),
                store.top_in_category(category, args.limit).await,
            )
        }
        (None, None, None) => bail!("Give a --category or a --min-price/--max-price range"),
        (None, min, max) => {
            let min = min.unwrap_or(0.0);
            let max = max.unwrap_or(f64::INFINITY);
            if min > max {
                bail!("--min-price {} is above --max-price {}", min, max);
            }
            let store = ctx.load_store().await?;
            (
                format!("Top between ${:.2} and ${:.2}", min, max),
                store.top_in_price_range(min, max, args.limit).await,
            )
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&title);
    if products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }
    ctx.output.product_table(&products);
    Ok(())
}
