//! Category, brand and price range commands.

use anyhow::Result;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;
    let categories = if args.ar {
        store.ar_categories().await
    } else {
        store.categories().await
    };

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header(if args.ar { "AR Categories" } else { "Categories" });
    if categories.is_empty() {
        ctx.output.info("No categories found.");
    }
    for category in &categories {
        ctx.output.list_item(category);
    }
    Ok(())
}

/// Run the brands command.
pub async fn brands(ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;
    let brands = store.brands().await;

    if ctx.output.is_json() {
        ctx.output.json(&brands);
        return Ok(());
    }

    ctx.output.header("Brands");
    if brands.is_empty() {
        ctx.output.info("No brands found.");
    }
    for brand in &brands {
        ctx.output.list_item(brand);
    }
    Ok(())
}

/// Run the price-range command.
pub async fn price_range(ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;
    let bounds = store.price_range().await;

    if ctx.output.is_json() {
        ctx.output.json(&bounds);
        return Ok(());
    }

    ctx.output.header("Price Range");
    ctx.output.kv("min", &format!("${:.2}", bounds.min));
    ctx.output.kv("max", &format!("${:.2}", bounds.max));
    Ok(())
}
