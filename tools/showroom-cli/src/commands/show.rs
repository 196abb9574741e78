//! Single product command.

use anyhow::{bail, Result};
use showroom_catalog::catalog::{ModelScale, Product};
use showroom_catalog::ProductId;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;

    let Some(product) = store.product(&ProductId::new(args.id.trim())).await else {
        bail!("Product '{}' not found", args.id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    print_product(&product, ctx);
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.title);
    ctx.output.kv("id", product.id.as_str());
    if !product.brand.is_empty() {
        ctx.output.kv("brand", &product.brand);
    }
    let category = if product.subcategory.is_empty() {
        product.category.clone()
    } else {
        format!("{} / {}", product.category, product.subcategory)
    };
    ctx.output.kv("category", &category);
    ctx.output.kv("price", &format_price(product));
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", product.rating.average, product.rating.count),
    );
    ctx.output.kv("stock", &stock_badge(product.stock));
    ctx.output.kv("thumbnail", &product.thumbnail);

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    if !product.specifications.is_empty() {
        ctx.output.header("Specifications");
        for (key, value) in &product.specifications {
            ctx.output.kv(key, value.as_str().unwrap_or_default());
        }
    }

    if let Some(assets) = &product.ar_assets {
        ctx.output.header("AR");
        if let Some(model) = &assets.model_3d {
            ctx.output.kv("model", model);
        }
        if let Some(color) = &assets.model_color {
            ctx.output.kv("color", color);
        }
        match &assets.model_scale {
            Some(ModelScale::Uniform(scale)) => ctx.output.kv("scale", &scale.to_string()),
            Some(ModelScale::Text(scale)) => ctx.output.kv("scale", scale),
            None => {}
        }
    }

    if !product.tags.is_empty() {
        ctx.output.info("");
        ctx.output.kv("tags", &product.tags.join(", "));
    }
}
