//! Product grid command.

use anyhow::Result;
use showroom_catalog::ProductId;

use super::GridArgs;
use crate::context::Context;

/// Run the grid command.
pub async fn run(args: GridArgs, ctx: &Context) -> Result<()> {
    let ids: Vec<ProductId> = args.ids.iter().map(|id| ProductId::new(id.trim())).collect();
    let store = ctx.load_store().await?;
    let grid = store.grid(&args.title, &ids).await;

    if grid.len() < ids.len() {
        ctx.output.warn(&format!(
            "{} of {} product(s) not found",
            ids.len() - grid.len(),
            ids.len()
        ));
    }

    if ctx.output.is_json() {
        ctx.output.json(&grid);
        return Ok(());
    }

    ctx.output.header(&grid.title);
    for item in &grid.items {
        ctx.output.info("");
        ctx.output.kv("id", item.id.as_str());
        ctx.output.kv("title", &item.title);
        ctx.output.kv("price", &format!("${:.2}", item.price));
        if !item.brand.is_empty() {
            ctx.output.kv("brand", &item.brand);
        }
        if !item.description.is_empty() {
            ctx.output.kv("description", &item.description);
        }
        if !item.tags.is_empty() {
            ctx.output.kv("tags", &item.tags.join(", "));
        }
    }
    Ok(())
}
