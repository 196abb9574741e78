//! Catalog summary command.

use anyhow::Result;
use chrono::Local;
use serde_json::json;

use crate::context::Context;

/// Run the info command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.load_store().await?;
    let summary = store.summary().await;
    let metadata = store.metadata().await;
    let metrics = store.last_metrics();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "summary": summary,
            "metadata": metadata,
            "load": metrics,
        }));
        return Ok(());
    }

    ctx.output.header("Catalog");
    ctx.output.kv("products", &summary.total_products.to_string());
    ctx.output.kv("AR products", &summary.ar_products.to_string());
    ctx.output.kv(
        "price range",
        &format!("${:.2} - ${:.2}", summary.price_range.min, summary.price_range.max),
    );
    ctx.output.kv("categories", &summary.categories.join(", "));
    ctx.output.kv("top brands", &summary.top_brands.join(", "));

    if let Some(metadata) = metadata {
        ctx.output.header("Metadata");
        ctx.output.kv("version", &metadata.version);
        ctx.output.kv("last updated", &metadata.last_updated);
        ctx.output.kv("declared products", &metadata.total_products.to_string());
        if !metadata.ar_enabled_categories.is_empty() {
            ctx.output.kv("AR categories", &metadata.ar_enabled_categories.join(", "));
        }
    }

    if let Some(metrics) = metrics {
        ctx.output.header("Last Load");
        ctx.output.kv("source", &metrics.source);
        ctx.output.kv(
            "started",
            &metrics
                .started_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        );
        ctx.output.kv("duration", &format!("{} ms", metrics.duration_ms));
        if metrics.skipped > 0 {
            ctx.output.kv("skipped records", &metrics.skipped.to_string());
        }
        if let Some(error) = &metrics.error {
            ctx.output.kv("error", error);
        }
    }

    Ok(())
}
