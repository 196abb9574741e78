//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use showroom_data::CatalogSource;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("source", &catalog.source.to_string());
    if let Some(ms) = catalog.timeout_ms {
        ctx.output.kv("timeout_ms", &ms.to_string());
    }
    ctx.output.kv("retries", &catalog.retries.to_string());
    if let Some(ms) = catalog.load_timeout_ms {
        ctx.output.kv("load_timeout_ms", &ms.to_string());
    }

    let images = &ctx.config.images;
    ctx.output.info("");
    ctx.output.info("[images]");
    ctx.output.kv("blocked_marker", &images.blocked_marker);
    ctx.output.kv("default", &images.default);
    for (category, path) in &images.categories {
        ctx.output.kv(&format!("categories.{}", category), path);
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv(
        "format",
        match ctx.config.logging.format {
            showroom_observability::LogFormat::Human => "human",
            showroom_observability::LogFormat::Json => "json",
        },
    );

    Ok(())
}

async fn init_config(catalog: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("showroom.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let source = catalog
        .map(|s| CatalogSource::parse(&s))
        .unwrap_or_default();
    fs::write(&config_path, generate_default_config(&source.to_string()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check(&ctx.cwd);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
