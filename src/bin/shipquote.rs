//! Command-line shipping quotes.
//!
//! ```text
//! shipquote --dest 10001 --weight 12 --dims 10x8x4 --all
//! ```
//!
//! Quotes are printed to stdout as JSON; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use shipquote::application::config::EngineConfig;
use shipquote::application::services::ShippingRateEngine;
use shipquote::domain::value_objects::{PackageSpec, PostalCode, RawPackage, ServiceTier};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shipquote", version, about = "Shipping rate quotes")]
struct Cli {
    /// Destination postal code (12345 or 12345-6789).
    #[arg(long)]
    dest: String,

    /// Package weight; values up to 50 are ounces, larger values pounds.
    #[arg(long)]
    weight: Option<String>,

    /// Package dimensions in inches, e.g. 10x8x4.
    #[arg(long)]
    dims: Option<String>,

    /// Shipping option: calculated, free or flat.
    #[arg(long)]
    option: Option<String>,

    /// Flat rate in dollars, for --option flat.
    #[arg(long)]
    flat_rate: Option<String>,

    /// Service tier to quote (economy, ground, priority).
    #[arg(long, conflicts_with = "all")]
    tier: Option<ServiceTier>,

    /// List every offered option instead of a single quote.
    #[arg(long)]
    all: bool,

    /// Configuration file (TOML, JSON or YAML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never contact the carrier.
    #[arg(long)]
    offline: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = EngineConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let destination: PostalCode = cli
        .dest
        .parse()
        .with_context(|| format!("invalid destination postal code {:?}", cli.dest))?;
    let package = PackageSpec::from_raw(&RawPackage {
        weight: cli.weight,
        dimensions: cli.dims,
        shipping_option: cli.option,
        flat_rate: cli.flat_rate,
    });

    let engine = if cli.offline {
        ShippingRateEngine::offline(config)?
    } else {
        ShippingRateEngine::connect(config).await?
    };

    let output = if cli.all {
        let quotes = engine.list_shipping_options(&package, &destination).await;
        serde_json::to_string_pretty(&quotes)?
    } else {
        let quote = match cli.tier {
            Some(tier) => engine.quote_tier(&package, &destination, tier).await,
            None => engine.compute_shipping_quote(&package, &destination).await,
        };
        serde_json::to_string_pretty(&quote)?
    };

    println!("{output}");
    Ok(())
}
