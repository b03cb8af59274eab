//! Builds a composite terrain and writes it as a PNG.
//!
//! Run with:
//! ```
//! TERRAIN_TILE_EXPONENT=7 TERRAIN_TILES=4 TERRAIN_SEED=12345 \
//!     cargo run -p terrain-render --bin build-terrain
//! ```
//!
//! Settings are read from the JSON file named by `TERRAIN_CONFIG` (if set),
//! then overridden by `TERRAIN_TILE_EXPONENT`, `TERRAIN_TILES`,
//! `TERRAIN_SEED` and `TERRAIN_SCAN_ORDER`. The image goes to
//! `TERRAIN_OUTPUT` (default `terrain.png`).

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use diamond_square::prelude::*;
use terrain_render::{Gradient, load_config_file, save_png};
use tracing_subscriber::EnvFilter;

fn load_config() -> anyhow::Result<TerrainConfig> {
    let mut config = match env::var("TERRAIN_CONFIG") {
        Ok(path) => {
            load_config_file(&path).with_context(|| format!("loading config file {path}"))?
        }
        Err(_) => TerrainConfig::default(),
    };

    if let Ok(value) = env::var("TERRAIN_TILE_EXPONENT") {
        config.tile_size_exponent = value
            .parse()
            .context("TERRAIN_TILE_EXPONENT must be a non-negative integer")?;
    }
    if let Ok(value) = env::var("TERRAIN_TILES") {
        config.tiles_per_side = value
            .parse()
            .context("TERRAIN_TILES must be a positive integer")?;
    }
    if let Ok(value) = env::var("TERRAIN_SEED") {
        config.seed = Some(value.parse().context("TERRAIN_SEED must be an integer")?);
    }
    if let Ok(value) = env::var("TERRAIN_SCAN_ORDER") {
        config.scan_order = value.parse()?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let output = env::var("TERRAIN_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("terrain.png"));

    tracing::info!(?config, "Loaded terrain configuration");

    let mut rng = config.rng();
    let built = TerrainBuilder::from_config(&config).build_with_stats(&mut rng)?;

    save_png(&built.grid, &Gradient::terrain(), &output)?;

    // Summary output
    let stats = &built.stats;
    tracing::info!("Terrain completed!");
    tracing::info!(
        "  Tiles: {} ({}x{} cells each)",
        stats.tile_count,
        stats.tile_width,
        stats.tile_width
    );
    tracing::info!("  Size: {}x{}", stats.side, stats.side);
    tracing::info!("  Raw range: {:.4} .. {:.4}", stats.raw_range.min, stats.raw_range.max);
    tracing::info!("  Generation time: {} ms", stats.generation_time_ms);
    tracing::info!("  Output: {}", output.display());

    Ok(())
}
