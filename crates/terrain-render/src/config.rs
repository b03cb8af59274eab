//! Loading terrain configuration from JSON files.

use std::path::Path;

use diamond_square::config::TerrainConfig;

use crate::error::Result;

/// Reads and validates a [`TerrainConfig`] from a JSON file. Missing fields
/// take their defaults.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<TerrainConfig> {
    let raw = std::fs::read_to_string(path)?;
    let config: TerrainConfig = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
