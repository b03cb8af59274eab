//! Configuration types for terrain generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::MAX_SIZE_EXPONENT;

/// Order in which the compositor visits tiles.
///
/// Every variant visits a tile only after its left and top neighbours, so each
/// shared border is copied from whichever of its two tiles was generated first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Row by row, left to right within each row.
    #[default]
    RowMajor,
    /// Column by column, top to bottom within each column.
    ColumnMajor,
    /// Anti-diagonals `column + row = k` in increasing `k`.
    Wavefront,
}

impl std::str::FromStr for ScanOrder {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "row_major" => Ok(Self::RowMajor),
            "column_major" => Ok(Self::ColumnMajor),
            "wavefront" => Ok(Self::Wavefront),
            other => Err(TerrainError::InvalidParameter(format!(
                "unknown scan order '{other}'"
            ))),
        }
    }
}

/// Configuration for building a composite terrain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Tile side exponent; each tile is `2^n + 1` cells wide.
    pub tile_size_exponent: u32,

    /// Number of tiles along each side of the map.
    pub tiles_per_side: usize,

    /// Seed for the random source. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Tile visiting order.
    pub scan_order: ScanOrder,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size_exponent: 6,
            tiles_per_side: 4,
            seed: None,
            scan_order: ScanOrder::default(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tile_size_exponent > MAX_SIZE_EXPONENT {
            return Err(TerrainError::InvalidParameter(format!(
                "tile_size_exponent {} exceeds the maximum of {MAX_SIZE_EXPONENT}",
                self.tile_size_exponent
            )));
        }
        if self.tiles_per_side == 0 {
            return Err(TerrainError::InvalidParameter(
                "tiles_per_side must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Builds the random source described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
