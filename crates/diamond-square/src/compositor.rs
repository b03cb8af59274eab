//! Seamless composition of many diamond-square tiles into one terrain.
//!
//! Tiles are generated one at a time. Before a tile is generated, every
//! border it shares with an already completed neighbour is copied into it, so
//! the two tiles agree cell-for-cell along that border. Corners that no
//! neighbour supplied are drawn fresh from the random source. Once all tiles
//! are in place the whole composite is normalized in a single pass.

use std::time::Instant;

use rand::Rng;

use crate::config::{ScanOrder, TerrainConfig};
use crate::engine::{complete, seed_random_corners};
use crate::error::{Result, TerrainError};
use crate::grid::{Grid, cell_count, side_for_exponent};
use crate::normalize::{ValueRange, normalize};

/// Position of a tile within the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub column: usize,
    pub row: usize,
}

impl TileCoord {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// The adjacent tile on `side`, if it lies inside a map of
    /// `tiles_per_side` tiles.
    pub fn neighbour(self, side: Side, tiles_per_side: usize) -> Option<TileCoord> {
        let (column, row) = match side {
            Side::Left => (self.column.checked_sub(1)?, self.row),
            Side::Top => (self.column, self.row.checked_sub(1)?),
            Side::Right => (self.column + 1, self.row),
            Side::Bottom => (self.column, self.row + 1),
        };
        (column < tiles_per_side && row < tiles_per_side).then_some(TileCoord { column, row })
    }
}

/// A tile border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    /// Seeding order. Where two copied borders meet at a corner, the earlier
    /// side wins.
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];
}

impl ScanOrder {
    /// Every tile of a `tiles_per_side` square map, in visiting order.
    pub fn tiles(self, tiles_per_side: usize) -> Vec<TileCoord> {
        let m = tiles_per_side;
        match self {
            ScanOrder::RowMajor => (0..m)
                .flat_map(|row| (0..m).map(move |column| TileCoord::new(column, row)))
                .collect(),
            ScanOrder::ColumnMajor => (0..m)
                .flat_map(|column| (0..m).map(move |row| TileCoord::new(column, row)))
                .collect(),
            ScanOrder::Wavefront => (0..(2 * m).saturating_sub(1))
                .flat_map(|k| {
                    let first = k.saturating_sub(m - 1);
                    let last = k.min(m - 1);
                    (first..=last).map(move |column| TileCoord::new(column, k - column))
                })
                .collect(),
        }
    }
}

/// Which tiles have been copied into the composite. Each tile is marked once.
#[derive(Debug, Clone)]
pub struct GenerationRecord {
    tiles_per_side: usize,
    filled: Vec<bool>,
}

impl GenerationRecord {
    pub fn new(tiles_per_side: usize) -> Self {
        Self {
            tiles_per_side,
            filled: vec![false; tiles_per_side * tiles_per_side],
        }
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        (coord.column < self.tiles_per_side && coord.row < self.tiles_per_side)
            .then(|| coord.row * self.tiles_per_side + coord.column)
    }

    /// False for tiles outside the map.
    pub fn is_complete(&self, coord: TileCoord) -> bool {
        self.index(coord).is_some_and(|idx| self.filled[idx])
    }

    pub fn mark_complete(&mut self, coord: TileCoord) -> Result<()> {
        let idx = self.index(coord).ok_or_else(|| {
            TerrainError::InvalidParameter(format!(
                "tile ({}, {}) outside a {n}x{n} map",
                coord.column,
                coord.row,
                n = self.tiles_per_side
            ))
        })?;
        if self.filled[idx] {
            return Err(TerrainError::InvalidParameter(format!(
                "tile ({}, {}) was already generated",
                coord.column, coord.row
            )));
        }
        self.filled[idx] = true;
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }
}

/// Sides of `coord` whose neighbouring tile is already complete.
pub fn completed_neighbours(record: &GenerationRecord, coord: TileCoord) -> Vec<Side> {
    Side::ALL
        .into_iter()
        .filter(|&side| {
            coord
                .neighbour(side, record.tiles_per_side)
                .is_some_and(|n| record.is_complete(n))
        })
        .collect()
}

/// Builds the seeded buffer for the tile at `coord`.
///
/// For each completed neighbour, the row or column of the composite lying
/// directly across the shared border is copied onto the matching edge of the
/// new tile, skipping cells an earlier side already wrote. Corners left
/// unassigned afterwards receive fresh random values.
pub fn seed_tile(
    composite: &Grid,
    record: &GenerationRecord,
    coord: TileCoord,
    tile_width: usize,
    rng: &mut impl Rng,
) -> Grid {
    let mut tile = Grid::new(tile_width);
    let x0 = coord.column * tile_width;
    let y0 = coord.row * tile_width;
    let last = tile_width - 1;

    for side in completed_neighbours(record, coord) {
        for k in 0..tile_width {
            // (source cell in the composite, destination cell in the tile)
            let ((sx, sy), (dx, dy)) = match side {
                Side::Left => ((x0 - 1, y0 + k), (0, k)),
                Side::Top => ((x0 + k, y0 - 1), (k, 0)),
                Side::Right => ((x0 + tile_width, y0 + k), (last, k)),
                Side::Bottom => ((x0 + k, y0 + tile_width), (k, last)),
            };
            if let Some(value) = composite.get(sx, sy) {
                tile.set_if_unassigned(dx, dy, value);
            }
        }
    }

    seed_random_corners(&mut tile, rng);
    tile
}

fn place_tile(composite: &mut Grid, tile: &Grid, coord: TileCoord) {
    let width = tile.width();
    let x0 = coord.column * width;
    let y0 = coord.row * width;
    for y in 0..width {
        for (x, &value) in tile.row(y).iter().enumerate() {
            composite.set(x0 + x, y0 + y, value);
        }
    }
}

/// Summary of a terrain build.
#[derive(Debug, Clone)]
pub struct TerrainStats {
    pub tile_count: usize,
    pub tile_width: usize,
    /// Side length of the composite in cells.
    pub side: usize,
    /// Value range before the final normalization.
    pub raw_range: ValueRange,
    pub generation_time_ms: u64,
}

/// A finished composite terrain and its build statistics.
#[derive(Debug, Clone)]
pub struct BuiltTerrain {
    pub grid: Grid,
    pub stats: TerrainStats,
}

/// Builder for composite terrains.
///
/// # Example
///
/// ```rust
/// use diamond_square::prelude::*;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
/// let terrain = TerrainBuilder::new(3, 2)
///     .with_scan_order(ScanOrder::Wavefront)
///     .build(&mut rng)
///     .unwrap();
/// assert_eq!(terrain.width(), 18);
/// ```
#[derive(Debug, Clone)]
pub struct TerrainBuilder {
    tile_size_exponent: u32,
    tiles_per_side: usize,
    scan_order: ScanOrder,
}

impl TerrainBuilder {
    pub fn new(tile_size_exponent: u32, tiles_per_side: usize) -> Self {
        Self {
            tile_size_exponent,
            tiles_per_side,
            scan_order: ScanOrder::default(),
        }
    }

    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(config.tile_size_exponent, config.tiles_per_side)
            .with_scan_order(config.scan_order)
    }

    pub fn with_scan_order(mut self, order: ScanOrder) -> Self {
        self.scan_order = order;
        self
    }

    /// Builds the normalized composite terrain.
    pub fn build(&self, rng: &mut impl Rng) -> Result<Grid> {
        self.build_with_stats(rng).map(|built| built.grid)
    }

    /// Builds the normalized composite terrain and reports what was done.
    pub fn build_with_stats(&self, rng: &mut impl Rng) -> Result<BuiltTerrain> {
        let tile_width = side_for_exponent(self.tile_size_exponent)?;
        let side = self.composite_side(tile_width)?;
        let start = Instant::now();

        tracing::info!(
            tile_width,
            tiles_per_side = self.tiles_per_side,
            side,
            scan_order = ?self.scan_order,
            "Building terrain"
        );

        let mut composite = Grid::try_new(side)?;
        let mut record = GenerationRecord::new(self.tiles_per_side);

        for coord in self.scan_order.tiles(self.tiles_per_side) {
            tracing::debug!(
                column = coord.column,
                row = coord.row,
                shared = ?completed_neighbours(&record, coord),
                "Generating tile"
            );
            let mut tile = seed_tile(&composite, &record, coord, tile_width, rng);
            complete(self.tile_size_exponent, &mut tile, rng)?;
            place_tile(&mut composite, &tile, coord);
            record.mark_complete(coord)?;
        }

        let raw_range = normalize(&mut composite);
        let generation_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            tiles = record.completed_count(),
            side,
            raw_min = raw_range.min,
            raw_max = raw_range.max,
            generation_time_ms,
            "Terrain complete"
        );

        Ok(BuiltTerrain {
            grid: composite,
            stats: TerrainStats {
                tile_count: record.completed_count(),
                tile_width,
                side,
                raw_range,
                generation_time_ms,
            },
        })
    }

    fn composite_side(&self, tile_width: usize) -> Result<usize> {
        if self.tiles_per_side == 0 {
            return Err(TerrainError::InvalidParameter(
                "tiles_per_side must be at least 1".into(),
            ));
        }
        tile_width
            .checked_mul(self.tiles_per_side)
            .filter(|&side| cell_count(side).is_ok())
            .ok_or_else(|| {
                TerrainError::InvalidParameter(format!(
                    "a {n}x{n} map of {tile_width}-cell tiles is too large",
                    n = self.tiles_per_side
                ))
            })
    }
}

/// Builds a normalized terrain of side `(2^tile_size_exponent + 1) * tiles_per_side`
/// using the default scan order.
pub fn build_terrain(
    tile_size_exponent: u32,
    tiles_per_side: usize,
    rng: &mut impl Rng,
) -> Result<Grid> {
    TerrainBuilder::new(tile_size_exponent, tiles_per_side).build(rng)
}
