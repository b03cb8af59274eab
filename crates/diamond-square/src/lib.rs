//! Diamond-square height-map generation.
//!
//! This crate generates fractal terrain height-maps with the diamond-square
//! subdivision algorithm and stitches many independently generated tiles into
//! one seamless composite by sharing border values between neighbours.
//!
//! # Quick Start
//!
//! ```rust
//! use diamond_square::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
//!
//! // A single 33x33 tile with values in [0, 1]
//! let tile = generate_normalized(5, &mut rng)?;
//! assert_eq!(tile.width(), 33);
//!
//! // A 4x4 map of 17x17 tiles, normalized as a whole
//! let terrain = build_terrain(4, 4, &mut rng)?;
//! assert_eq!(terrain.width(), 68);
//! # Ok::<(), diamond_square::TerrainError>(())
//! ```

pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod normalize;

pub use error::{Result, TerrainError};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::compositor::{
        BuiltTerrain, GenerationRecord, TerrainBuilder, TerrainStats, TileCoord, build_terrain,
    };
    pub use crate::config::{ScanOrder, TerrainConfig};
    pub use crate::engine::{complete, complete_normalized, generate, generate_normalized};
    pub use crate::error::{Corner, TerrainError};
    pub use crate::grid::{Grid, MAX_SIZE_EXPONENT, side_for_exponent};
    pub use crate::normalize::{ValueRange, normalize, try_normalize};
}
