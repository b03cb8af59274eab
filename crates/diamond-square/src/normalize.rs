//! Linear rescaling of grid values into `[0, 1]`.

use crate::error::{Result, TerrainError};
use crate::grid::Grid;

/// Minimum and maximum of a grid before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when every value is equal and no rescaling is possible.
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }
}

/// Rescales every assigned cell to `(v - min) / (max - min)`.
///
/// A flat grid (`max == min`) cannot be stretched; every assigned cell is set
/// to `0.0` instead. Grids with no assigned cells are left as they are and
/// report an empty `0..0` range.
pub fn normalize(grid: &mut Grid) -> ValueRange {
    match try_normalize(grid) {
        Ok(range) => range,
        Err(TerrainError::DegenerateRange { value }) => {
            tracing::warn!(
                value,
                width = grid.width(),
                "Flat grid cannot be normalized, mapping every cell to 0"
            );
            grid.map_assigned(|_| 0.0);
            ValueRange {
                min: value,
                max: value,
            }
        }
        Err(_) => ValueRange { min: 0.0, max: 0.0 },
    }
}

/// Strict variant of [`normalize`].
///
/// Returns [`TerrainError::DegenerateRange`] for a flat grid and
/// [`TerrainError::InvalidParameter`] for a grid without assigned cells,
/// leaving the grid untouched in both cases.
pub fn try_normalize(grid: &mut Grid) -> Result<ValueRange> {
    let (min, max) = grid.value_range().ok_or_else(|| {
        TerrainError::InvalidParameter("cannot normalize a grid with no assigned cells".into())
    })?;

    let range = ValueRange { min, max };
    if range.is_degenerate() {
        return Err(TerrainError::DegenerateRange { value: min });
    }

    let span = range.span();
    grid.map_assigned(|v| (v - min) / span);
    Ok(range)
}
