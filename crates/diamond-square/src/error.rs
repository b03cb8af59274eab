//! Error types for height-map generation.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TerrainError>;

/// One of the four corners of a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Cell coordinates `(x, y)` of this corner in a grid of the given width.
    pub fn position(self, width: usize) -> (usize, usize) {
        let last = width.saturating_sub(1);
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (last, 0),
            Corner::BottomLeft => (0, last),
            Corner::BottomRight => (last, last),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Grid corners must be seeded before generation (unseeded: {})", list_corners(.corners))]
    UnseededCorner { corners: Vec<Corner> },

    #[error("Cannot normalize a flat grid (every cell is {value})")]
    DegenerateRange { value: f64 },
}

fn list_corners(corners: &[Corner]) -> String {
    corners
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
