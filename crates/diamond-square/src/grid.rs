//! Square height-map grids with explicit per-cell assignment tracking.

use crate::error::{Corner, Result, TerrainError};

/// Largest accepted size exponent for a single grid (side `2^16 + 1`).
pub const MAX_SIZE_EXPONENT: u32 = 16;

/// Returns the side length `2^size + 1` of a grid with the given size exponent.
pub fn side_for_exponent(size: u32) -> Result<usize> {
    if size > MAX_SIZE_EXPONENT {
        return Err(TerrainError::InvalidParameter(format!(
            "size exponent {size} exceeds the maximum of {MAX_SIZE_EXPONENT}"
        )));
    }
    Ok((1usize << size) + 1)
}

/// Number of cells in a `width x width` grid, rejecting widths of zero and
/// grids whose value buffer could not be allocated.
pub fn cell_count(width: usize) -> Result<usize> {
    if width == 0 {
        return Err(TerrainError::InvalidParameter(
            "grid width must be at least 1".into(),
        ));
    }
    width
        .checked_mul(width)
        .filter(|&cells| {
            cells
                .checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            TerrainError::InvalidParameter(format!("a {width}x{width} grid is too large"))
        })
}

/// A square grid of elevation values.
///
/// Values are stored row-major (`index = y * width + x`). Each cell carries an
/// "assigned" flag alongside its value, so `0.0` is an ordinary elevation and
/// never doubles as a marker for missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    values: Vec<f64>,
    assigned: Vec<bool>,
}

impl Grid {
    /// Creates a grid of the given side length with every cell unassigned.
    ///
    /// # Panics
    ///
    /// Panics if `width * width` overflows or the buffer cannot be allocated.
    /// Use [`Grid::try_new`] for widths that come from user input.
    pub fn new(width: usize) -> Self {
        let len = width
            .checked_mul(width)
            .unwrap_or_else(|| panic!("{width}x{width} grid overflows usize"));
        Self {
            width,
            values: vec![0.0; len],
            assigned: vec![false; len],
        }
    }

    /// Fallible [`Grid::new`]: rejects a zero width and sizes that could not
    /// be allocated.
    pub fn try_new(width: usize) -> Result<Self> {
        cell_count(width)?;
        Ok(Self::new(width))
    }

    /// Creates an empty grid of side `2^size + 1`.
    pub fn for_exponent(size: u32) -> Result<Self> {
        Self::try_new(side_for_exponent(size)?)
    }

    /// Creates a fully assigned grid from row-major values.
    pub fn from_values(width: usize, values: Vec<f64>) -> Result<Self> {
        let expected = width.checked_mul(width);
        if expected != Some(values.len()) {
            return Err(TerrainError::InvalidParameter(format!(
                "expected {width}x{width} values, got {}",
                values.len()
            )));
        }
        let assigned = vec![true; values.len()];
        Ok(Self {
            width,
            values,
            assigned,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.width).then(|| y * self.width + x)
    }

    /// Returns the value at `(x, y)`, or `None` if the cell is out of range or
    /// has not been assigned yet.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        let idx = self.index(x, y)?;
        self.assigned[idx].then(|| self.values[idx])
    }

    pub fn is_assigned(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|idx| self.assigned[idx])
    }

    /// Assigns `value` to the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(
            x < self.width && y < self.width,
            "cell ({x}, {y}) outside {w}x{w} grid",
            w = self.width
        );
        let idx = y * self.width + x;
        self.values[idx] = value;
        self.assigned[idx] = true;
    }

    /// Assigns `value` only if the cell is still unassigned. Returns whether
    /// the cell was written.
    pub fn set_if_unassigned(&mut self, x: usize, y: usize, value: f64) -> bool {
        if self.is_assigned(x, y) {
            return false;
        }
        self.set(x, y, value);
        true
    }

    /// Assigns the same value to all four corners.
    ///
    /// # Panics
    ///
    /// Panics on a grid of width zero, which has no corners.
    pub fn seed_corners(&mut self, value: f64) {
        for corner in Corner::ALL {
            let (x, y) = corner.position(self.width);
            self.set(x, y, value);
        }
    }

    /// Corners that have not been assigned yet.
    pub fn unseeded_corners(&self) -> Vec<Corner> {
        Corner::ALL
            .into_iter()
            .filter(|corner| {
                let (x, y) = corner.position(self.width);
                !self.is_assigned(x, y)
            })
            .collect()
    }

    /// True once every cell has been assigned.
    pub fn is_complete(&self) -> bool {
        self.assigned.iter().all(|&a| a)
    }

    /// Number of cells still waiting for a value.
    pub fn unassigned_count(&self) -> usize {
        self.assigned.iter().filter(|&&a| !a).count()
    }

    /// Dense row-major view of all values. Unassigned cells read as `0.0`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// One row of the grid.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not less than the grid width.
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.values[start..start + self.width]
    }

    /// Minimum and maximum over assigned cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.assigned_values().fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub(crate) fn assigned_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(&self.assigned)
            .filter_map(|(&v, &a)| a.then_some(v))
    }

    /// Applies `f` to every assigned cell.
    pub(crate) fn map_assigned(&mut self, mut f: impl FnMut(f64) -> f64) {
        for (value, &assigned) in self.values.iter_mut().zip(&self.assigned) {
            if assigned {
                *value = f(*value);
            }
        }
    }

    /// Consumes the grid, returning the row-major value buffer.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_for_exponent() {
        assert_eq!(side_for_exponent(0).unwrap(), 2);
        assert_eq!(side_for_exponent(1).unwrap(), 3);
        assert_eq!(side_for_exponent(2).unwrap(), 5);
        assert_eq!(side_for_exponent(4).unwrap(), 17);
        assert!(matches!(
            side_for_exponent(MAX_SIZE_EXPONENT + 1),
            Err(TerrainError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_try_new_rejects_unallocatable_sizes() {
        assert_eq!(cell_count(5).unwrap(), 25);
        assert!(matches!(cell_count(0), Err(TerrainError::InvalidParameter(_))));
        // Fits in usize as a cell count, but not as a byte count
        assert!(matches!(
            cell_count(1usize << 31),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            Grid::try_new(usize::MAX),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert_eq!(Grid::try_new(3).unwrap().len(), 9);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_new_panics_on_overflowing_width() {
        let _ = Grid::new(usize::MAX);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_seed_corners_panics_on_empty_grid() {
        Grid::new(0).seed_corners(0.5);
    }

    #[test]
    #[should_panic]
    fn test_row_panics_past_last_row() {
        let _ = Grid::new(2).row(2);
    }

    #[test]
    fn test_zero_is_a_valid_elevation() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.get(1, 1), None);

        grid.set(1, 1, 0.0);
        assert_eq!(grid.get(1, 1), Some(0.0));
        assert!(grid.is_assigned(1, 1));
        assert!(!grid.set_if_unassigned(1, 1, 0.75));
        assert_eq!(grid.get(1, 1), Some(0.0));
    }

    #[test]
    fn test_out_of_range_reads() {
        let grid = Grid::from_values(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(grid.get(1, 1), Some(4.0));
        assert_eq!(grid.get(2, 0), None);
        assert!(!grid.is_assigned(0, 2));
        assert_eq!(grid.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        let result = Grid::from_values(3, vec![0.0; 8]);
        assert!(matches!(result, Err(TerrainError::InvalidParameter(_))));
    }

    #[test]
    fn test_corner_tracking() {
        let mut grid = Grid::new(5);
        assert_eq!(grid.unseeded_corners().len(), 4);

        grid.set(4, 0, 0.3);
        assert_eq!(
            grid.unseeded_corners(),
            vec![Corner::TopLeft, Corner::BottomLeft, Corner::BottomRight]
        );

        grid.seed_corners(0.5);
        assert!(grid.unseeded_corners().is_empty());
        assert_eq!(grid.get(4, 4), Some(0.5));
        assert_eq!(grid.unassigned_count(), 21);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_value_range_ignores_unassigned() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.value_range(), None);

        grid.set(0, 0, -2.0);
        grid.set(2, 2, 3.5);
        assert_eq!(grid.value_range(), Some((-2.0, 3.5)));
    }
}
