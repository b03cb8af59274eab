//! The diamond-square subdivision engine.
//!
//! A grid of side `2^n + 1` is refined in `n` passes. Pass `d` works on a
//! lattice with offset `o = 2^(n - d - 1)`:
//!
//! - the **square** step fills each cell centre from its four diagonal
//!   neighbours at distance `o`, perturbed with magnitude `d`;
//! - the **diamond** step fills each edge midpoint from its four orthogonal
//!   neighbours at distance `o`, perturbed with magnitude `d + 1`.
//!
//! Cells that already hold a value are never overwritten, which is what lets
//! the compositor pre-seed shared tile borders.

use rand::Rng;

use crate::error::{Result, TerrainError};
use crate::grid::{Grid, side_for_exponent};
use crate::normalize::normalize;

/// Generates a fully random grid of side `2^size + 1`.
///
/// The four corners are drawn uniformly from `[0, 1)`; interior values are
/// unconstrained.
pub fn generate(size: u32, rng: &mut impl Rng) -> Result<Grid> {
    let mut grid = Grid::for_exponent(size)?;
    seed_random_corners(&mut grid, rng);

    complete(size, &mut grid, rng)?;
    Ok(grid)
}

/// Like [`generate`], with the result rescaled into `[0, 1]`.
pub fn generate_normalized(size: u32, rng: &mut impl Rng) -> Result<Grid> {
    let mut grid = generate(size, rng)?;
    normalize(&mut grid);
    Ok(grid)
}

/// Completes a partially seeded grid in place.
///
/// The grid must have side `2^size + 1` and all four corners assigned; any
/// other assigned cells are kept as they are. Nothing is written if either
/// precondition fails.
pub fn complete(size: u32, grid: &mut Grid, rng: &mut impl Rng) -> Result<()> {
    let expected = side_for_exponent(size)?;
    if grid.width() != expected {
        return Err(TerrainError::InvalidParameter(format!(
            "grid width {} does not match 2^{size}+1 = {expected}",
            grid.width()
        )));
    }

    let corners = grid.unseeded_corners();
    if !corners.is_empty() {
        return Err(TerrainError::UnseededCorner { corners });
    }

    for depth in 0..size {
        let offset = 1usize << (size - depth - 1);
        square_step(grid, offset, depth, rng);
        diamond_step(grid, offset, depth + 1, rng);
        tracing::trace!(depth, offset, "Completed diamond-square pass");
    }

    Ok(())
}

/// Completes a partially seeded grid in place and normalizes it.
pub fn complete_normalized(size: u32, grid: &mut Grid, rng: &mut impl Rng) -> Result<()> {
    complete(size, grid, rng)?;
    normalize(grid);
    Ok(())
}

/// Assigns a fresh `[0, 1)` value to every corner that is still unassigned.
pub(crate) fn seed_random_corners(grid: &mut Grid, rng: &mut impl Rng) {
    for corner in grid.unseeded_corners() {
        let (x, y) = corner.position(grid.width());
        grid.set(x, y, rng.r#gen::<f64>());
    }
}

fn square_step(grid: &mut Grid, offset: usize, magnitude: u32, rng: &mut impl Rng) {
    let width = grid.width();
    for y in (offset..width).step_by(2 * offset) {
        for x in (offset..width).step_by(2 * offset) {
            if grid.is_assigned(x, y) {
                continue;
            }
            let neighbours = [
                neighbour(grid, x, y, -1, -1, offset),
                neighbour(grid, x, y, 1, -1, offset),
                neighbour(grid, x, y, -1, 1, offset),
                neighbour(grid, x, y, 1, 1, offset),
            ];
            grid.set(x, y, average_with_displacement(neighbours, magnitude, rng));
        }
    }
}

fn diamond_step(grid: &mut Grid, offset: usize, magnitude: u32, rng: &mut impl Rng) {
    let width = grid.width();
    for (row, y) in (0..width).step_by(offset).enumerate() {
        // Even lattice rows hold midpoints between columns, odd rows sit on them.
        let start = if row % 2 == 0 { offset } else { 0 };
        for x in (start..width).step_by(2 * offset) {
            if grid.is_assigned(x, y) {
                continue;
            }
            let neighbours = [
                neighbour(grid, x, y, -1, 0, offset),
                neighbour(grid, x, y, 1, 0, offset),
                neighbour(grid, x, y, 0, -1, offset),
                neighbour(grid, x, y, 0, 1, offset),
            ];
            grid.set(x, y, average_with_displacement(neighbours, magnitude, rng));
        }
    }
}

/// Value of the cell `offset` steps away in direction `(dx, dy)`, if it lies
/// inside the grid and has been assigned.
fn neighbour(grid: &Grid, x: usize, y: usize, dx: isize, dy: isize, offset: usize) -> Option<f64> {
    let nx = x.checked_add_signed(dx * offset as isize)?;
    let ny = y.checked_add_signed(dy * offset as isize)?;
    grid.get(nx, ny)
}

/// Average of the present neighbours plus `(U(0,1) - 0.5) / 2^magnitude`.
fn average_with_displacement(
    neighbours: [Option<f64>; 4],
    magnitude: u32,
    rng: &mut impl Rng,
) -> f64 {
    average_present(neighbours) + displacement(rng.r#gen::<f64>(), magnitude)
}

fn average_present(neighbours: [Option<f64>; 4]) -> f64 {
    let (sum, count) = neighbours
        .iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

fn displacement(sample: f64, magnitude: u32) -> f64 {
    (sample - 0.5) / 2f64.powi(magnitude as i32)
}
