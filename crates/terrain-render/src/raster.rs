//! Rendering finished height-maps to RGB images.

use std::path::Path;

use diamond_square::grid::Grid;
use image::RgbImage;

use crate::error::Result;
use crate::gradient::Gradient;

/// Renders one pixel per cell, pixel `(x, y)` taking the colour of cell `(x, y)`.
///
/// Unassigned cells are drawn with the colour of `0.0`.
pub fn render(grid: &Grid, gradient: &Gradient) -> Result<RgbImage> {
    let width = grid.width() as u32;
    let mut image = RgbImage::new(width, width);
    for y in 0..grid.width() {
        for (x, &value) in grid.row(y).iter().enumerate() {
            let value = if grid.is_assigned(x, y) { value } else { 0.0 };
            image.put_pixel(x as u32, y as u32, gradient.color_at(value)?);
        }
    }
    Ok(image)
}

/// Renders `grid` and writes it as a PNG file.
pub fn save_png(grid: &Grid, gradient: &Gradient, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let image = render(grid, gradient)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!(path = %path.display(), width = grid.width(), "Saved terrain image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gray() -> Gradient {
        Gradient::new()
            .with_stop(0.0, [0, 0, 0])
            .unwrap()
            .with_stop(1.0, [255, 255, 255])
            .unwrap()
    }

    #[test]
    fn test_render_one_pixel_per_cell() {
        let grid = Grid::from_values(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        let image = render(&grid, &gray()).unwrap();

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(0, 1), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_unassigned_cells_render_as_zero() {
        let mut grid = Grid::new(2);
        grid.set(0, 0, 1.0);
        let image = render(&grid, &gray()).unwrap();

        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_png_round_trips_dimensions() {
        use diamond_square::prelude::build_terrain;
        use rand::SeedableRng;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.png");
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
        let terrain = build_terrain(3, 2, &mut rng).unwrap();

        save_png(&terrain, &Gradient::terrain(), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (18, 18));
    }
}
