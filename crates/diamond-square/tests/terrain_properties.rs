//! End-to-end properties of the public generation API.
//!
//! Every test uses a fixed seed so failures reproduce exactly.

use diamond_square::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn generated_tiles_have_expected_side_and_no_gaps() {
    let mut rng = rng(12345);
    for size in 0..=7 {
        let grid = generate(size, &mut rng).unwrap();
        assert_eq!(grid.width(), (1usize << size) + 1);
        assert_eq!(grid.len(), grid.width() * grid.width());
        assert_eq!(grid.unassigned_count(), 0, "size {size}");
    }
}

#[test]
fn normalized_tiles_span_zero_to_one() {
    let mut rng = rng(12345);
    for size in 0..=6 {
        let grid = generate_normalized(size, &mut rng).unwrap();
        let (min, max) = grid.value_range().unwrap();
        assert_eq!((min, max), (0.0, 1.0), "size {size}");
    }
}

#[test]
fn flat_seeded_grid_normalizes_to_a_constant() {
    // A 2x2 grid has no interior; its four equal corners stay flat.
    let mut grid = Grid::for_exponent(0).unwrap();
    grid.seed_corners(0.5);
    complete_normalized(0, &mut grid, &mut rng(1)).unwrap();

    assert!(grid.values().iter().all(|&v| v == 0.0));
}

#[test]
fn same_seed_same_terrain() {
    let a = generate(6, &mut rng(31337)).unwrap();
    let b = generate(6, &mut rng(31337)).unwrap();
    assert_eq!(a.values(), b.values());

    let config = TerrainConfig {
        tile_size_exponent: 3,
        tiles_per_side: 3,
        seed: Some(4242),
        scan_order: ScanOrder::Wavefront,
    };
    let first = TerrainBuilder::from_config(&config)
        .build(&mut config.rng())
        .unwrap();
    let second = TerrainBuilder::from_config(&config)
        .build(&mut config.rng())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn seeded_corners_survive_generation() {
    let mut grid = Grid::for_exponent(5).unwrap();
    grid.seed_corners(0.5);
    complete(5, &mut grid, &mut rng(8)).unwrap();

    let w = grid.width();
    assert_eq!(grid.get(0, 0), Some(0.5));
    assert_eq!(grid.get(0, w - 1), Some(0.5));
    assert_eq!(grid.get(w - 1, 0), Some(0.5));
    assert_eq!(grid.get(w - 1, w - 1), Some(0.5));
}

#[test]
fn two_by_two_map_has_no_seams() {
    let terrain = build_terrain(2, 2, &mut rng(12345)).unwrap();
    let tile_width = 5;

    // Last column of tile (0,0) against first column of tile (1,0)
    for y in 0..tile_width {
        let left = terrain.get(tile_width - 1, y).unwrap();
        let right = terrain.get(tile_width, y).unwrap();
        assert_eq!(left.to_bits(), right.to_bits(), "row {y}");
    }

    // Bottom row of tile (0,0) against top row of tile (0,1)
    for x in 0..tile_width {
        let above = terrain.get(x, tile_width - 1).unwrap();
        let below = terrain.get(x, tile_width).unwrap();
        assert_eq!(above.to_bits(), below.to_bits(), "column {x}");
    }
}

#[test]
fn large_map_is_seamless_in_every_scan_order() {
    for order in [ScanOrder::RowMajor, ScanOrder::ColumnMajor, ScanOrder::Wavefront] {
        let tile_width = 9;
        let tiles = 4;
        let terrain = TerrainBuilder::new(3, tiles)
            .with_scan_order(order)
            .build(&mut rng(99))
            .unwrap();

        for border in 1..tiles {
            let b = border * tile_width;
            for k in 0..terrain.width() {
                assert_eq!(terrain.get(b - 1, k), terrain.get(b, k), "{order:?}");
                assert_eq!(terrain.get(k, b - 1), terrain.get(k, b), "{order:?}");
            }
        }
    }
}

#[test]
fn invalid_inputs_fail_before_mutation() {
    let mut wrong_size = Grid::new(4);
    wrong_size.seed_corners(0.5);
    let snapshot = wrong_size.clone();
    assert!(matches!(
        complete(2, &mut wrong_size, &mut rng(1)),
        Err(TerrainError::InvalidParameter(_))
    ));
    assert_eq!(wrong_size, snapshot);

    let mut no_corners = Grid::for_exponent(2).unwrap();
    assert!(matches!(
        complete(2, &mut no_corners, &mut rng(1)),
        Err(TerrainError::UnseededCorner { corners }) if corners.len() == 4
    ));
    assert_eq!(no_corners.unassigned_count(), 25);

    assert!(matches!(
        build_terrain(3, 0, &mut rng(1)),
        Err(TerrainError::InvalidParameter(_))
    ));
}
