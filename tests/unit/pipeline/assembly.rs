//! Validates canvas sizing, placement offsets, dimension checks, and
//! failure behavior of the assembly stage

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tempfile::tempdir;

use tilestitch::StitchError;
use tilestitch::grid::GridSpec;
use tilestitch::io::TileStore;
use tilestitch::pipeline::AssemblyStage;

fn write_solid_tile(dir: &Path, prefix: &str, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
    let tile = RgbImage::from_pixel(w, h, Rgb(color));
    let mut encoded = Cursor::new(Vec::new());
    tile.write_to(&mut encoded, ImageFormat::Png).unwrap();
    fs::write(dir.join(format!("{prefix}_{x}_{y}.png")), encoded.into_inner()).unwrap();
}

fn assert_color_near(actual: &Rgb<u8>, expected: [u8; 3], context: &str) {
    // JPEG is lossy; solid blocks stay well within this tolerance
    for (channel, (&a, &e)) in actual.0.iter().zip(expected.iter()).enumerate() {
        let difference = (i32::from(a) - i32::from(e)).abs();
        assert!(
            difference <= 24,
            "{context}: channel {channel} was {a}, expected about {e}"
        );
    }
}

#[test]
fn test_two_by_two_grid_placement() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    let red = [220, 30, 30];
    let green = [30, 220, 30];
    let blue = [30, 30, 220];
    let gray = [128, 128, 128];
    write_solid_tile(&converted_dir, "scan", 0, 0, 10, 10, red);
    write_solid_tile(&converted_dir, "scan", 0, 1, 10, 10, green);
    write_solid_tile(&converted_dir, "scan", 1, 0, 10, 10, blue);
    write_solid_tile(&converted_dir, "scan", 1, 1, 10, 10, gray);

    let grid = GridSpec::new(2, 2).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let path = AssemblyStage::run(&grid, &store, None).unwrap();
    let composite = image::open(&path).unwrap().to_rgb8();

    assert_eq!(composite.dimensions(), (20, 20));

    // Tile (x, y) occupies the region [10x, 10x+10) x [10y, 10y+10)
    assert_color_near(composite.get_pixel(5, 5), red, "tile (0, 0)");
    assert_color_near(composite.get_pixel(5, 15), green, "tile (0, 1)");
    assert_color_near(composite.get_pixel(15, 5), blue, "tile (1, 0)");
    assert_color_near(composite.get_pixel(15, 15), gray, "tile (1, 1)");
}

#[test]
fn test_heterogeneous_rows_and_columns() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    // Column widths 10 and 20, row heights 10 and 30
    let color = [90, 90, 90];
    write_solid_tile(&converted_dir, "scan", 0, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 0, 1, 10, 30, color);
    write_solid_tile(&converted_dir, "scan", 1, 0, 20, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 1, 20, 30, color);

    let grid = GridSpec::new(2, 2).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let path = AssemblyStage::run(&grid, &store, None).unwrap();
    let composite = image::open(&path).unwrap().to_rgb8();

    assert_eq!(composite.dimensions(), (30, 40));
}

#[test]
fn test_missing_tile_fails_and_leaves_no_output() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    let color = [90, 90, 90];
    write_solid_tile(&converted_dir, "scan", 0, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 0, 1, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 0, 10, 10, color);
    // (1, 1) deliberately absent

    let grid = GridSpec::new(2, 2).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let error = AssemblyStage::run(&grid, &store, None).unwrap_err();
    match error {
        StitchError::MissingTile { coordinate, .. } => {
            assert_eq!((coordinate.x, coordinate.y), (1, 1));
        }
        other => panic!("Expected MissingTile, got: {other}"),
    }

    assert!(!store.composite_path().exists());
}

#[test]
fn test_ragged_width_is_rejected() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    let color = [90, 90, 90];
    write_solid_tile(&converted_dir, "scan", 0, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 0, 1, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 1, 12, 10, color);

    let grid = GridSpec::new(2, 2).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let error = AssemblyStage::run(&grid, &store, None).unwrap_err();
    match error {
        StitchError::DimensionMismatch {
            coordinate,
            axis,
            expected,
            actual,
        } => {
            assert_eq!((coordinate.x, coordinate.y), (1, 1));
            assert_eq!(axis, "width");
            assert_eq!((expected, actual), (10, 12));
        }
        other => panic!("Expected DimensionMismatch, got: {other}"),
    }

    assert!(!store.composite_path().exists());
}

#[test]
fn test_ragged_height_is_rejected() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    let color = [90, 90, 90];
    write_solid_tile(&converted_dir, "scan", 0, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 0, 1, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 0, 10, 10, color);
    write_solid_tile(&converted_dir, "scan", 1, 1, 10, 12, color);

    let grid = GridSpec::new(2, 2).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let error = AssemblyStage::run(&grid, &store, None).unwrap_err();
    match error {
        StitchError::DimensionMismatch {
            coordinate, axis, ..
        } => {
            assert_eq!((coordinate.x, coordinate.y), (1, 1));
            assert_eq!(axis, "height");
        }
        other => panic!("Expected DimensionMismatch, got: {other}"),
    }
}

#[test]
fn test_single_tile_grid() {
    let workspace = tempdir().unwrap();
    let converted_dir = workspace.path().join("converted");
    fs::create_dir(&converted_dir).unwrap();

    write_solid_tile(&converted_dir, "scan", 0, 0, 7, 9, [10, 200, 60]);

    let grid = GridSpec::new(1, 1).unwrap();
    let store = TileStore::new(workspace.path(), &converted_dir, "scan")
        .with_composite_dir(workspace.path());

    let path = AssemblyStage::run(&grid, &store, None).unwrap();
    let composite = image::open(&path).unwrap().to_rgb8();
    assert_eq!(composite.dimensions(), (7, 9));
}
