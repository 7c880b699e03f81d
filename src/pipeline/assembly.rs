//! Sequential grid assembly onto a single canvas
//!
//! Placement offsets are prefix sums over a fixed traversal order: columns
//! outer in x order, rows inner in y order, with the y offset reset at the
//! start of each column. The canvas is sized from the first row's widths
//! and the first column's heights; every other tile is validated against
//! those references before any pixel is placed.

use std::path::PathBuf;

use image::{RgbImage, imageops};

use crate::grid::{GridSpec, TileCoordinate};
use crate::io::error::{Result, StitchError};
use crate::io::progress::ProgressManager;
use crate::io::store::TileStore;

/// Sequential assembly stage compositing converted tiles into one image
///
/// Pure placement: no resampling, color conversion, or blending. Tiles are
/// pixel-for-pixel final after conversion.
pub struct AssemblyStage;

impl AssemblyStage {
    /// Load every converted tile, composite, and serialize as JPEG
    ///
    /// Returns the path of the composite image, `{prefix}.jpg` in the
    /// working directory. Running twice over the same converted tile set
    /// produces identical output.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::MissingTile`] or [`StitchError::Decode`] for
    /// an absent or corrupt converted tile, [`StitchError::DimensionMismatch`]
    /// when a tile disagrees with its row or column reference dimensions,
    /// and an export error if the composite cannot be written. No partial
    /// output file is left in place on failure.
    pub fn run(
        grid: &GridSpec,
        store: &TileStore,
        progress: Option<&ProgressManager>,
    ) -> Result<PathBuf> {
        let columns = load_columns(grid, store, progress)?;
        validate_dimensions(&columns)?;

        let total_width: u32 = columns
            .iter()
            .filter_map(|column| column.first())
            .map(RgbImage::width)
            .sum();
        let total_height: u32 = columns
            .first()
            .map_or(0, |column| column.iter().map(RgbImage::height).sum());

        let mut canvas = RgbImage::new(total_width, total_height);

        let mut x_offset = 0_i64;
        for column in &columns {
            let mut y_offset = 0_i64;
            for tile in column {
                imageops::replace(&mut canvas, tile, x_offset, y_offset);
                y_offset += i64::from(tile.height());
            }
            if let Some(first) = column.first() {
                x_offset += i64::from(first.width());
            }
        }

        store.write_composite(&canvas)
    }
}

// Column-major load in the same order the offsets are accumulated
fn load_columns(
    grid: &GridSpec,
    store: &TileStore,
    progress: Option<&ProgressManager>,
) -> Result<Vec<Vec<RgbImage>>> {
    let mut columns = Vec::with_capacity(grid.range_x() as usize);
    for x in 0..grid.range_x() {
        let mut column = Vec::with_capacity(grid.range_y() as usize);
        for y in 0..grid.range_y() {
            let tile = store.load_converted(TileCoordinate { x, y })?.to_rgb8();
            column.push(tile);
            if let Some(pm) = progress {
                pm.inc_tile();
            }
        }
        columns.push(column);
    }
    Ok(columns)
}

// Every tile must match its column's row-0 width and column 0's same-row
// height. The producer guarantees uniform rows and columns; a mismatch is
// a hard error rather than a silent mis-assembly.
fn validate_dimensions(columns: &[Vec<RgbImage>]) -> Result<()> {
    let row_heights: Vec<u32> = columns
        .first()
        .map_or_else(Vec::new, |column| {
            column.iter().map(RgbImage::height).collect()
        });

    for (x, column) in columns.iter().enumerate() {
        let column_width = column.first().map_or(0, RgbImage::width);
        for (y, tile) in column.iter().enumerate() {
            let coordinate = TileCoordinate {
                x: x as u32,
                y: y as u32,
            };
            if tile.width() != column_width {
                return Err(StitchError::DimensionMismatch {
                    coordinate,
                    axis: "width",
                    expected: column_width,
                    actual: tile.width(),
                });
            }
            let row_height = row_heights.get(y).copied().unwrap_or(0);
            if tile.height() != row_height {
                return Err(StitchError::DimensionMismatch {
                    coordinate,
                    axis: "height",
                    expected: row_height,
                    actual: tile.height(),
                });
            }
        }
    }
    Ok(())
}
