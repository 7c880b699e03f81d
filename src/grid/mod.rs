//! Grid index space, tile coordinates, and tile naming
//!
//! A tile set is an implicit two-dimensional index space `[0, range_x) x
//! [0, range_y)` — nothing is stored for the grid itself, it is derived from
//! the two bounds supplied by the caller. Tiles are keyed on disk by the
//! triple `(prefix, x, y)` alone.

use std::fmt;

use crate::io::configuration::TILE_EXTENSION;
use crate::io::error::{Result, StitchError};

/// Position of one tile within a named tile set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    /// Column index, `0 <= x < range_x`
    pub x: u32,
    /// Row index, `0 <= y < range_y`
    pub y: u32,
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Validated tile counts along both grid axes
///
/// Construction rejects a zero bound, so every `GridSpec` describes a grid
/// with at least one tile per axis. The bounds are counts, not maximum
/// indices: tiles are indexed `0..range_x` and `0..range_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    range_x: u32,
    range_y: u32,
}

impl GridSpec {
    /// Create a grid specification from tile counts along each axis
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::GridConfiguration`] if either bound is zero,
    /// since assembly requires at least one tile per axis.
    pub const fn new(range_x: u32, range_y: u32) -> Result<Self> {
        if range_x == 0 {
            return Err(StitchError::GridConfiguration {
                parameter: "range_x",
                value: range_x,
            });
        }
        if range_y == 0 {
            return Err(StitchError::GridConfiguration {
                parameter: "range_y",
                value: range_y,
            });
        }
        Ok(Self { range_x, range_y })
    }

    /// Number of tile columns
    pub const fn range_x(&self) -> u32 {
        self.range_x
    }

    /// Number of tile rows
    pub const fn range_y(&self) -> u32 {
        self.range_y
    }

    /// Total number of tiles in the grid
    pub const fn tile_count(&self) -> u64 {
        self.range_x as u64 * self.range_y as u64
    }

    /// Iterate the full coordinate cross-product in column-major order
    ///
    /// Columns are outer (`x`), rows inner (`y`), matching the traversal
    /// order the assembly stage uses for offset accumulation.
    pub fn coordinates(&self) -> impl Iterator<Item = TileCoordinate> + use<> {
        let range_y = self.range_y;
        (0..self.range_x)
            .flat_map(move |x| (0..range_y).map(move |y| TileCoordinate { x, y }))
    }
}

/// File name for one tile of a set: `{prefix}_{x}_{y}.png`
///
/// This derived name is the sole storage key for a tile; no separate
/// identifier exists.
pub fn tile_file_name(prefix: &str, coordinate: TileCoordinate) -> String {
    format!(
        "{prefix}_{}_{}.{TILE_EXTENSION}",
        coordinate.x, coordinate.y
    )
}
