//! Reassembles a tiled raster image into one composite picture
//!
//! The system takes a rectangular grid of tile files named `{prefix}_{x}_{y}.png`,
//! runs every tile through a pluggable byte codec on a bounded worker pool, and
//! stitches the converted tiles into a single output image using prefix-sum
//! placement offsets.

#![forbid(unsafe_code)]

/// Tile codec seam and the default PNG re-encoding implementation
pub mod codec;
/// Grid index space, tile coordinates, and tile naming
pub mod grid;
/// Input/output operations, CLI surface, and error handling
pub mod io;
/// The two processing stages: parallel conversion and sequential assembly
pub mod pipeline;

pub use io::error::{Result, StitchError};
