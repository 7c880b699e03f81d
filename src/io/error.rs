//! Error types for tile conversion and assembly operations

use std::fmt;
use std::path::PathBuf;

use crate::codec::CodecFailure;
use crate::grid::TileCoordinate;

/// Main error type for all conversion and assembly operations
#[derive(Debug)]
pub enum StitchError {
    /// Grid bound is zero, so the grid holds no tiles along one axis
    GridConfiguration {
        /// Name of the offending bound
        parameter: &'static str,
        /// Provided value that failed validation
        value: u32,
    },

    /// A required tile file does not exist
    MissingTile {
        /// Coordinate of the absent tile
        coordinate: TileCoordinate,
        /// Path where the tile was expected
        path: PathBuf,
    },

    /// A tile file exists but could not be read
    TileRead {
        /// Coordinate of the unreadable tile
        coordinate: TileCoordinate,
        /// Path of the tile file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The tile codec rejected a tile's bytes
    Codec {
        /// Coordinate of the tile that failed conversion
        coordinate: TileCoordinate,
        /// Opaque codec failure
        source: CodecFailure,
    },

    /// A converted tile could not be persisted
    TileWrite {
        /// Coordinate of the tile being written
        coordinate: TileCoordinate,
        /// Destination path of the write
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Output directory could not be created or written to
    Directory {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A tile file exists but cannot be parsed as a valid picture
    Decode {
        /// Coordinate of the corrupt tile
        coordinate: TileCoordinate,
        /// Path of the tile file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// A tile's dimensions disagree with its row or column reference
    DimensionMismatch {
        /// Coordinate of the offending tile
        coordinate: TileCoordinate,
        /// Axis that disagrees, `"width"` or `"height"`
        axis: &'static str,
        /// Dimension required by the tile's row or column
        expected: u32,
        /// Dimension the tile actually has
        actual: u32,
    },

    /// Failed to serialize the composite image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// The conversion worker pool could not be constructed
    WorkerPool {
        /// Underlying pool construction error
        source: rayon::ThreadPoolBuildError,
    },
}

impl fmt::Display for StitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridConfiguration { parameter, value } => {
                write!(
                    f,
                    "Invalid grid bound '{parameter}' = {value}: at least one tile per axis is required"
                )
            }
            Self::MissingTile { coordinate, path } => {
                write!(f, "Missing tile {coordinate}: no file at '{}'", path.display())
            }
            Self::TileRead {
                coordinate,
                path,
                source,
            } => {
                write!(
                    f,
                    "Failed to read tile {coordinate} from '{}': {source}",
                    path.display()
                )
            }
            Self::Codec { coordinate, source } => {
                write!(f, "Tile codec failed on tile {coordinate}: {source}")
            }
            Self::TileWrite {
                coordinate,
                path,
                source,
            } => {
                write!(
                    f,
                    "Failed to write converted tile {coordinate} to '{}': {source}",
                    path.display()
                )
            }
            Self::Directory {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Decode {
                coordinate,
                path,
                source,
            } => {
                write!(
                    f,
                    "Failed to decode tile {coordinate} from '{}': {source}",
                    path.display()
                )
            }
            Self::DimensionMismatch {
                coordinate,
                axis,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Tile {coordinate} has mismatched {axis}: expected {expected}, found {actual}"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export composite image to '{}': {source}",
                    path.display()
                )
            }
            Self::WorkerPool { source } => {
                write!(f, "Failed to build conversion worker pool: {source}")
            }
        }
    }
}

impl std::error::Error for StitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileRead { source, .. }
            | Self::TileWrite { source, .. }
            | Self::Directory { source, .. } => Some(source),
            Self::Decode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::WorkerPool { source } => Some(source),
            Self::Codec { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion and assembly results
pub type Result<T> = std::result::Result<T, StitchError>;
