//! Tile storage: path derivation, raw reads, and atomic writes
//!
//! The store is the sole authority for where a tile set's files live. The
//! conversion stage is its only writer and the assembly stage its only
//! reader, so atomic rename-into-place writes are all the synchronization
//! the two stages need.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::grid::{TileCoordinate, tile_file_name};
use crate::io::configuration::{COMPOSITE_EXTENSION, PARTIAL_SUFFIX};
use crate::io::error::{Result, StitchError};

/// Filesystem layout for one named tile set
#[derive(Debug, Clone)]
pub struct TileStore {
    input_dir: PathBuf,
    converted_dir: PathBuf,
    composite_dir: PathBuf,
    prefix: String,
}

impl TileStore {
    /// Create a store for the tile set identified by `prefix`
    ///
    /// The composite image goes to the working directory unless overridden
    /// with [`TileStore::with_composite_dir`].
    pub fn new(
        input_dir: impl Into<PathBuf>,
        converted_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            converted_dir: converted_dir.into(),
            composite_dir: PathBuf::new(),
            prefix: prefix.into(),
        }
    }

    /// Redirect the composite image to a different directory
    #[must_use]
    pub fn with_composite_dir(mut self, composite_dir: impl Into<PathBuf>) -> Self {
        self.composite_dir = composite_dir.into();
        self
    }

    /// Path of a raw input tile
    pub fn input_path(&self, coordinate: TileCoordinate) -> PathBuf {
        self.input_dir.join(tile_file_name(&self.prefix, coordinate))
    }

    /// Path of a converted tile
    pub fn converted_path(&self, coordinate: TileCoordinate) -> PathBuf {
        self.converted_dir
            .join(tile_file_name(&self.prefix, coordinate))
    }

    /// Path of the final composite image, `{prefix}.jpg`
    pub fn composite_path(&self) -> PathBuf {
        self.composite_dir
            .join(format!("{}.{COMPOSITE_EXTENSION}", self.prefix))
    }

    /// Create the converted-tile directory if it does not exist
    ///
    /// Idempotent; an already-existing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::Directory`] if the directory cannot be created.
    pub fn ensure_converted_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.converted_dir).map_err(|source| StitchError::Directory {
            path: self.converted_dir.clone(),
            operation: "create directory",
            source,
        })
    }

    /// Read the raw bytes of an input tile
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::MissingTile`] if the file is absent and
    /// [`StitchError::TileRead`] for any other read failure.
    pub fn read_raw(&self, coordinate: TileCoordinate) -> Result<Vec<u8>> {
        let path = self.input_path(coordinate);
        fs::read(&path).map_err(|source| Self::read_error(coordinate, path, source))
    }

    /// Persist a converted tile atomically
    ///
    /// Writes to a temporary name and renames into place, so a concurrent or
    /// later reader never observes a truncated tile under the final name.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::TileWrite`] if the write or rename fails.
    pub fn write_converted(&self, coordinate: TileCoordinate, bytes: &[u8]) -> Result<()> {
        let path = self.converted_path(coordinate);
        let partial = partial_path(&path);

        fs::write(&partial, bytes).map_err(|source| StitchError::TileWrite {
            coordinate,
            path: partial.clone(),
            source,
        })?;

        fs::rename(&partial, &path).map_err(|source| {
            let _ = fs::remove_file(&partial);
            StitchError::TileWrite {
                coordinate,
                path,
                source,
            }
        })
    }

    /// Load and decode a converted tile
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::MissingTile`] if the file is absent,
    /// [`StitchError::TileRead`] if it cannot be read, and
    /// [`StitchError::Decode`] if it cannot be parsed as a picture.
    pub fn load_converted(&self, coordinate: TileCoordinate) -> Result<DynamicImage> {
        let path = self.converted_path(coordinate);
        let bytes =
            fs::read(&path).map_err(|source| Self::read_error(coordinate, path.clone(), source))?;

        image::load_from_memory(&bytes).map_err(|source| StitchError::Decode {
            coordinate,
            path,
            source,
        })
    }

    /// Serialize the composite canvas as JPEG and return its path
    ///
    /// Encodes to a temporary name and renames into place on success, so no
    /// partial composite is ever left under the final name.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::ImageExport`] if encoding fails and
    /// [`StitchError::Directory`] if the finished file cannot be renamed
    /// into place.
    pub fn write_composite(&self, canvas: &RgbImage) -> Result<PathBuf> {
        let path = self.composite_path();
        let partial = partial_path(&path);

        canvas
            .save_with_format(&partial, ImageFormat::Jpeg)
            .map_err(|source| {
                let _ = fs::remove_file(&partial);
                StitchError::ImageExport {
                    path: path.clone(),
                    source,
                }
            })?;

        fs::rename(&partial, &path).map_err(|source| {
            let _ = fs::remove_file(&partial);
            StitchError::Directory {
                path: path.clone(),
                operation: "rename composite",
                source,
            }
        })?;

        Ok(path)
    }

    fn read_error(
        coordinate: TileCoordinate,
        path: PathBuf,
        source: std::io::Error,
    ) -> StitchError {
        if source.kind() == std::io::ErrorKind::NotFound {
            StitchError::MissingTile { coordinate, path }
        } else {
            StitchError::TileRead {
                coordinate,
                path,
                source,
            }
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
