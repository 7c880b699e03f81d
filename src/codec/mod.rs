//! Tile codec seam and the default PNG re-encoding implementation
//!
//! The converter applied to each tile is a black box from the pipeline's
//! perspective: raw bytes in, converted bytes out, failure opaque. The
//! conversion stage shares one codec across its worker pool, so
//! implementations must be thread-safe and stateless.

use std::error::Error;
use std::io::Cursor;

use image::ImageFormat;

/// Opaque failure raised by a codec implementation
pub type CodecFailure = Box<dyn Error + Send + Sync>;

/// Per-tile byte transform applied before assembly
pub trait TileCodec: Send + Sync {
    /// Convert one tile's raw bytes into its persisted form
    ///
    /// # Errors
    ///
    /// Returns an implementation-specific error when the bytes cannot be
    /// converted. The pipeline attributes the failure to the tile being
    /// processed and aborts the stage.
    fn convert(&self, raw: &[u8]) -> std::result::Result<Vec<u8>, CodecFailure>;
}

/// Default codec: decode the tile as PNG and re-encode it
///
/// Normalizes whatever encoding the tile producer used into the `image`
/// crate's canonical PNG output, dropping ancillary chunks along the way.
/// Also serves as an up-front validity check, since undecodable tiles fail
/// here instead of during assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngNormalizer;

impl TileCodec for PngNormalizer {
    fn convert(&self, raw: &[u8]) -> std::result::Result<Vec<u8>, CodecFailure> {
        let decoded = image::load_from_memory_with_format(raw, ImageFormat::Png)?;
        let mut encoded = Cursor::new(Vec::new());
        decoded.write_to(&mut encoded, ImageFormat::Png)?;
        Ok(encoded.into_inner())
    }
}
