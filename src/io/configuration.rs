//! Filesystem layout constants and runtime defaults

/// Default directory holding raw input tiles
pub const INPUT_DIR: &str = "input_pics";

/// Default directory receiving converted tiles
pub const CONVERTED_DIR: &str = "converted_pics";

/// File extension shared by raw and converted tiles
pub const TILE_EXTENSION: &str = "png";

/// File extension of the final composite image
pub const COMPOSITE_EXTENSION: &str = "jpg";

// Appended to a destination name while the file is being written; the
// finished file is renamed into place so readers never see a truncated tile
/// Suffix marking an in-progress write
pub const PARTIAL_SUFFIX: &str = ".tmp";
