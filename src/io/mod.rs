//! Input/output operations and error handling
//!
//! This module contains the tool's outer surface:
//! - Command-line parsing and stage orchestration
//! - Tile storage with atomic writes
//! - Error types and progress reporting

/// Command-line interface and stage orchestration
pub mod cli;
/// Filesystem layout constants and runtime defaults
pub mod configuration;
/// Error types and the crate-wide result alias
pub mod error;
/// Progress reporting for the two pipeline stages
pub mod progress;
/// Tile storage: path derivation, raw reads, atomic writes
pub mod store;

pub use store::TileStore;
