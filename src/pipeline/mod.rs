//! The two processing stages: parallel conversion and sequential assembly
//!
//! Conversion runs one codec job per tile across a bounded worker pool and
//! persists every result before returning. Assembly then reads the converted
//! tiles back and composites them onto a single canvas. The stages never run
//! concurrently with each other; the converted-tile directory is the only
//! state shared between them.

/// Sequential grid assembly onto a single canvas
pub mod assembly;
/// Parallel per-tile codec conversion
pub mod conversion;

pub use assembly::AssemblyStage;
pub use conversion::ConversionStage;
