//! Parallel per-tile codec conversion
//!
//! One job per grid coordinate, dispatched over a bounded rayon pool. Jobs
//! are independent; the filesystem is the only shared state and each job
//! owns its own output file exclusively, so completion order is irrelevant.

use rayon::prelude::*;

use crate::codec::TileCodec;
use crate::grid::{GridSpec, TileCoordinate};
use crate::io::error::{Result, StitchError};
use crate::io::progress::ProgressManager;
use crate::io::store::TileStore;

/// Parallel conversion stage dispatching one codec job per tile
///
/// The stage returns only once every job has finished or the first failure
/// has been observed. On failure, jobs already in flight drain without
/// being cancelled, so a partially converted output directory may remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionStage {
    jobs: Option<usize>,
}

impl ConversionStage {
    /// Create a conversion stage with an optional worker-pool bound
    ///
    /// `None` sizes the pool to available hardware parallelism.
    pub const fn new(jobs: Option<usize>) -> Self {
        Self { jobs }
    }

    /// Convert every tile of the grid and persist the results
    ///
    /// Ensures the converted-tile directory exists, reads each raw tile,
    /// applies the codec, and writes the result atomically.
    ///
    /// # Errors
    ///
    /// Returns the first tile-level error observed: a missing or unreadable
    /// input tile, a codec rejection, or a failed write, each identifying
    /// the offending coordinate. Directory creation and worker-pool
    /// construction failures surface as [`StitchError::Directory`] and
    /// [`StitchError::WorkerPool`].
    pub fn run(
        &self,
        grid: &GridSpec,
        store: &TileStore,
        codec: &dyn TileCodec,
        progress: Option<&ProgressManager>,
    ) -> Result<()> {
        store.ensure_converted_dir()?;

        let coordinates: Vec<TileCoordinate> = grid.coordinates().collect();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs.unwrap_or(0))
            .build()
            .map_err(|source| StitchError::WorkerPool { source })?;

        pool.install(|| {
            coordinates.par_iter().try_for_each(|&coordinate| {
                convert_tile(coordinate, store, codec)?;
                if let Some(pm) = progress {
                    pm.inc_tile();
                }
                Ok(())
            })
        })
    }
}

fn convert_tile(
    coordinate: TileCoordinate,
    store: &TileStore,
    codec: &dyn TileCodec,
) -> Result<()> {
    let raw = store.read_raw(coordinate)?;
    let converted = codec
        .convert(&raw)
        .map_err(|source| StitchError::Codec { coordinate, source })?;
    store.write_converted(coordinate, &converted)
}
