//! Command-line interface for converting and stitching one tile set

use clap::Parser;
use std::path::PathBuf;

use crate::codec::PngNormalizer;
use crate::grid::GridSpec;
use crate::io::configuration::{CONVERTED_DIR, INPUT_DIR};
use crate::io::error::Result;
use crate::io::progress::ProgressManager;
use crate::io::store::TileStore;
use crate::pipeline::{AssemblyStage, ConversionStage};

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(
    version,
    about = "Convert a grid of image tiles and stitch them into one composite"
)]
/// Command-line arguments for the tile stitching tool
pub struct Cli {
    /// Number of tiles along the x axis (tiles are indexed 0..range_x)
    #[arg(long = "range_x", value_name = "COUNT")]
    pub range_x: u32,

    /// Number of tiles along the y axis (tiles are indexed 0..range_y)
    #[arg(long = "range_y", value_name = "COUNT")]
    pub range_y: u32,

    /// Shared filename prefix of the tile set
    #[arg(long)]
    pub prefix: String,

    /// Directory holding the raw input tiles
    #[arg(long = "input_folder", value_name = "PATH", default_value = INPUT_DIR)]
    pub input_folder: PathBuf,

    /// Directory receiving the converted tiles
    #[arg(long = "output_folder", value_name = "PATH", default_value = CONVERTED_DIR)]
    pub output_folder: PathBuf,

    /// Worker pool size for tile conversion (defaults to available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates the conversion and assembly stages for one tile set
///
/// Conversion must fully complete before assembly begins, since assembly
/// reads only converted tiles back from storage.
pub struct TileSetProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl TileSetProcessor {
    /// Create a new processor from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run both stages and return the path of the composite image
    ///
    /// # Errors
    ///
    /// Returns an error if the grid bounds are invalid or either stage
    /// fails; the error identifies the offending tile coordinate where one
    /// is applicable.
    pub fn process(&mut self) -> Result<PathBuf> {
        let grid = GridSpec::new(self.cli.range_x, self.cli.range_y)?;
        let store = TileStore::new(
            self.cli.input_folder.clone(),
            self.cli.output_folder.clone(),
            self.cli.prefix.clone(),
        );
        let codec = PngNormalizer;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage("Converting", grid.tile_count());
        }
        ConversionStage::new(self.cli.jobs).run(
            &grid,
            &store,
            &codec,
            self.progress_manager.as_ref(),
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage("Assembling", grid.tile_count());
        }
        let composite = AssemblyStage::run(&grid, &store, self.progress_manager.as_ref())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_stage();
        }

        Ok(composite)
    }
}
