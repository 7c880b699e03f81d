//! CLI entry point for the tile conversion and stitching tool

use clap::Parser;
use tilestitch::io::cli::{Cli, TileSetProcessor};

fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    let mut processor = TileSetProcessor::new(cli);
    processor.process().map(|_| ())
}
