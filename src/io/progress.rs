//! Progress reporting for the two pipeline stages

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display across the conversion and assembly stages
///
/// One bar is shown per stage at tile granularity. `inc_tile` takes `&self`
/// so the conversion stage's worker pool can tick the bar concurrently.
#[derive(Default)]
pub struct ProgressManager {
    current: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a new progress manager with no active stage
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Begin a new stage bar sized to the grid's tile count
    pub fn start_stage(&mut self, name: &'static str, tiles: u64) {
        self.finish_stage();

        let bar = ProgressBar::new(tiles);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_message(name);
        self.current = Some(bar);
    }

    /// Record one completed tile in the active stage
    pub fn inc_tile(&self) {
        if let Some(ref bar) = self.current {
            bar.inc(1);
        }
    }

    /// Complete the active stage bar, leaving it on screen
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish();
        }
    }
}
