//! Display settings supplied to every render pass.
//!
//! Nothing here is read from disk or the environment; the viewer builds a
//! `ViewerConfig` from its command-line arguments and passes it down.
use std::time::Duration;

/// Seconds between automatic refreshes.
pub const DEFAULT_REFRESH_SECS: u64 = 5;
/// Samples of history kept per instrument.
pub const DEFAULT_HISTORY_LEN: usize = 25;
/// Blank rows above the panel grid.
pub const DEFAULT_TOP_MARGIN: usize = 1;
/// Rows below the grid for the commands line, status message, and timestamp.
pub const DEFAULT_BOTTOM_MARGIN: usize = 4;
/// Cells narrower than this are widened and clipped by the terminal.
pub const DEFAULT_MIN_CELL_WIDTH: usize = 30;
/// Cells shorter than this are heightened and clipped by the terminal.
pub const DEFAULT_MIN_CELL_HEIGHT: usize = 8;

/// Render and refresh settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Time between automatic quote refreshes.
    pub refresh_interval: Duration,
    /// Number of most recent samples charted per instrument; 0 keeps all.
    pub history_len: usize,
    /// Rows left blank above the grid.
    pub top_margin: usize,
    /// Rows reserved below the grid for the status area.
    pub bottom_margin: usize,
    /// Lower bound for cell width, applied after layout.
    pub min_cell_width: usize,
    /// Lower bound for cell height, applied after layout.
    pub min_cell_height: usize,
}

impl ViewerConfig {
    /// Rows not available to the panel grid.
    pub fn reserved_rows(&self) -> usize {
        self.top_margin + self.bottom_margin
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            history_len: DEFAULT_HISTORY_LEN,
            top_margin: DEFAULT_TOP_MARGIN,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
            min_cell_height: DEFAULT_MIN_CELL_HEIGHT,
        }
    }
}
