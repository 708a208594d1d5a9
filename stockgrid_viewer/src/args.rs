//! Command-line arguments for the stockgrid viewer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use stockgrid_common::config::{
    DEFAULT_BOTTOM_MARGIN, DEFAULT_HISTORY_LEN, DEFAULT_MIN_CELL_HEIGHT, DEFAULT_MIN_CELL_WIDTH,
    DEFAULT_REFRESH_SECS, DEFAULT_TOP_MARGIN, ViewerConfig,
};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a text file with instruments to track, one `SYMBOL` or
    /// `SYMBOL,Label` per line. The built-in index set is used when omitted.
    #[clap(long)]
    pub instruments: Option<String>,

    /// JSON snapshot file re-read on every refresh. Without it quotes are simulated.
    #[clap(long)]
    pub snapshot: Option<String>,

    /// Seed for simulated quotes.
    #[clap(long, default_value_t = 7)]
    pub seed: u64,

    /// Seconds between automatic refreshes.
    #[clap(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Number of most recent samples charted per instrument (0 keeps all).
    #[clap(long, default_value_t = DEFAULT_HISTORY_LEN)]
    pub history: usize,

    /// Blank rows above the panel grid.
    #[clap(long, default_value_t = DEFAULT_TOP_MARGIN)]
    pub top_margin: usize,

    /// Rows reserved below the grid for the status area.
    #[clap(long, default_value_t = DEFAULT_BOTTOM_MARGIN)]
    pub bottom_margin: usize,

    /// Minimum panel width; narrower cells are widened and clipped.
    #[clap(long, default_value_t = DEFAULT_MIN_CELL_WIDTH)]
    pub min_cell_width: usize,

    /// Minimum panel height; shorter cells are heightened and clipped.
    #[clap(long, default_value_t = DEFAULT_MIN_CELL_HEIGHT)]
    pub min_cell_height: usize,

    /// Render a single frame as plain text to stdout and exit.
    #[clap(long)]
    pub once: bool,

    /// Screen width used with `--once`.
    #[clap(long, default_value_t = 100)]
    pub width: usize,

    /// Screen height used with `--once`.
    #[clap(long, default_value_t = 40)]
    pub height: usize,

    /// File receiving log output; logging is off by default since the screen is in use.
    #[clap(long)]
    pub log_file: Option<String>,
}

impl Args {
    /// Render and refresh settings derived from the arguments.
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            refresh_interval: Duration::from_secs(self.refresh_secs.max(1)),
            history_len: self.history,
            top_margin: self.top_margin,
            bottom_margin: self.bottom_margin,
            min_cell_width: self.min_cell_width,
            min_cell_height: self.min_cell_height,
        }
    }

    /// Instrument file path, if given.
    pub fn instruments_path(&self) -> Option<PathBuf> {
        self.instruments.as_deref().map(normalize_path)
    }

    /// Snapshot file path, if given.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.as_deref().map(normalize_path)
    }

    /// Log file path, if given.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(normalize_path)
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
