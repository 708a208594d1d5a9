//! stockgrid viewer — a terminal dashboard of instrument quotes drawn as ASCII line
//! charts in a two-column panel grid.
//!
//! It loads the instruments to track (or the built-in index set), starts a background
//! fetch thread around a quote source, and redraws the grid whenever fresh quotes
//! arrive, a key is pressed, or the terminal is resized. Panels can be added and
//! removed from the keyboard.
//!
//! Usage example (CLI):
//! ```bash
//! stockgrid_viewer --instruments ./watchlist.txt --snapshot ./quotes.json --refresh-secs 15
//! stockgrid_viewer --once --width 120 --height 40
//! ```
//!
//! Without `--snapshot` the quotes are simulated. Logging goes to `--log-file` only,
//! since the terminal is taken over by the grid.
#![warn(missing_docs)]
mod app;
mod args;
mod fetcher;
mod screen;
mod source;

use crate::app::App;
use crate::args::Args;
use crate::fetcher::Fetcher;
use crate::source::{QuoteSource, SnapshotFileSource, SyntheticSource};
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use stockgrid_common::frame::{TermSize, flatten};
use stockgrid_common::instrument::{Instrument, InstrumentParser};
use stockgrid_common::{Result, ViewerConfig, ViewerError, Watchlist};

fn main() -> Result<(), ViewerError> {
    let args = Args::parse();
    init_logger(args.log_path().as_deref())?;

    let config = args.viewer_config();
    let watchlist = Watchlist::new(load_instruments(args.instruments_path())?);
    info!("Tracking: {:?}", watchlist.instruments());

    let source: Box<dyn QuoteSource> = match args.snapshot_path() {
        Some(path) => Box::new(SnapshotFileSource::new(path)),
        None => Box::new(SyntheticSource::new(args.seed, config.history_len)),
    };

    if args.once {
        return render_once(source, &config, &watchlist, TermSize::new(args.width, args.height));
    }

    let fetcher = Fetcher::spawn(source);
    let result = App::new(config, watchlist).run(&fetcher);
    if let Err(e) = &result {
        error!("Viewer failed: {}", e);
    }
    result
}

/// Fetches once, prints the screen as plain text, and returns.
fn render_once(
    source: Box<dyn QuoteSource>,
    config: &ViewerConfig,
    watchlist: &Watchlist,
    size: TermSize,
) -> Result<(), ViewerError> {
    let mut app = App::new(config.clone(), watchlist.clone());
    let fetcher = Fetcher::spawn(source);
    fetcher.request(app.watchlist().instruments())?;
    app.apply_outcome(fetcher.wait_outcome()?);
    for row in flatten(&app.frame(size), size) {
        println!("{}", row);
    }
    Ok(())
}

/// Instruments from `path`, or the built-in set when no file is given.
fn load_instruments(path: Option<PathBuf>) -> Result<Vec<Instrument>, ViewerError> {
    let Some(path) = path else {
        return Ok(Instrument::defaults());
    };
    if !is_file_exist(&path) {
        return Err(ViewerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("instrument file {} not found", path.display()),
        )));
    }
    let file = File::open(&path)?;
    let instruments = Instrument::parse_from_file(BufReader::new(file))?;
    if instruments.is_empty() {
        warn!("{} lists no instruments", path.display());
    }
    Ok(instruments)
}

fn init_logger(log_file: Option<&Path>) -> Result<(), ViewerError> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(log::LevelFilter::Info)
                .target(log_target(Some(file)));
        }
        None => {
            // stderr would land on the alternate screen, so RUST_LOG alone logs nowhere.
            builder
                .filter_level(log::LevelFilter::Off)
                .target(log_target(None));
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

/// Log sink: the given file, or a sink that discards everything.
fn log_target(file: Option<File>) -> env_logger::Target {
    match file {
        Some(file) => env_logger::Target::Pipe(Box::new(file)),
        None => env_logger::Target::Pipe(Box::new(std::io::sink())),
    }
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
