//! Ordered list of tracked instruments, edited from the keyboard.
use log::info;

use crate::error::ViewerError;
use crate::instrument::{Instrument, normalize_symbol};
use crate::result::Result;

/// Instruments shown on screen, in panel order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    instruments: Vec<Instrument>,
}

impl Watchlist {
    /// Creates a watchlist, dropping repeated symbols while keeping first occurrences.
    pub fn new(instruments: Vec<Instrument>) -> Self {
        let mut watchlist = Watchlist::default();
        for instrument in instruments {
            if !watchlist.contains(&instrument.symbol) {
                watchlist.instruments.push(instrument);
            }
        }
        watchlist
    }

    /// Tracked instruments in panel order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Number of tracked instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Whether `symbol` (normalized) is tracked.
    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = normalize_symbol(symbol);
        self.instruments.iter().any(|i| i.symbol == symbol)
    }

    /// Appends `entry` (`SYMBOL` or `SYMBOL,Label`) as a new panel and returns the
    /// status message to show.
    pub fn add(&mut self, entry: &str) -> Result<String> {
        let instrument: Instrument = entry.parse()?;
        if self.contains(&instrument.symbol) {
            return Err(ViewerError::DuplicateInstrument(instrument.symbol));
        }
        info!("Tracking {}", instrument.symbol);
        let message = format!("Added {}", instrument.symbol);
        self.instruments.push(instrument);
        Ok(message)
    }

    /// Removes `symbol` and returns the status message to show.
    pub fn remove(&mut self, symbol: &str) -> Result<String> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(ViewerError::EmptySymbol);
        }
        let before = self.instruments.len();
        self.instruments.retain(|i| i.symbol != symbol);
        if self.instruments.len() == before {
            return Err(ViewerError::InstrumentNotFound(symbol));
        }
        info!("Stopped tracking {}", symbol);
        Ok(format!("Removed {}", symbol))
    }
}
