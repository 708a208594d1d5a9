//! Latest market data per symbol, as handed over by a quote source.
//!
//! A `Snapshot` is the input side of the renderer: a mapping from symbol to the
//! current price and the intraday series. On the wire it is a JSON object:
//!
//! ```json
//! { "SPY": { "price": 512.3, "series": [510.1, 511.0, 512.3] },
//!   "GLD": { "price": "N/A", "series": [] } }
//! ```
//!
//! Turning a snapshot into panels is where upstream data gets sanitized: samples that
//! are not finite are dropped and the series is cut to the configured history length.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::compositor::PanelSpec;
use crate::instrument::{Instrument, normalize_symbol};
use crate::price::Price;
use crate::result::Result;

/// Price and history of one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Current price, or the sentinel.
    #[serde(default)]
    pub price: Price,
    /// Chronological closes.
    #[serde(default)]
    pub series: Vec<f64>,
}

impl Quote {
    /// Creates a quote.
    pub fn new(price: Price, series: Vec<f64>) -> Self {
        Quote { price, series }
    }

    /// Finite samples only, keeping at most the last `history_len` of them.
    /// `history_len == 0` keeps everything.
    pub fn sanitized_series(&self, history_len: usize) -> Vec<f64> {
        let finite: Vec<f64> = self.series.iter().copied().filter(|p| p.is_finite()).collect();
        if finite.len() != self.series.len() {
            debug!(
                "Dropped {} non-finite samples",
                self.series.len() - finite.len()
            );
        }
        if history_len == 0 || finite.len() <= history_len {
            return finite;
        }
        finite[finite.len() - history_len..].to_vec()
    }
}

/// Quotes keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    quotes: HashMap<String, Quote>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON snapshot from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        Ok(snapshot.normalized())
    }

    /// Reads a JSON snapshot from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Stores the quote for `symbol`, replacing any previous one.
    pub fn insert(&mut self, symbol: &str, quote: Quote) {
        self.quotes.insert(symbol.to_string(), quote);
    }

    /// Quote for `symbol`, if present.
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether no symbol is present.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Builds one panel per instrument, in watchlist order.
    ///
    /// Symbols missing from the snapshot render as unavailable with an empty chart.
    pub fn panels(&self, instruments: &[Instrument], history_len: usize) -> Vec<PanelSpec> {
        instruments
            .iter()
            .map(|instrument| {
                let (price, series) = match self.quotes.get(&instrument.symbol) {
                    Some(quote) => (quote.price, quote.sanitized_series(history_len)),
                    None => {
                        warn!("No quote for {}", instrument.symbol);
                        (Price::NotAvailable, Vec::new())
                    }
                };
                PanelSpec::new(
                    &instrument.symbol,
                    &instrument.display_label(),
                    price,
                    series,
                )
            })
            .collect()
    }

    /// Upper-cases every key. Keys that collide after normalization are resolved in
    /// raw key order: the first one wins and the rest are logged and dropped.
    fn normalized(self) -> Self {
        let mut entries: Vec<(String, Quote)> = self.quotes.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut quotes = HashMap::with_capacity(entries.len());
        for (raw, quote) in entries {
            let symbol = normalize_symbol(&raw);
            if quotes.contains_key(&symbol) {
                warn!("Ignoring quote under {:?}: {} already present", raw, symbol);
                continue;
            }
            quotes.insert(symbol, quote);
        }
        Snapshot { quotes }
    }
}
