//! Quote sources feeding the viewer.
//!
//! A `QuoteSource` produces a fresh `Snapshot` for the current watchlist on every
//! refresh. Two implementations are provided:
//!
//! - `SyntheticSource` — a seeded random walk per symbol, for demos and offline use.
//! - `SnapshotFileSource` — re-reads a JSON snapshot file written by an external
//!   fetcher, so any market-data provider can be plugged in without touching the viewer.
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::PathBuf;

use stockgrid_common::instrument::Instrument;
use stockgrid_common::snapshot::{Quote, Snapshot};
use stockgrid_common::{Price, Result};

/// Samples kept per symbol by the synthetic source.
const SYNTHETIC_HISTORY_CAP: usize = 500;

/// Producer of market data for a list of instruments.
pub trait QuoteSource: Send {
    /// Short description used in logs and the status line.
    fn name(&self) -> String;

    /// Fetches current price and history for every instrument.
    fn fetch(&mut self, instruments: &[Instrument]) -> Result<Snapshot>;
}

/// Random-walk quotes with a rolling history per symbol.
pub struct SyntheticSource {
    rng: StdRng,
    warmup: usize,
    history: HashMap<String, Vec<f64>>,
}

impl SyntheticSource {
    /// Creates a source whose newly seen symbols start with `warmup` samples.
    pub fn new(seed: u64, warmup: usize) -> Self {
        SyntheticSource {
            rng: StdRng::seed_from_u64(seed),
            warmup: warmup.max(1),
            history: HashMap::new(),
        }
    }

    /// Calculate the next synthetic price using a small random walk around `current_price`.
    ///
    /// The change is sampled uniformly from `[-1%, +1%]` and the result is clamped to
    /// a minimum positive value.
    fn next_price(&mut self, current_price: f64) -> f64 {
        let change: f64 = self.rng.random_range(-0.01..0.01);
        (current_price * (1.0 + change)).max(0.01)
    }

    fn seed_history(&mut self) -> Vec<f64> {
        let mut price: f64 = self.rng.random_range(20.0..500.0);
        let mut series = Vec::with_capacity(self.warmup);
        for _ in 0..self.warmup {
            series.push(price);
            price = self.next_price(price);
        }
        series
    }
}

impl QuoteSource for SyntheticSource {
    fn name(&self) -> String {
        String::from("simulated quotes")
    }

    fn fetch(&mut self, instruments: &[Instrument]) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();
        for instrument in instruments {
            let mut series = match self.history.remove(&instrument.symbol) {
                Some(mut series) => {
                    let last = series.last().copied().unwrap_or(100.0);
                    let next = self.next_price(last);
                    series.push(next);
                    series
                }
                None => {
                    debug!("Seeding synthetic history for {}", instrument.symbol);
                    self.seed_history()
                }
            };
            if series.len() > SYNTHETIC_HISTORY_CAP {
                series.drain(..series.len() - SYNTHETIC_HISTORY_CAP);
            }
            let price = Price::from(series.last().copied());
            snapshot.insert(&instrument.symbol, Quote::new(price, series.clone()));
            self.history.insert(instrument.symbol.clone(), series);
        }
        self.history
            .retain(|symbol, _| instruments.iter().any(|i| &i.symbol == symbol));
        Ok(snapshot)
    }
}

/// Snapshot read from a JSON file on every fetch.
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    /// Creates a source reading `path`.
    pub fn new(path: PathBuf) -> Self {
        info!("Reading quotes from {}", path.display());
        SnapshotFileSource { path }
    }
}

impl QuoteSource for SnapshotFileSource {
    fn name(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    fn fetch(&mut self, _instruments: &[Instrument]) -> Result<Snapshot> {
        Snapshot::from_path(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn instruments(symbols: &[&str]) -> Vec<Instrument> {
        symbols.iter().map(|s| Instrument::from_symbol(s)).collect()
    }

    #[test]
    fn synthetic_source_warms_up_then_grows() {
        let mut source = SyntheticSource::new(1, 25);
        let list = instruments(&["SPY", "GLD"]);

        let first = source.fetch(&list).unwrap();
        assert_eq!(first.get("SPY").unwrap().series.len(), 25);

        let second = source.fetch(&list).unwrap();
        let quote = second.get("GLD").unwrap();
        assert_eq!(quote.series.len(), 26);
        assert_eq!(quote.price, Price::Available(*quote.series.last().unwrap()));
    }

    #[test]
    fn synthetic_steps_stay_within_one_percent() {
        let mut source = SyntheticSource::new(3, 50);
        let snapshot = source.fetch(&instruments(&["BTC-USD"])).unwrap();
        let series = &snapshot.get("BTC-USD").unwrap().series;
        for pair in series.windows(2) {
            assert!((pair[1] / pair[0] - 1.0).abs() <= 0.01 + 1e-12);
        }
    }

    #[test]
    fn synthetic_source_is_reproducible_per_seed() {
        let list = instruments(&["SPY", "QQQ"]);
        let a = SyntheticSource::new(42, 10).fetch(&list).unwrap();
        let b = SyntheticSource::new(42, 10).fetch(&list).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn removed_symbols_are_forgotten() {
        let mut source = SyntheticSource::new(5, 5);
        source.fetch(&instruments(&["SPY", "USO"])).unwrap();
        source.fetch(&instruments(&["SPY"])).unwrap();
        let again = source.fetch(&instruments(&["SPY", "USO"])).unwrap();
        assert_eq!(again.get("USO").unwrap().series.len(), 5);
        assert_eq!(again.get("SPY").unwrap().series.len(), 7);
    }

    #[test]
    fn file_source_reads_current_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"SPY": {{"price": 1.5, "series": [1.0, 1.5]}}}}"#).unwrap();
        let mut source = SnapshotFileSource::new(file.path().to_path_buf());
        let snapshot = source.fetch(&[]).unwrap();
        assert_eq!(snapshot.get("SPY").unwrap().price, Price::Available(1.5));
    }

    #[test]
    fn file_source_reports_missing_file() {
        let mut source = SnapshotFileSource::new(PathBuf::from("/nonexistent/quotes.json"));
        assert!(source.fetch(&[]).is_err());
    }
}
