//! Instrument symbols and helpers shared between the library and the viewer.

use log::debug;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::ViewerError;

/// Built-in panel set used when no instrument file is supplied.
pub const DEFAULT_INSTRUMENTS: [(&str, &str); 6] = [
    ("SPY", "S&P 500"),
    ("QQQ", "NASDAQ"),
    ("^N225", "Nikkei 225"),
    ("BTC-USD", "Bitcoin"),
    ("GLD", "Gold"),
    ("USO", "Oil"),
];

/// Trait providing file parsing for instruments.
pub trait InstrumentParser {
    /// Parses instruments from a buffered reader.
    ///
    /// Each non-empty line that does not start with `#` is parsed as a single
    /// `Instrument` using `FromStr`: either `SYMBOL` or `SYMBOL,Label`.
    /// Returns an error naming the offending line if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Instrument>, ViewerError>;
}

impl InstrumentParser for Instrument {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, ViewerError> {
        let mut instruments = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(ViewerError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(instrument) => instruments.push(instrument),
                Err(e) => {
                    return Err(ViewerError::ParseInstrumentsFile {
                        line: index + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }
        debug!("Parsed {} instruments", instruments.len());
        Ok(instruments)
    }
}

/// Normalizes user-entered symbols: surrounding whitespace trimmed, upper-cased.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// A tracked instrument: its market symbol and a human-readable name.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Instrument {
    /// Normalized market symbol (e.g. `BTC-USD`).
    pub symbol: String,
    /// Display name; equal to the symbol when no name is known.
    pub label: String,
}

impl Instrument {
    /// Creates an instrument with an explicit display name.
    pub fn new(symbol: &str, label: &str) -> Self {
        let symbol = normalize_symbol(symbol);
        let label = label.trim();
        let label = if label.is_empty() {
            symbol.clone()
        } else {
            label.to_string()
        };
        Instrument { symbol, label }
    }

    /// Creates an instrument whose display name is its symbol.
    pub fn from_symbol(symbol: &str) -> Self {
        Self::new(symbol, "")
    }

    /// Returns the built-in default panel set.
    pub fn defaults() -> Vec<Instrument> {
        DEFAULT_INSTRUMENTS
            .iter()
            .map(|(symbol, label)| Instrument::new(symbol, label))
            .collect()
    }

    /// Panel heading: `"Label (SYMBOL)"`, or just the symbol when they coincide.
    pub fn display_label(&self) -> String {
        if self.label == self.symbol {
            self.symbol.clone()
        } else {
            format!("{} ({})", self.label, self.symbol)
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl FromStr for Instrument {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, label) = match s.split_once(',') {
            Some((symbol, label)) => (symbol, label),
            None => (s, ""),
        };
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(ViewerError::EmptySymbol);
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(ViewerError::InvalidSymbol(symbol));
        }
        Ok(Instrument::new(&symbol, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn symbols_are_normalized() {
        let instrument = Instrument::from_symbol("  btc-usd ");
        assert_eq!(instrument.symbol, "BTC-USD");
        assert_eq!(instrument.label, "BTC-USD");
    }

    #[test]
    fn display_label_includes_name_when_distinct() {
        assert_eq!(Instrument::new("spy", "S&P 500").display_label(), "S&P 500 (SPY)");
        assert_eq!(Instrument::from_symbol("TSLA").display_label(), "TSLA");
    }

    #[test]
    fn defaults_follow_builtin_order() {
        let symbols: Vec<String> = Instrument::defaults().into_iter().map(|i| i.symbol).collect();
        assert_eq!(symbols, ["SPY", "QQQ", "^N225", "BTC-USD", "GLD", "USO"]);
    }

    #[test]
    fn parses_file_with_labels_comments_and_blanks() {
        let input = "# watchlist\nspy,S&P 500\n\n  aapl  \nGLD, Gold\n";
        let parsed = Instrument::parse_from_file(Cursor::new(input)).unwrap();
        assert_eq!(
            parsed,
            vec![
                Instrument::new("SPY", "S&P 500"),
                Instrument::from_symbol("AAPL"),
                Instrument::new("GLD", "Gold"),
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let input = "SPY\n,Nameless\n";
        match Instrument::parse_from_file(Cursor::new(input)) {
            Err(ViewerError::ParseInstrumentsFile { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!("BRK B".parse::<Instrument>().is_err());
    }
}
