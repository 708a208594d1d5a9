//! Error types shared between the viewer and the common library.
//!
//! The `ViewerError` enum unifies the failure cases of loading instrument lists and
//! snapshots, interpreting keyboard commands, and editing the watchlist, so both
//! crates can propagate a single error type. The rendering core never fails and
//! does not appear here.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the viewer binary.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// I/O error originating from files or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing an instrument file; carries the line number and reason.
    #[error("Parse instruments file error at line {line}: {reason}")]
    ParseInstrumentsFile {
        /// 1-based line number in the source file.
        line: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// A keyboard or text command that is not part of the command vocabulary.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A symbol was required but the input was blank.
    #[error("No ticker entered")]
    EmptySymbol,

    /// A symbol containing characters no market symbol uses.
    #[error("Invalid ticker symbol: {0}")]
    InvalidSymbol(String),

    /// The symbol is already on the watchlist.
    #[error("{0} already tracked")]
    DuplicateInstrument(String),

    /// The symbol is not on the watchlist.
    #[error("Ticker {0} not found")]
    InstrumentNotFound(String),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}
