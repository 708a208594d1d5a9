//!
//! Rendering core and shared types of the stockgrid terminal viewer.
//!
//! This crate aggregates:
//! - `chart` — rasterizer turning a price series into an ASCII line chart.
//! - `layout` — grid layout engine splitting the terminal among panels.
//! - `compositor` — positions labeled charts as text fragments.
//! - `frame` — full-screen composition including the status area.
//! - `price` — price value with a "not available" sentinel.
//! - `snapshot` — symbol to quote mapping consumed by the renderer.
//! - `instrument` — instrument symbols, default panel set, file parsing.
//! - `watchlist` — ordered, editable list of tracked instruments.
//! - `command` — keyboard command vocabulary.
//! - `config` — render and refresh settings.
//! - `error` — unified error type `ViewerError` used across the workspace.
//! - `result` — handy `Result<T, ViewerError>` alias.
#![warn(missing_docs)]
pub mod chart;
pub mod command;
pub mod compositor;
pub mod config;
pub mod error;
pub mod frame;
pub mod instrument;
pub mod layout;
pub mod price;
pub mod result;
pub mod snapshot;
pub mod watchlist;

pub use chart::{Canvas, rasterize};
pub use command::Command;
pub use compositor::{Fragment, FragmentRole, PanelSpec, compose_panels};
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use frame::{TermSize, compose_frame};
pub use instrument::Instrument;
pub use layout::{GridLayout, layout};
pub use price::Price;
pub use result::Result;
pub use snapshot::{Quote, Snapshot};
pub use watchlist::Watchlist;
