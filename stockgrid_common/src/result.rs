//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `ViewerError`, so functions can simply return `Result<T>`.
use crate::error::ViewerError;

/// Workspace-wide `Result` alias with `ViewerError` as the default error.
pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
