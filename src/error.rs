//! Error types for swarm-morph.
//!
//! Only configuration can fail. Per-frame work sanitizes its inputs instead of
//! returning errors, so nothing here is produced from inside a frame.

use thiserror::Error;

/// Errors from parsing a palette color.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not `#rgb` or `#rrggbb` (leading `#` optional).
    #[error("invalid hex color {0:?}, expected #rgb or #rrggbb")]
    InvalidHex(String),
}

/// Errors from building or loading a [`MorphConfig`](crate::MorphConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The color palette has no entries, so no particle could be colored.
    #[error("color palette is empty; at least one color is required")]
    EmptyPalette,
    /// A geometric dimension is negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidDimension {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A palette entry could not be parsed.
    #[error("bad palette entry: {0}")]
    Color(#[from] ColorError),
    /// Failed to read or write a configuration file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for a `MorphConfig`.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
