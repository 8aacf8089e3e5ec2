//! Error types for honey-style operations.

use thiserror::Error;

/// Errors that can occur while loading themes, resolving theme values or
/// rendering styled components.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid alpha value: {0}. Alpha must be between 0 and 1")]
    InvalidAlpha(f64),

    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Unknown spacing: {0}")]
    UnknownSpacing(String),

    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("{0}")]
    MissingProvider(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
