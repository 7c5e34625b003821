//! Error types for the tagflow engine.

use thiserror::Error;

/// Top-level error returned by the layout entry points.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Item {index} measured to an invalid size {width}x{height}")]
    InvalidItemSize { index: usize, width: f64, height: f64 },

    #[error("Item {index} follows item {previous}; indices must be strictly ascending")]
    UnorderedItems { index: usize, previous: usize },
}

/// Errors in a container configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config field '{field}' must be finite")]
    NonFinite { field: &'static str },

    #[error("Config field '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[cfg(feature = "serde")]
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
