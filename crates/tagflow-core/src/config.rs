//! Container configuration for a flow layout pass.

use crate::errors::ConfigError;
use crate::types::{Alignment, Padding};

/// Default gap between rows.
pub const DEFAULT_LINE_SPACING: f64 = 15.0;
/// Default gap between items of one row.
pub const DEFAULT_COLUMN_SPACING: f64 = 10.0;

/// Container constraints for one layout pass.
///
/// All lengths share whatever unit the host measures items in; no unit
/// conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowConfig {
    /// Outer width of the container, padding included
    pub width: f64,
    /// Padding inside the container
    pub padding: Padding,
    /// Gap between consecutive rows
    pub line_spacing: f64,
    /// Gap between consecutive items in a row
    pub column_spacing: f64,
    /// Horizontal placement of each row
    pub alignment: Alignment,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            padding: Padding::default(),
            line_spacing: DEFAULT_LINE_SPACING,
            column_spacing: DEFAULT_COLUMN_SPACING,
            alignment: Alignment::default(),
        }
    }
}

impl FlowConfig {
    /// Create a config for a container of the given outer width.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set the container width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set the gap between rows.
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the gap between items in a row.
    pub fn with_column_spacing(mut self, spacing: f64) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Width available to items: container width minus horizontal padding.
    ///
    /// May be zero or negative, in which case every item overflows.
    pub fn content_width(&self) -> f64 {
        self.width - self.padding.horizontal()
    }

    /// Check that every length is usable.
    ///
    /// The container width only has to be finite; padding and spacing must
    /// also be non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("width", self.width)?;
        check_length("padding.top", self.padding.top)?;
        check_length("padding.right", self.padding.right)?;
        check_length("padding.bottom", self.padding.bottom)?;
        check_length("padding.left", self.padding.left)?;
        check_length("line_spacing", self.line_spacing)?;
        check_length("column_spacing", self.column_spacing)?;
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: FlowConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
