//! Slider error types

use thiserror::Error;
use throw_animation::EasingParseError;

/// Errors raised while configuring, measuring or building a slider
#[derive(Error, Debug)]
pub enum SliderError {
    /// Nothing usable to loop over (no items, zero widths, zero loop distance)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Container or item could not be measured
    #[error("Surface detached: {0}")]
    Detached(String),

    /// An attribute value could not be parsed
    #[error("Invalid value {value:?} for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },

    /// Layout engine failure
    #[error("Layout failed: {0}")]
    Layout(String),

    /// Unknown easing name
    #[error(transparent)]
    Easing(#[from] EasingParseError),

    /// Malformed TOML configuration
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl SliderError {
    pub(crate) fn attribute(name: &str, value: &str) -> Self {
        SliderError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type for slider operations
pub type Result<T> = std::result::Result<T, SliderError>;
