//! Error types for the color_transfer library

use std::fmt;
use thiserror::Error;

/// Result type alias for color transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;

/// Identifies which input image an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// The image being recolored
    Source,
    /// The image providing the target statistics
    Reference,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Source => write!(f, "source"),
            ImageRole::Reference => write!(f, "reference"),
        }
    }
}

/// Error types for color transfer operations
#[derive(Error, Debug)]
pub enum TransferError {
    /// Blend factor outside the accepted range
    #[error("Invalid blend factor: {value} (expected a value in [0, 1])")]
    InvalidAlpha { value: f32 },

    /// A zero-pixel image was passed where statistics are required
    #[error("{role} image contains no pixels")]
    EmptyImage { role: ImageRole },

    /// Color space conversion could not be performed
    #[error("Color conversion error: {message}")]
    ConversionError { message: String },

    /// Configuration loading or validation failed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TransferError {
    /// Create a conversion error with context
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::ConversionError {
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
