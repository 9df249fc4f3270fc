//! Configuration for the color transfer pipeline
//!
//! Options can be constructed programmatically or loaded from JSON:
//!
//! ```no_run
//! use color_transfer::TransferConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = TransferConfig::from_json_file(Path::new("transfer.json"))?;
//!
//! // Or use defaults
//! let config = TransferConfig::default();
//! # Ok::<(), color_transfer::TransferError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::blend;
use crate::error::{Result, TransferError};

/// Options controlling a color transfer
///
/// Out-of-range blend factors are rejected by [`validate`](Self::validate),
/// not clamped; both policies are defensible, and rejecting keeps a typo
/// from silently degenerating into a no-op or a full transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Blend factor in [0, 1]: 0 keeps the source statistics unchanged,
    /// 1 moves them fully to the reference's
    pub alpha: f32,

    /// Remap only the chromaticity channels, carrying the source
    /// lightness through unchanged
    #[serde(default)]
    pub preserve_lightness: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            alpha: blend::DEFAULT_ALPHA,
            preserve_lightness: false,
        }
    }
}

impl TransferConfig {
    /// Create a configuration with the given blend factor and default options
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Load and validate a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `TransferError::ConfigError` if the file cannot be read or
    /// parsed, and `TransferError::InvalidAlpha` if the loaded blend factor
    /// is out of range.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TransferError::config(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            TransferError::config(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that the blend factor is a finite value in [0, 1]
    ///
    /// # Errors
    ///
    /// Returns `TransferError::InvalidAlpha` otherwise; NaN is rejected.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite()
            || !(blend::ALPHA_MIN..=blend::ALPHA_MAX).contains(&self.alpha)
        {
            return Err(TransferError::InvalidAlpha { value: self.alpha });
        }
        Ok(())
    }
}
