//! # Color Transfer
//!
//! A Rust crate for statistical color transfer between images.
//!
//! The color distribution of a source image is reshaped so that its
//! per-channel mean and spread move toward those of a reference image,
//! blended by a strength factor:
//! - Both images are converted from sRGB to CIE Lab
//! - Per-channel mean and standard deviation are estimated for each
//! - An affine remap moves the source statistics toward the reference's
//! - The result is clamped and converted back to sRGB
//!
//! ## Example
//!
//! ```rust
//! use color_transfer::transfer_color;
//! use image::{Rgb, RgbImage};
//!
//! let source = RgbImage::from_pixel(4, 4, Rgb([200, 80, 40]));
//! let reference = RgbImage::from_pixel(4, 4, Rgb([40, 80, 200]));
//!
//! let result = transfer_color(&source, &reference, 0.5)?;
//! assert_eq!(result.dimensions(), source.dimensions());
//! # Ok::<(), color_transfer::TransferError>(())
//! ```

use image::RgbImage;

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod transfer;

pub use color::{ChannelStats, ColorConverter, LabBuffer, LabStats};
pub use config::TransferConfig;
pub use error::{ImageRole, Result, TransferError};
pub use transfer::{ColorTransfer, TransferReport};

/// Recolor `source` toward `reference` with the given blend factor
///
/// This is the main entry point. `alpha = 0` leaves the source statistics
/// unchanged, `alpha = 1` moves them fully to the reference's. The result
/// image has the source's dimensions; source and reference may differ in
/// size.
///
/// # Arguments
///
/// * `source` - The image whose color appearance will be modified
/// * `reference` - The image providing the target color statistics
/// * `alpha` - Blend factor in [0, 1]
///
/// # Errors
///
/// Returns `TransferError` if:
/// - `alpha` is outside [0, 1] or not finite
/// - Either image contains no pixels
/// - Conversion back to RGB fails
pub fn transfer_color(source: &RgbImage, reference: &RgbImage, alpha: f32) -> Result<RgbImage> {
    ColorTransfer::with_config(TransferConfig::new(alpha)).apply(source, reference)
}

/// Recolor `source` toward `reference`, returning the result together
/// with a [`TransferReport`] of the statistics involved
///
/// # Errors
///
/// Same conditions as [`transfer_color`].
pub fn transfer_color_with_report(
    source: &RgbImage,
    reference: &RgbImage,
    config: &TransferConfig,
) -> Result<(RgbImage, TransferReport)> {
    ColorTransfer::with_config(*config).apply_with_report(source, reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_transfer_color_rejects_invalid_alpha() {
        let source = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let reference = RgbImage::from_pixel(2, 2, Rgb([200, 100, 50]));

        let result = transfer_color(&source, &reference, 1.5);
        assert!(matches!(result, Err(TransferError::InvalidAlpha { .. })));
    }

    #[test]
    fn test_report_roundtrips_through_json() {
        let source = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let reference = RgbImage::from_pixel(2, 2, Rgb([200, 100, 50]));

        let (_, report) =
            transfer_color_with_report(&source, &reference, &TransferConfig::default()).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: TransferReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
