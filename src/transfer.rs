//! Statistical distribution remapping between two images
//!
//! Implements the transfer pipeline: convert both images to Lab, estimate
//! per-channel statistics, blend the source statistics toward the
//! reference's by the configured factor, and apply the resulting affine
//! remap to every source pixel before converting back to RGB.

use image::RgbImage;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::conversion::{ColorConverter, LabBuffer};
use crate::color::statistics::{ChannelStats, LabStats};
use crate::config::TransferConfig;
use crate::constants::{lab, processing::PARALLEL_THRESHOLD};
use crate::error::{ImageRole, Result};

/// Statistics record of a completed transfer
///
/// Captures the measured source and reference statistics, the blended
/// target statistics the remap aimed for, and how many Lab channel values
/// the range clamp truncated (clamping is lossy, so the report says how
/// often it fired).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Source image statistics in Lab space
    pub source: LabStats,
    /// Reference image statistics in Lab space
    pub reference: LabStats,
    /// Blended statistics the remap targeted
    pub target: LabStats,
    /// Number of Lab channel values truncated to the channel range
    pub clamped: usize,
}

/// Affine remap of one Lab channel
///
/// `(v - mean_in) * scale + mean_out`, clamped to `[min, max]`. A flat
/// source channel (zero spread) has no defined normalization, so it maps
/// every value straight to `mean_out`.
#[derive(Debug, Clone, Copy)]
struct ChannelMap {
    mean_in: f32,
    scale: f32,
    mean_out: f32,
    min: f32,
    max: f32,
    degenerate: bool,
}

impl ChannelMap {
    fn new(source: ChannelStats, target: ChannelStats, min: f32, max: f32) -> Self {
        let degenerate = source.is_degenerate();
        let scale = if degenerate {
            0.0
        } else {
            target.std_dev / source.std_dev
        };
        Self {
            mean_in: source.mean,
            scale,
            mean_out: target.mean,
            min,
            max,
            degenerate,
        }
    }

    /// Remap one value; the flag reports whether the clamp fired
    fn apply(&self, value: f32) -> (f32, bool) {
        let mapped = if self.degenerate {
            self.mean_out
        } else {
            (value - self.mean_in) * self.scale + self.mean_out
        };

        if mapped < self.min {
            (self.min, true)
        } else if mapped > self.max {
            (self.max, true)
        } else {
            (mapped, false)
        }
    }
}

/// Color transfer processor
///
/// Holds the configuration and converter; [`apply`](Self::apply) runs the
/// whole pipeline once per call with no retained state between calls.
#[derive(Debug, Default)]
pub struct ColorTransfer {
    config: TransferConfig,
    converter: ColorConverter,
}

impl ColorTransfer {
    /// Create a transfer processor with the default configuration
    pub fn new() -> Self {
        Self::with_config(TransferConfig::default())
    }

    /// Create a transfer processor with the given configuration
    pub fn with_config(config: TransferConfig) -> Self {
        Self {
            config,
            converter: ColorConverter::new(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Recolor `source` toward `reference` and return the result image
    ///
    /// The result has the source's dimensions. Source and reference may
    /// differ in size; statistics are computed per image.
    ///
    /// # Errors
    ///
    /// Returns `TransferError` if the configuration is invalid, either
    /// image has zero pixels, or conversion back to RGB fails.
    pub fn apply(&self, source: &RgbImage, reference: &RgbImage) -> Result<RgbImage> {
        self.apply_with_report(source, reference)
            .map(|(image, _)| image)
    }

    /// Recolor `source` toward `reference`, returning the result image
    /// together with a [`TransferReport`]
    ///
    /// # Errors
    ///
    /// Same conditions as [`apply`](Self::apply).
    pub fn apply_with_report(
        &self,
        source: &RgbImage,
        reference: &RgbImage,
    ) -> Result<(RgbImage, TransferReport)> {
        self.config.validate()?;

        let mut source_lab = self.converter.image_to_lab(source);
        let reference_lab = self.converter.image_to_lab(reference);

        let source_stats = LabStats::estimate(&source_lab, ImageRole::Source)?;
        let reference_stats = LabStats::estimate(&reference_lab, ImageRole::Reference)?;

        let mut target_stats = source_stats.blend(&reference_stats, self.config.alpha);
        if self.config.preserve_lightness {
            target_stats.l = source_stats.l;
        }
        debug!(
            "transfer alpha={}: source={:?} target={:?}",
            self.config.alpha, source_stats, target_stats
        );

        let clamped = remap(
            &mut source_lab,
            &source_stats,
            &target_stats,
            self.config.preserve_lightness,
        );
        if clamped > 0 {
            debug!(
                "remap clamped {} of {} channel values",
                clamped,
                source_lab.data().len()
            );
        }

        let image = self.converter.lab_to_image(&source_lab)?;
        Ok((
            image,
            TransferReport {
                source: source_stats,
                reference: reference_stats,
                target: target_stats,
                clamped,
            },
        ))
    }
}

/// Apply the per-channel affine remap to every pixel in place
///
/// Returns the number of channel values the range clamp truncated.
/// Each pixel depends only on its own values and the per-channel maps,
/// so buffers above the processing threshold are remapped on the rayon
/// pool with no observable ordering effect.
fn remap(
    buffer: &mut LabBuffer,
    source: &LabStats,
    target: &LabStats,
    preserve_lightness: bool,
) -> usize {
    let maps = [
        if preserve_lightness {
            None
        } else {
            Some(ChannelMap::new(source.l, target.l, lab::L_MIN, lab::L_MAX))
        },
        Some(ChannelMap::new(source.a, target.a, lab::AB_MIN, lab::AB_MAX)),
        Some(ChannelMap::new(source.b, target.b, lab::AB_MIN, lab::AB_MAX)),
    ];

    let remap_pixel = |px: &mut [f32]| -> usize {
        let mut clamped = 0;
        for (value, map) in px.iter_mut().zip(&maps) {
            if let Some(map) = map {
                let (mapped, hit) = map.apply(*value);
                *value = mapped;
                if hit {
                    clamped += 1;
                }
            }
        }
        clamped
    };

    if buffer.pixel_count() >= PARALLEL_THRESHOLD {
        buffer
            .data_mut()
            .par_chunks_exact_mut(LabBuffer::CHANNELS)
            .map(remap_pixel)
            .sum()
    } else {
        buffer
            .data_mut()
            .chunks_exact_mut(LabBuffer::CHANNELS)
            .map(remap_pixel)
            .sum()
    }
}
