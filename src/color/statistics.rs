//! Per-channel statistics over Lab images
//!
//! Computes the first- and second-order statistics the transfer remap is
//! built from: arithmetic mean and population standard deviation
//! (divisor = pixel count) of each Lab channel.

use serde::{Deserialize, Serialize};

use crate::color::conversion::LabBuffer;
use crate::error::{ImageRole, Result, TransferError};

/// Mean and spread of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Arithmetic mean over all pixels
    pub mean: f32,
    /// Population standard deviation over all pixels
    pub std_dev: f32,
}

impl ChannelStats {
    /// Interpolate toward another channel's statistics
    ///
    /// `alpha = 0` returns `self`, `alpha = 1` returns `toward`.
    pub fn blend(&self, toward: &ChannelStats, alpha: f32) -> ChannelStats {
        ChannelStats {
            mean: alpha * toward.mean + (1.0 - alpha) * self.mean,
            std_dev: alpha * toward.std_dev + (1.0 - alpha) * self.std_dev,
        }
    }

    /// Whether the channel is flat (zero spread)
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Per-channel statistics of a Lab image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabStats {
    /// Lightness channel statistics
    pub l: ChannelStats,
    /// a* (green-red) channel statistics
    pub a: ChannelStats,
    /// b* (blue-yellow) channel statistics
    pub b: ChannelStats,
}

impl LabStats {
    /// Estimate per-channel statistics over all pixels of a Lab buffer
    ///
    /// Uses a two-pass estimate: means first, then squared deviations from
    /// the f32-rounded means accumulated in f64. Deviations are taken in
    /// f32 so a flat channel measures exactly zero spread, matching the
    /// arithmetic the remap applies per pixel.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Lab image to measure
    /// * `role` - which input the buffer came from, for error reporting
    ///
    /// # Errors
    ///
    /// Returns `TransferError::EmptyImage` for a zero-pixel buffer.
    pub fn estimate(buffer: &LabBuffer, role: ImageRole) -> Result<LabStats> {
        let count = buffer.pixel_count();
        if count == 0 {
            return Err(TransferError::EmptyImage { role });
        }
        let count = count as f64;

        let mut sum = [0.0f64; LabBuffer::CHANNELS];
        for px in buffer.data().chunks_exact(LabBuffer::CHANNELS) {
            for (acc, &value) in sum.iter_mut().zip(px) {
                *acc += value as f64;
            }
        }
        let mean: Vec<f32> = sum.iter().map(|&s| (s / count) as f32).collect();

        let mut sum_sq_dev = [0.0f64; LabBuffer::CHANNELS];
        for px in buffer.data().chunks_exact(LabBuffer::CHANNELS) {
            for (c, (acc, &value)) in sum_sq_dev.iter_mut().zip(px).enumerate() {
                let dev = (value - mean[c]) as f64;
                *acc += dev * dev;
            }
        }

        let channel = |c: usize| ChannelStats {
            mean: mean[c],
            std_dev: (sum_sq_dev[c] / count).sqrt() as f32,
        };

        Ok(LabStats {
            l: channel(0),
            a: channel(1),
            b: channel(2),
        })
    }

    /// Interpolate toward another image's statistics, channel by channel
    pub fn blend(&self, toward: &LabStats, alpha: f32) -> LabStats {
        LabStats {
            l: self.l.blend(&toward.l, alpha),
            a: self.a.blend(&toward.a, alpha),
            b: self.b.blend(&toward.b, alpha),
        }
    }

    /// Channel statistics in interleaving order (L*, a*, b*)
    pub fn channels(&self) -> [ChannelStats; 3] {
        [self.l, self.a, self.b]
    }
}
