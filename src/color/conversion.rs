//! Color space conversion between 8-bit sRGB images and CIE Lab buffers
//!
//! Both directions go through the `palette` crate (sRGB under D65), so the
//! round trip is consistent: `lab_to_image(image_to_lab(x))` reproduces `x`
//! within 8-bit quantization error. Out-of-gamut Lab values are clamped to
//! the sRGB cube on the way back.

use image::RgbImage;
use palette::{FromColor, IntoColor, Lab, Srgb};
use rayon::prelude::*;

use crate::constants::processing::PARALLEL_THRESHOLD;
use crate::error::{Result, TransferError};

/// Interleaved CIE Lab pixel buffer
///
/// Stores `width * height` pixels as consecutive `[L*, a*, b*]` triples.
/// The working representation of the transfer pipeline; images enter and
/// leave as [`RgbImage`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl LabBuffer {
    /// Values per pixel
    pub const CHANNELS: usize = 3;

    /// Create a buffer from interleaved L*, a*, b* data
    ///
    /// # Errors
    ///
    /// Returns `TransferError::ConversionError` if `data` does not hold
    /// exactly `width * height` Lab triples.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if data.len() != expected {
            return Err(TransferError::conversion(format!(
                "Lab buffer length mismatch: expected {} values for {}x{} pixels, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Interleaved Lab values
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the interleaved Lab values
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Iterate over pixels as `palette::Lab` values
    pub fn pixels(&self) -> impl Iterator<Item = Lab> + '_ {
        self.data
            .chunks_exact(Self::CHANNELS)
            .map(|px| Lab::new(px[0], px[1], px[2]))
    }
}

/// Converter between 8-bit sRGB images and Lab buffers
#[derive(Debug, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab
    pub fn rgb_to_lab(&self, r: u8, g: u8, b: u8) -> Lab {
        let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        Lab::from_color(srgb)
    }

    /// Convert Lab back to RGB (0-255), clamped to the sRGB gamut
    pub fn lab_to_rgb(&self, lab: Lab) -> [u8; 3] {
        let srgb: Srgb = lab.into_color();
        [
            (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Convert an RGB image to an interleaved Lab buffer
    ///
    /// Pixel conversions are independent; images above the processing
    /// threshold are converted on the rayon pool.
    pub fn image_to_lab(&self, image: &RgbImage) -> LabBuffer {
        let (width, height) = image.dimensions();
        let raw = image.as_raw();
        let mut data = vec![0.0f32; raw.len()];

        let convert = |out: &mut [f32], px: &[u8]| {
            let lab = self.rgb_to_lab(px[0], px[1], px[2]);
            out[0] = lab.l;
            out[1] = lab.a;
            out[2] = lab.b;
        };

        let pixel_count = width as usize * height as usize;
        if pixel_count >= PARALLEL_THRESHOLD {
            data.par_chunks_exact_mut(LabBuffer::CHANNELS)
                .zip(raw.par_chunks_exact(LabBuffer::CHANNELS))
                .for_each(|(out, px)| convert(out, px));
        } else {
            for (out, px) in data
                .chunks_exact_mut(LabBuffer::CHANNELS)
                .zip(raw.chunks_exact(LabBuffer::CHANNELS))
            {
                convert(out, px);
            }
        }

        LabBuffer {
            width,
            height,
            data,
        }
    }

    /// Convert a Lab buffer back to an RGB image
    ///
    /// # Errors
    ///
    /// Returns `TransferError::ConversionError` if the buffer does not
    /// assemble into an image of its declared dimensions.
    pub fn lab_to_image(&self, lab: &LabBuffer) -> Result<RgbImage> {
        let mut raw = vec![0u8; lab.data.len()];

        let convert = |out: &mut [u8], px: &[f32]| {
            let rgb = self.lab_to_rgb(Lab::new(px[0], px[1], px[2]));
            out.copy_from_slice(&rgb);
        };

        if lab.pixel_count() >= PARALLEL_THRESHOLD {
            raw.par_chunks_exact_mut(LabBuffer::CHANNELS)
                .zip(lab.data.par_chunks_exact(LabBuffer::CHANNELS))
                .for_each(|(out, px)| convert(out, px));
        } else {
            for (out, px) in raw
                .chunks_exact_mut(LabBuffer::CHANNELS)
                .zip(lab.data.chunks_exact(LabBuffer::CHANNELS))
            {
                convert(out, px);
            }
        }

        RgbImage::from_raw(lab.width, lab.height, raw).ok_or_else(|| {
            TransferError::conversion(format!(
                "Failed to assemble {}x{} RGB image from Lab buffer",
                lab.width, lab.height
            ))
        })
    }
}
