//! Integration tests for the complete color transfer pipeline
//!
//! These tests validate the end-to-end behavior on synthetic images:
//! - Blend factor endpoints (identity at 0, full transfer at 1)
//! - Monotonic interpolation between them
//! - Degenerate (flat) channels on both the source and reference side
//! - Range clamping
//! - Input validation

use color_transfer::{
    transfer_color, transfer_color_with_report, ColorConverter, ImageRole, LabStats,
    TransferConfig, TransferError,
};
use image::{Rgb, RgbImage};

// ============================================================================
// Test image helpers
// ============================================================================

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Checkerboard alternating between two colors
fn checkerboard(width: u32, height: u32, even: [u8; 3], odd: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb(even)
        } else {
            Rgb(odd)
        }
    })
}

/// Horizontal gray ramp from black to white
fn gray_ramp(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1)) as u8;
        Rgb([v, v, v])
    })
}

fn lab_stats_of(image: &RgbImage, role: ImageRole) -> LabStats {
    let lab = ColorConverter::new().image_to_lab(image);
    LabStats::estimate(&lab, role).unwrap()
}

fn max_channel_diff(a: &RgbImage, b: &RgbImage) -> i16 {
    a.pixels()
        .zip(b.pixels())
        .flat_map(|(pa, pb)| (0..3).map(move |c| (pa[c] as i16 - pb[c] as i16).abs()))
        .max()
        .unwrap()
}

// ============================================================================
// Blend factor endpoint properties
// ============================================================================

#[test]
fn test_identity_at_alpha_zero() {
    let source = gray_ramp(16, 4);
    let reference = checkerboard(8, 8, [220, 40, 40], [40, 60, 200]);

    let result = transfer_color(&source, &reference, 0.0).unwrap();

    assert_eq!(result.dimensions(), source.dimensions());
    // Only color space round-trip quantization error remains
    assert!(max_channel_diff(&source, &result) <= 2);
}

#[test]
fn test_full_transfer_matches_reference_stats() {
    // Grays on both sides keep every remapped value well inside the Lab
    // ranges, so no clamping disturbs the statistics.
    let source = gray_ramp(16, 16);
    let reference = checkerboard(8, 8, [80, 80, 80], [170, 170, 170]);

    let result = transfer_color(&source, &reference, 1.0).unwrap();

    let expected = lab_stats_of(&reference, ImageRole::Reference);
    let measured = lab_stats_of(&result, ImageRole::Source);

    assert!((measured.l.mean - expected.l.mean).abs() < 1.0);
    assert!((measured.l.std_dev - expected.l.std_dev).abs() < 1.5);
    assert!((measured.a.mean - expected.a.mean).abs() < 1.0);
    assert!((measured.b.mean - expected.b.mean).abs() < 1.0);
}

#[test]
fn test_monotonic_blend() {
    let source = gray_ramp(16, 16);
    let reference = checkerboard(8, 8, [60, 60, 60], [120, 120, 120]);

    let alphas = [0.0f32, 0.25, 0.5, 0.75, 1.0];
    let means: Vec<f32> = alphas
        .iter()
        .map(|&alpha| {
            let result = transfer_color(&source, &reference, alpha).unwrap();
            lab_stats_of(&result, ImageRole::Source).l.mean
        })
        .collect();

    // The output lightness mean moves monotonically from the source's
    // toward the reference's...
    let descending = means[0] > means[4];
    for pair in means.windows(2) {
        if descending {
            assert!(pair[0] >= pair[1] - 0.5, "means not monotonic: {:?}", means);
        } else {
            assert!(pair[0] <= pair[1] + 0.5, "means not monotonic: {:?}", means);
        }
    }

    // ...and linearly in alpha between the endpoints
    for (i, &alpha) in alphas.iter().enumerate() {
        let expected = means[0] + alpha * (means[4] - means[0]);
        assert!(
            (means[i] - expected).abs() < 1.5,
            "mean at alpha {} deviates from linear blend: {} vs {}",
            alpha,
            means[i],
            expected
        );
    }
}

#[test]
fn test_self_transfer_is_identity() {
    let source = checkerboard(8, 8, [200, 80, 40], [30, 90, 160]);

    for alpha in [0.0f32, 0.3, 0.7, 1.0] {
        let result = transfer_color(&source, &source, alpha).unwrap();
        assert!(
            max_channel_diff(&source, &result) <= 2,
            "self transfer at alpha {} changed the image",
            alpha
        );
    }
}

// ============================================================================
// Degenerate channels
// ============================================================================

#[test]
fn test_degenerate_source_channels() {
    // A solid source has zero spread on every channel; the remap must not
    // divide and must emit the blended target mean everywhere.
    let source = solid(4, 4, [10, 200, 50]);
    let reference = checkerboard(8, 8, [0, 0, 0], [255, 255, 255]);

    let (result, report) =
        transfer_color_with_report(&source, &reference, &TransferConfig::new(0.5)).unwrap();

    assert!(report.source.l.is_degenerate());
    assert!(report.source.a.is_degenerate());
    assert!(report.source.b.is_degenerate());

    // Every output pixel carries the same color
    let first = *result.get_pixel(0, 0);
    assert!(result.pixels().all(|px| *px == first));

    // ...and that color sits at the blended target mean
    let lab = ColorConverter::new().rgb_to_lab(first[0], first[1], first[2]);
    assert!((lab.l - report.target.l.mean).abs() < 1.5);
    assert!((lab.a - report.target.a.mean).abs() < 1.5);
    assert!((lab.b - report.target.b.mean).abs() < 1.5);
}

#[test]
fn test_degenerate_reference_collapses_to_its_color() {
    // A flat reference is not an error: at alpha 1 the target spread is
    // zero, so every pixel lands on the reference color.
    let source = checkerboard(8, 8, [20, 20, 20], [240, 240, 240]);
    let reference = solid(4, 4, [180, 90, 60]);

    let result = transfer_color(&source, &reference, 1.0).unwrap();

    for px in result.pixels() {
        for c in 0..3 {
            assert!(
                (px[c] as i16 - reference.get_pixel(0, 0)[c] as i16).abs() <= 2,
                "pixel {:?} should match the reference color",
                px
            );
        }
    }
}

#[test]
fn test_scenario_checker_toward_gray() {
    // 2x2 black/white checker pulled halfway toward solid mid-gray.
    let source = checkerboard(2, 2, [0, 0, 0], [255, 255, 255]);
    let reference = solid(2, 2, [128, 128, 128]);

    let (result, report) =
        transfer_color_with_report(&source, &reference, &TransferConfig::new(0.5)).unwrap();

    // The estimator reports zero spread for the solid reference
    assert_eq!(report.reference.l.std_dev, 0.0);
    assert_eq!(report.reference.a.std_dev, 0.0);
    assert_eq!(report.reference.b.std_dev, 0.0);
    // The varied source is what drives the normalization, so no
    // degenerate fallback fires
    assert!(!report.source.l.is_degenerate());

    // Black pixels brightened, white pixels darkened
    for (x, y, px) in result.enumerate_pixels() {
        let input = source.get_pixel(x, y);
        if input[0] == 0 {
            assert!(px[0] > 0 && px[0] < 128, "black pixel not pulled up: {:?}", px);
        } else {
            assert!(px[0] < 255 && px[0] > 128, "white pixel not pulled down: {:?}", px);
        }
    }
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_clamping_truncates_to_boundary() {
    // Source: one mid gray among bright grays (small spread, skewed).
    // Reference: high-contrast grays (large spread). At alpha 1 the dark
    // outlier maps below L* = 0 and must be truncated, not wrapped.
    let source = RgbImage::from_fn(2, 2, |x, y| {
        if x == 0 && y == 0 {
            Rgb([119, 119, 119])
        } else {
            Rgb([227, 227, 227])
        }
    });
    let reference = checkerboard(2, 2, [27, 27, 27], [227, 227, 227]);

    let (result, report) =
        transfer_color_with_report(&source, &reference, &TransferConfig::new(1.0)).unwrap();

    assert!(report.clamped > 0, "expected the lightness clamp to fire");

    // The outlier hit the lower boundary: pure black after conversion
    let outlier = result.get_pixel(0, 0);
    assert!(
        outlier[0] <= 2 && outlier[1] <= 2 && outlier[2] <= 2,
        "clamped pixel should be black, got {:?}",
        outlier
    );
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn test_alpha_out_of_range_rejected() {
    let source = solid(2, 2, [100, 100, 100]);
    let reference = solid(2, 2, [50, 50, 50]);

    for alpha in [-0.1f32, 1.1, f32::NAN] {
        let result = transfer_color(&source, &reference, alpha);
        match result {
            Err(TransferError::InvalidAlpha { .. }) => {}
            other => panic!("alpha {} should be rejected, got {:?}", alpha, other),
        }
    }
}

#[test]
fn test_empty_source_rejected() {
    let source = RgbImage::new(0, 0);
    let reference = solid(2, 2, [50, 50, 50]);

    match transfer_color(&source, &reference, 0.5) {
        Err(TransferError::EmptyImage {
            role: ImageRole::Source,
        }) => {}
        other => panic!("expected empty source error, got {:?}", other),
    }
}

#[test]
fn test_empty_reference_rejected() {
    let source = solid(2, 2, [50, 50, 50]);
    let reference = RgbImage::new(0, 0);

    match transfer_color(&source, &reference, 0.5) {
        Err(TransferError::EmptyImage {
            role: ImageRole::Reference,
        }) => {}
        other => panic!("expected empty reference error, got {:?}", other),
    }
}

#[test]
fn test_dimension_mismatch_is_accepted() {
    let source = gray_ramp(7, 3);
    let reference = checkerboard(4, 9, [10, 120, 210], [240, 130, 20]);

    let result = transfer_color(&source, &reference, 0.5).unwrap();
    assert_eq!(result.dimensions(), (7, 3));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_preserve_lightness_keeps_l_channel() {
    // Muted colors keep every remapped pixel inside the sRGB gamut, so
    // the gamut clamp cannot disturb the measured statistics.
    let source = checkerboard(8, 8, [140, 110, 110], [110, 110, 140]);
    let reference = checkerboard(8, 8, [110, 140, 110], [140, 140, 110]);

    let config = TransferConfig {
        alpha: 1.0,
        preserve_lightness: true,
    };
    let (result, report) = transfer_color_with_report(&source, &reference, &config).unwrap();

    // The reported target lightness is the source's own
    assert_eq!(report.target.l, report.source.l);

    // Per pixel, lightness survives within round-trip tolerance
    let converter = ColorConverter::new();
    let source_lab = converter.image_to_lab(&source);
    let result_lab = converter.image_to_lab(&result);
    for (input, output) in source_lab.pixels().zip(result_lab.pixels()) {
        assert!(
            (input.l - output.l).abs() < 2.0,
            "lightness drifted: {} -> {}",
            input.l,
            output.l
        );
    }

    // While the chromaticity moved toward the reference
    let measured = LabStats::estimate(&result_lab, ImageRole::Source).unwrap();
    assert!((measured.a.mean - report.reference.a.mean).abs() < 3.0);
}

#[test]
fn test_report_stats_are_consistent() {
    let source = gray_ramp(8, 8);
    let reference = checkerboard(8, 8, [80, 80, 80], [170, 170, 170]);
    let config = TransferConfig::new(0.25);

    let (_, report) = transfer_color_with_report(&source, &reference, &config).unwrap();

    let expected = report.source.blend(&report.reference, config.alpha);
    assert_eq!(report.target, expected);
}
