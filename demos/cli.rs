//! Command-line interface for color_transfer
//!
//! Thin wrapper around the library: loads two images, runs the transfer,
//! saves the result, and prints the statistics report as JSON.

use color_transfer::{transfer_color_with_report, TransferConfig, TransferReport};
use image::RgbImage;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut alpha = color_transfer::constants::DEFAULT_ALPHA;
    let mut preserve_lightness = false;
    let mut output_path = String::from("transferred.png");
    let mut positional: Vec<String> = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--alpha" | "-a" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| {
                    eprintln!("Error: --alpha requires a value");
                    process::exit(1);
                });
                alpha = value.parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid alpha value '{}'", value);
                    process::exit(1);
                });
            }
            "--output" | "-o" => {
                i += 1;
                match args.get(i) {
                    Some(value) => output_path = value.clone(),
                    None => {
                        eprintln!("Error: --output requires a path");
                        process::exit(1);
                    }
                }
            }
            "--preserve-lightness" => {
                preserve_lightness = true;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                positional.push(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if positional.len() != 2 {
        print_help(&args[0]);
        process::exit(1);
    }

    let source = load_image(&positional[0]);
    let reference = load_image(&positional[1]);

    let config = TransferConfig {
        alpha,
        preserve_lightness,
    };

    match transfer_color_with_report(&source, &reference, &config) {
        Ok((result, report)) => {
            if let Err(e) = result.save(&output_path) {
                eprintln!("Error: failed to save '{}': {}", output_path, e);
                process::exit(1);
            }
            print_report(&report);
            eprintln!("Saved result to {}", output_path);
        }
        Err(error) => {
            eprintln!("Transfer failed: {}", error);
            process::exit(1);
        }
    }
}

fn load_image(path: &str) -> RgbImage {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' does not exist", path);
        process::exit(1);
    }
    match image::open(path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Error: failed to load '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!(
        "Usage: {} [OPTIONS] <source_image> <reference_image>",
        program_name
    );
    eprintln!();
    eprintln!("Recolor the source image toward the reference image's color statistics.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --alpha, -a <A>       Blend factor in [0, 1] (default: 0.5)");
    eprintln!("  --output, -o <PATH>   Output file (default: transferred.png)");
    eprintln!("  --preserve-lightness  Transfer only the chromaticity channels");
    eprintln!("  --help, -h            Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} photo.jpg sunset.jpg", program_name);
    eprintln!("  {} --alpha 0.8 -o out.png photo.jpg sunset.jpg", program_name);
}

fn print_report(report: &TransferReport) {
    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }

    // Print summary to stderr for human reading
    eprintln!();
    eprintln!("Color Transfer Summary:");
    eprintln!(
        "  Source   L*: mean {:6.2}, std {:6.2}",
        report.source.l.mean, report.source.l.std_dev
    );
    eprintln!(
        "  Reference L*: mean {:6.2}, std {:6.2}",
        report.reference.l.mean, report.reference.l.std_dev
    );
    eprintln!(
        "  Target   L*: mean {:6.2}, std {:6.2}",
        report.target.l.mean, report.target.l.std_dev
    );
    if report.clamped > 0 {
        eprintln!("  Clamped {} channel values to the Lab range", report.clamped);
    }
}
