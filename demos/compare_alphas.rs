//! Alpha-sweep comparison tool
//!
//! Runs the same source/reference pair through a range of blend factors
//! and writes one output image per alpha, printing a table of the target
//! statistics each run aimed for.

use color_transfer::{transfer_color_with_report, TransferConfig};
use std::{env, fs, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: compare_alphas <source_image> <reference_image> [output_dir]"
        );
        eprintln!("Example: cargo run --release --example compare_alphas photo.jpg sunset.jpg out/");
        process::exit(1);
    }

    let source_path = &args[1];
    let reference_path = &args[2];
    let output_dir = if args.len() > 3 { &args[3] } else { "alpha_sweep" };

    let source = match image::open(source_path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Error loading source: {}", e);
            process::exit(1);
        }
    };
    let reference = match image::open(reference_path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            eprintln!("Error loading reference: {}", e);
            process::exit(1);
        }
    };

    fs::create_dir_all(output_dir).expect("Failed to create output directory");

    let base_name = Path::new(source_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let alphas = [0.0f32, 0.25, 0.5, 0.75, 1.0];

    println!("| Alpha | Target L* mean | Target L* std | Clamped |");
    println!("|-------|----------------|---------------|---------|");

    for alpha in alphas {
        let config = TransferConfig::new(alpha);
        match transfer_color_with_report(&source, &reference, &config) {
            Ok((result, report)) => {
                let output_path =
                    format!("{}/{}_alpha_{:.2}.png", output_dir, base_name, alpha);
                if let Err(e) = result.save(&output_path) {
                    eprintln!("Warning: failed to save {}: {}", output_path, e);
                    continue;
                }
                println!(
                    "| {:.2}  | {:14.2} | {:13.2} | {:7} |",
                    alpha, report.target.l.mean, report.target.l.std_dev, report.clamped
                );
            }
            Err(e) => {
                eprintln!("Transfer failed at alpha {}: {}", alpha, e);
                process::exit(1);
            }
        }
    }

    eprintln!();
    eprintln!("Wrote {} images to {}/", alphas.len(), output_dir);
}
