use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use tempfile::TempDir;

use cutout_rs::{manifest, BackgroundStripper, BatchRunner, Config};

/// Stripper that returns its input untouched, so the runner's own
/// normalization step is observable in isolation.
#[derive(Debug, Clone, Copy)]
struct PassthroughStripper;

impl BackgroundStripper for PassthroughStripper {
    fn remove_background(&self, input: &[u8]) -> cutout_rs::Result<Vec<u8>> {
        Ok(input.to_vec())
    }
}

fn test_config(root: &Path) -> Config {
    Config::parse_from([
        "cutout-rs",
        root.join("cards").to_str().unwrap(),
        root.join("cutouts").to_str().unwrap(),
    ])
}

#[test]
fn test_manifest_matches_observed_pipeline() {
    assert_eq!(manifest::CUTOUT_TARGETS.len(), 30);
    assert!(manifest::CUTOUT_TARGETS.contains(&"latina_female_agent.png"));
    assert!(manifest::CUTOUT_TARGETS.contains(&"Grumpy_orange_Crypto_Cat_ac1ff7e8.png"));
}

#[test]
fn test_runner_synthesizes_alpha_for_single_channel_input() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    fs::create_dir_all(&config.source_dir).unwrap();
    let output_dir = config.output_dir.clone();

    // grayscale PNG: one channel in, four channels out
    let gray = GrayImage::from_pixel(6, 6, Luma([128]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(gray)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    fs::write(config.source_dir.join("gray.png"), buffer.into_inner()).unwrap();

    let runner = BatchRunner::new(PassthroughStripper, config);
    let summary = runner.run(&["gray.png"]).unwrap();
    assert_eq!(summary.succeeded, 1);

    let output = image::open(output_dir.join("gray.png")).unwrap();
    assert_eq!(output.color().channel_count(), 4);
    assert!(output.into_rgba8().pixels().all(|p| p.0[3] == 255));
}

#[test]
fn test_output_is_png_even_for_jpeg_input() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    fs::create_dir_all(&config.source_dir).unwrap();
    let output_dir = config.output_dir.clone();

    let rgb = image::RgbImage::from_pixel(10, 10, image::Rgb([60, 60, 60]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    fs::write(config.source_dir.join("photo.png"), buffer.into_inner()).unwrap();

    let runner = BatchRunner::new(PassthroughStripper, config);
    let summary = runner.run(&["photo.png"]).unwrap();
    assert_eq!(summary.succeeded, 1);

    let output_bytes = fs::read(output_dir.join("photo.png")).unwrap();
    assert_eq!(
        image::guess_format(&output_bytes).unwrap(),
        ImageFormat::Png
    );
}

#[test]
fn test_process_one_reports_unreadable_input() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    let output_dir = config.output_dir.clone();

    let runner = BatchRunner::new(PassthroughStripper, config);
    let result = runner.process_one(
        &temp.path().join("cards/nonexistent.png"),
        &output_dir.join("nonexistent.png"),
    );
    assert!(result.is_err());
}

#[test]
fn test_trait_object_safety_at_the_stripper_seam() {
    let stripper: Box<dyn BackgroundStripper> = Box::new(PassthroughStripper);
    let bytes = vec![1u8, 2, 3];
    assert_eq!(stripper.remove_background(&bytes).unwrap(), bytes);
}
