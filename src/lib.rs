pub mod config;
pub mod errors;
pub mod manifest;
pub mod mocks;
pub mod model;
pub mod stripper;
pub mod summary;

use std::fs;
use std::path::Path;

use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};

pub use config::Config;
pub use errors::{CutoutError, Result};
pub use model::OnnxStripper;
pub use stripper::BackgroundStripper;
pub use summary::RunSummary;

/// Sequential batch loop over the cutout manifest.
///
/// Files are processed strictly one at a time; every per-file error is
/// caught at the file boundary and folded into the [`RunSummary`], so a bad
/// entry never aborts the batch.
pub struct BatchRunner<S: BackgroundStripper> {
    stripper: S,
    config: Config,
}

impl<S: BackgroundStripper> BatchRunner<S> {
    pub const fn new(stripper: S, config: Config) -> Self {
        Self { stripper, config }
    }

    /// Process every manifest entry in order and report the tallies.
    ///
    /// The only fatal error is failing to create the output directory;
    /// without it no file could be written at all.
    pub fn run(&self, targets: &[&str]) -> Result<RunSummary> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| CutoutError::FileSystem {
            path: output_dir.clone(),
            operation: "output directory creation".to_string(),
            source: e,
        })?;

        let mut summary = RunSummary::new();

        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        for name in targets {
            let input_path = self.config.source_dir.join(name);
            if !input_path.exists() {
                pb.println(format!("⚠ Skipping (not found): {name}"));
                summary.record_skip();
                pb.inc(1);
                continue;
            }

            let output_path = output_dir.join(name);
            pb.println(format!("Processing: {name}"));
            match self.process_one(&input_path, &output_path) {
                Ok(()) => {
                    pb.println(format!("  ✓ Saved: {name}"));
                    summary.record_success();
                }
                Err(e) => {
                    pb.println(format!("  ✗ Error: {e}"));
                    summary.record_failure();
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(summary)
    }

    /// Read one file, strip its background, and write the RGBA PNG cutout.
    ///
    /// Encoding happens fully in memory before the save call, so a failure
    /// never leaves a partially written output file behind.
    pub fn process_one(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let input_bytes = fs::read(input_path).map_err(|e| CutoutError::FileSystem {
            path: input_path.to_path_buf(),
            operation: "input read".to_string(),
            source: e,
        })?;

        let stripped = self.stripper.remove_background(&input_bytes)?;

        let image =
            image::load_from_memory(&stripped).map_err(|e| CutoutError::ImageProcessing {
                path: input_path.display().to_string(),
                operation: "stripper output decode".to_string(),
                source: Box::new(e),
            })?;

        // to_rgba8 synthesizes an opaque alpha channel when the decoded
        // image lacks one and preserves an existing one
        let rgba = image.to_rgba8();

        rgba.save_with_format(output_path, ImageFormat::Png)
            .map_err(|e| CutoutError::ImageProcessing {
                path: output_path.display().to_string(),
                operation: "output save".to_string(),
                source: Box::new(e),
            })?;

        Ok(())
    }
}

impl BatchRunner<OnnxStripper> {
    pub fn with_onnx_model(config: Config) -> Result<Self> {
        let stripper = OnnxStripper::new(&config.model_path, config.device_id)?;
        Ok(Self::new(stripper, config))
    }
}
