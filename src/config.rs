use clap::Parser;
use std::path::PathBuf;

/// Defaults reproduce the zero-argument invocation used by the asset
/// pipeline: source and output directories are fixed relative paths.
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Directory holding the source card images
    #[arg(default_value = "darkwave-web/public/trading-cards")]
    pub source_dir: PathBuf,

    /// Directory the transparent cutouts are written to (created if absent)
    #[arg(default_value = "darkwave-web/public/trading-cards-cutouts")]
    pub output_dir: PathBuf,

    /// Path to the segmentation model (U²-Net style ONNX artifact)
    #[arg(short, long, default_value = "u2net.onnx")]
    pub model_path: PathBuf,

    /// GPU device id, ignored when no GPU execution provider is available
    #[arg(short, long, default_value_t = 0)]
    pub device_id: i32,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_pipeline_paths() {
        let config = Config::parse_from(["cutout-rs"]);
        assert_eq!(
            config.source_dir,
            PathBuf::from("darkwave-web/public/trading-cards")
        );
        assert_eq!(
            config.output_dir,
            PathBuf::from("darkwave-web/public/trading-cards-cutouts")
        );
        assert_eq!(config.model_path, PathBuf::from("u2net.onnx"));
        assert_eq!(config.device_id, 0);
    }

    #[test]
    fn test_directories_are_overridable() {
        let config = Config::parse_from(["cutout-rs", "in", "out", "-m", "model.onnx"]);
        assert_eq!(config.source_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.model_path, PathBuf::from("model.onnx"));
    }
}
