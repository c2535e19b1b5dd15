use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the cutout pipeline.
///
/// Each variant captures the context of its error domain (filesystem, image
/// processing, stripper/model operations) so callers never have to parse
/// error strings to learn what failed where.
#[derive(Error, Debug)]
pub enum CutoutError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing error: {operation} failed (file: {path})")]
    ImageProcessing {
        path: String,
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Stripper error: {operation} failed")]
    Stripper {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, CutoutError>;

/// Fallback for anyhow errors crossing into the crate's error type.
/// Code that has real context should construct the specific variant instead.
impl From<anyhow::Error> for CutoutError {
    fn from(err: anyhow::Error) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

/// Fallback for I/O errors without path/operation context. Callsites that
/// know the path construct `CutoutError::FileSystem` directly.
impl From<std::io::Error> for CutoutError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("unknown"),
            operation: "unknown".to_string(),
            source: err,
        }
    }
}

impl From<image::ImageError> for CutoutError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageProcessing {
            path: "unknown".to_string(),
            operation: "image processing".to_string(),
            source: Box::new(err),
        }
    }
}

impl From<ort::Error> for CutoutError {
    fn from(err: ort::Error) -> Self {
        Self::Stripper {
            operation: "ort operation".to_string(),
            source: Box::new(err),
        }
    }
}

/// Shape errors occur during tensor handling inside the stripper, so they
/// surface as stripper errors rather than a separate tensor category.
impl From<ndarray::ShapeError> for CutoutError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Stripper {
            operation: "tensor shape conversion".to_string(),
            source: Box::new(err),
        }
    }
}
