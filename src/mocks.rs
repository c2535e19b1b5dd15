use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::errors::{CutoutError, Result};
use crate::stripper::BackgroundStripper;

/// Deterministic stand-in for the ONNX stripper.
///
/// Decodes the input, clears the alpha of the left quarter of the image (a
/// stand-in "background" region) and re-encodes as PNG. Deterministic so
/// rerun-idempotence tests can compare output bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStripper;

impl MockStripper {
    pub const fn new() -> Self {
        Self
    }
}

impl BackgroundStripper for MockStripper {
    fn remove_background(&self, input: &[u8]) -> Result<Vec<u8>> {
        let image = image::load_from_memory(input).map_err(|e| CutoutError::ImageProcessing {
            path: "in-memory buffer".to_string(),
            operation: "decode stripper input".to_string(),
            source: Box::new(e),
        })?;
        let mut rgba = image.to_rgba8();

        let background_width = rgba.width() / 4;
        for pixel in rgba
            .enumerate_pixels_mut()
            .filter(|(x, _, _)| *x < background_width)
            .map(|(_, _, pixel)| pixel)
        {
            pixel.0[3] = 0;
        }

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba).write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

/// Stripper that always fails, for exercising the failure-counting path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStripper;

impl BackgroundStripper for FailingStripper {
    fn remove_background(&self, _input: &[u8]) -> Result<Vec<u8>> {
        Err(CutoutError::Stripper {
            operation: "mock inference".to_string(),
            source: Box::new(std::io::Error::other("stripper intentionally failed")),
        })
    }
}

pub const fn create_mock_stripper() -> MockStripper {
    MockStripper::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn encoded_rgb_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([200, 100, 50]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_mock_output_is_rgba_png() {
        let output = MockStripper::new()
            .remove_background(&encoded_rgb_png(8, 8))
            .unwrap();
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.color().channel_count(), 4);
    }

    #[test]
    fn test_mock_clears_left_quarter_alpha() {
        let output = MockStripper::new()
            .remove_background(&encoded_rgb_png(8, 4))
            .unwrap();
        let rgba = image::load_from_memory(&output).unwrap().into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
        assert_eq!(rgba.get_pixel(1, 0).0[3], 0);
        assert_eq!(rgba.get_pixel(2, 0).0[3], 255);
        assert_eq!(rgba.get_pixel(7, 3).0[3], 255);
    }

    #[test]
    fn test_mock_rejects_undecodable_bytes() {
        let result = MockStripper::new().remove_background(b"definitely not an image");
        assert!(result.is_err());
    }

    #[test]
    fn test_failing_stripper_always_errors() {
        let result = FailingStripper.remove_background(&encoded_rgb_png(2, 2));
        assert!(result.is_err());
    }
}
