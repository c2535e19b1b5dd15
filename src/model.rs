use std::{io::Cursor, path::Path};

use image::{
    imageops, imageops::FilterType, DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Rgb,
    RgbImage, RgbaImage,
};
use ndarray::prelude::*;
use nshare::AsNdarray3;
use num_traits::AsPrimitive;
use ort::value::TensorRef;
use ort::{
    execution_providers::{CUDAExecutionProvider, TensorRTExecutionProvider},
    session::{builder::SessionBuilder, Session},
};
use parking_lot::Mutex;

use crate::{
    errors::{CutoutError, Result},
    stripper::BackgroundStripper,
};

/// Normalization constants the U²-Net family of models was trained with.
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// ONNX-backed implementation of [`BackgroundStripper`].
///
/// Runs a salient-object-segmentation model (U²-Net style: square RGB input,
/// single-channel saliency map output) and turns the predicted map into the
/// alpha channel of the source image.
pub struct OnnxStripper {
    image_size: u32,
    input_name: String,
    output_name: String,
    // ort inference takes &mut Session
    session: Mutex<Session>,
}

impl OnnxStripper {
    pub fn new(model_path: &Path, device_id: i32) -> Result<Self> {
        let mut session = SessionBuilder::new()
            .map_err(|e| CutoutError::Stripper {
                operation: "session builder init".to_string(),
                source: Box::new(e),
            })?
            .with_execution_providers([
                TensorRTExecutionProvider::default()
                    .with_device_id(device_id)
                    .build(),
                CUDAExecutionProvider::default()
                    .with_device_id(device_id)
                    .build(),
            ])
            .map_err(|e| CutoutError::Stripper {
                operation: "execution provider setup".to_string(),
                source: Box::new(e),
            })?
            .with_memory_pattern(true)
            .map_err(|e| CutoutError::Stripper {
                operation: "memory pattern setup".to_string(),
                source: Box::new(e),
            })?
            .commit_from_file(model_path)
            .map_err(|e| CutoutError::Stripper {
                operation: format!("model load: {}", model_path.display()),
                source: Box::new(e),
            })?;

        let shape = session.inputs[0]
            .input_type
            .tensor_shape()
            .ok_or_else(|| CutoutError::Stripper {
                operation: "model input shape lookup".to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "model input is not a tensor",
                )),
            })?
            .to_vec();
        let size = *shape.get(2).unwrap_or(&-1);
        if size <= 0 {
            return Err(CutoutError::Configuration {
                message: format!("model input height must be static and positive, got {size}"),
            });
        }
        let image_size = size as u32;

        let input_name = session.inputs[0].name.clone();
        let output_name = session.outputs[0].name.clone();

        // initialize the session with a zero tensor
        let data = Array4::<f32>::zeros((1, 3, image_size as usize, image_size as usize));
        session
            .run(ort::inputs![input_name.as_str() => TensorRef::from_array_view(&data)
                .map_err(|e| CutoutError::Stripper {
                    operation: "warm-up tensor creation".to_string(),
                    source: Box::new(e),
                })?])
            .map_err(|e| CutoutError::Stripper {
                operation: "warm-up inference".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            image_size,
            input_name,
            output_name,
            session: Mutex::new(session),
        })
    }

    pub const fn image_size(&self) -> u32 {
        self.image_size
    }

    fn predict(&self, tensor: ArrayView4<f32>) -> Result<Array4<f32>> {
        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(&tensor.as_standard_layout())?
        ])?;
        Ok(outputs[self.output_name.as_str()]
            .try_extract_array::<f32>()?
            .into_dimensionality::<Ix4>()?
            .to_owned())
    }
}

impl BackgroundStripper for OnnxStripper {
    fn remove_background(&self, input: &[u8]) -> Result<Vec<u8>> {
        let image = image::load_from_memory(input).map_err(|e| CutoutError::ImageProcessing {
            path: "in-memory buffer".to_string(),
            operation: "decode stripper input".to_string(),
            source: Box::new(e),
        })?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let tensor = preprocess(&rgb, self.image_size);
        let saliency = self.predict(tensor.view())?;
        let mask = postprocess_mask(saliency, self.image_size, width, height)?;
        let rgba = apply_alpha_mask(&rgb, &mask)?;

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| CutoutError::ImageProcessing {
                path: "in-memory buffer".to_string(),
                operation: "encode stripper output".to_string(),
                source: Box::new(e),
            })?;
        Ok(buffer.into_inner())
    }
}

/// Resize to the model's square input and normalize into an NCHW tensor.
///
/// Subpixels are scaled by the resized image's maximum value (not a fixed
/// 255) before the mean/std normalization, matching how the model's training
/// pipeline prepared its inputs.
pub fn preprocess(image: &RgbImage, image_size: u32) -> Array4<f32> {
    let resized = imageops::resize(image, image_size, image_size, FilterType::Lanczos3);
    let max = f32::from(resized.as_raw().iter().copied().max().unwrap_or(0).max(1));

    let mut tensor = resized
        .as_ndarray3()
        .insert_axis(Axis(0))
        .map(|&v| f32::from(v) / max);
    for (channel, (mean, std)) in IMAGENET_MEAN.iter().zip(IMAGENET_STD).enumerate() {
        tensor
            .slice_mut(s![0, channel, .., ..])
            .mapv_inplace(|v| (v - mean) / std);
    }
    tensor
}

/// Turn a raw saliency map into an 8-bit alpha mask at the source image size.
///
/// The map is min-max normalized to [0, 1] first; a flat map (no range)
/// yields a fully transparent mask rather than dividing by zero.
pub fn postprocess_mask(
    saliency: Array4<f32>,
    image_size: u32,
    width: u32,
    height: u32,
) -> Result<GrayImage> {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in &saliency {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let range = hi - lo;
    let normalized = if range > f32::EPSILON {
        saliency.mapv(|v| (v - lo) / range)
    } else {
        saliency.mapv(|_| 0.0)
    };

    let raw = normalized.into_raw_vec_and_offset().0;
    let mask = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(image_size, image_size, raw)
        .ok_or_else(|| CutoutError::Stripper {
            operation: "mask buffer construction".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("saliency map does not cover {image_size}x{image_size}"),
            )),
        })?;
    let mask = imageops::resize(&mask, width, height, FilterType::Lanczos3);

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let Luma([alpha]) = *mask.get_pixel(x, y);
        let alpha: u8 = (alpha.clamp(0.0, 1.0) * 255.0).round().as_();
        Luma([alpha])
    }))
}

/// Zip an RGB image with an alpha mask of the same dimensions into RGBA.
pub fn apply_alpha_mask(image: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(CutoutError::Stripper {
            operation: "alpha mask application".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "image is {}x{} but mask is {}x{}",
                    image.width(),
                    image.height(),
                    mask.width(),
                    mask.height()
                ),
            )),
        });
    }

    let pixels = image
        .pixels()
        .zip(mask.pixels())
        .flat_map(|(&Rgb([red, green, blue]), &Luma([alpha]))| [red, green, blue, alpha])
        .collect::<Vec<u8>>();

    RgbaImage::from_raw(image.width(), image.height(), pixels).ok_or_else(|| {
        CutoutError::Stripper {
            operation: "alpha mask application".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "failed to assemble RGBA buffer",
            )),
        }
    })
}
