use crate::errors::Result;

/// Background removal capability, bytes in, bytes out.
///
/// Input is any encoded image the decoder understands; output is an encoded
/// image whose background pixels carry zero (or reduced) alpha. This is the
/// one seam of the pipeline, so the real ONNX-backed implementation can be
/// swapped for a mock in tests without loading a model.
pub trait BackgroundStripper: Send + Sync {
    fn remove_background(&self, input: &[u8]) -> Result<Vec<u8>>;
}
