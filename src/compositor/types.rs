use std::path::PathBuf;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::CompositeError;

/// An uploaded source image, held as its original encoded bytes
///
/// The bytes are kept around untouched so a failed compositing pass can fall
/// back to a byte-identical passthrough of the upload.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
}

impl SourceImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw encoded bytes as uploaded
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode into an RGB pixel buffer
    pub fn decode(&self) -> Result<RgbImage, CompositeError> {
        let dynamic = image::load_from_memory(&self.bytes).map_err(|e| {
            CompositeError::DecodeFailed {
                reason: e.to_string(),
            }
        })?;
        Ok(dynamic.to_rgb8())
    }
}

/// The outcome of one compositing pass
///
/// Always holds a usable encoded image: either the freshly composited JPEG
/// or, when the pass could not run, the original source bytes unchanged.
#[derive(Debug, Clone)]
pub struct CompositeResult {
    bytes: Vec<u8>,
    passthrough: bool,
}

impl CompositeResult {
    pub(crate) fn composited(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            passthrough: false,
        }
    }

    pub(crate) fn passthrough(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            passthrough: true,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// True when the source was returned unmodified (decode failure or
    /// unavailable rendering backend)
    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }
}

/// Rendering parameters for the compositing pass
///
/// Caption size and placement are fractions of image height rather than
/// absolute pixel counts, so small images keep the caption on-surface. The
/// defaults approximate a bold 64 px caption drawn 100 px above the bottom
/// edge of a 600 px tall source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderParams {
    /// Caption height as a fraction of image height
    pub font_scale: f32,

    /// Distance from the bottom edge to the caption baseline, as a fraction
    /// of image height
    pub bottom_margin: f32,

    /// Drop shadow blur radius in pixels
    pub shadow_blur: u32,

    /// Drop shadow offset in pixels (applied to both axes)
    pub shadow_offset: i32,

    /// Drop shadow opacity (0.0-1.0)
    pub shadow_alpha: f32,

    /// JPEG quality for the encoded output (1-100)
    pub jpeg_quality: u8,

    /// Optional TTF font override; the embedded bold sans is used otherwise
    pub font_path: Option<PathBuf>,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            font_scale: 0.10,
            bottom_margin: 0.16,
            shadow_blur: 10,
            shadow_offset: 3,
            shadow_alpha: 0.8,
            jpeg_quality: 90,
            font_path: None,
        }
    }
}
