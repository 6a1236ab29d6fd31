use image::RgbImage;
use tracing::{debug, warn};

use crate::{
    compositor::text::{self, Shadow},
    compositor::types::{CompositeResult, RenderParams, SourceImage},
    error::CompositeError,
    overlay::OverlayDirective,
};

/// Floor for the proportional caption size so tiny images still render
/// readable glyphs
const MIN_FONT_PX: f32 = 10.0;

/// The vibrant-effect compositor
///
/// One pass layers a translucent color wash over the source, re-draws the
/// source with multiply blend for a deepened color cast, then renders the
/// caption bottom-center in bold white over a soft drop shadow. Output is
/// always JPEG with the source's exact dimensions.
///
/// The pass never fails: an undecodable source or an unavailable rendering
/// backend both degrade to a byte-identical passthrough of the upload.
pub struct Compositor {
    params: RenderParams,
}

impl Compositor {
    pub fn new(params: RenderParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Apply the vibrant effect, falling back to the unmodified source on
    /// any internal failure
    pub fn composite(&self, source: &SourceImage, directive: &OverlayDirective) -> CompositeResult {
        match self.try_composite(source, directive) {
            Ok(bytes) => CompositeResult::composited(bytes),
            Err(e) => {
                warn!("Compositing failed, passing source through unchanged: {}", e);
                CompositeResult::passthrough(source.bytes().to_vec())
            }
        }
    }

    fn try_composite(
        &self,
        source: &SourceImage,
        directive: &OverlayDirective,
    ) -> Result<Vec<u8>, CompositeError> {
        let base = source.decode()?;
        let font = text::load_font(self.params.font_path.as_deref())?;

        let (width, height) = base.dimensions();
        debug!(
            "Compositing {}x{} with color {} and caption '{}'",
            width, height, directive.color, directive.text
        );

        let mut canvas = self.apply_color_wash(&base, directive);
        self.draw_caption(&mut canvas, &font, directive);
        self.encode_jpeg(&canvas)
    }

    /// Flat translucent wash (source-over) followed by a multiply-blend
    /// re-draw of the source, fused into a single pixel pass
    fn apply_color_wash(&self, base: &RgbImage, directive: &OverlayDirective) -> RgbImage {
        let color = directive.color;
        let alpha = color.alpha.clamp(0.0, 1.0);
        let overlay = [color.r as f32, color.g as f32, color.b as f32];

        let mut canvas = base.clone();
        for (src, dst) in base.pixels().zip(canvas.pixels_mut()) {
            for c in 0..3 {
                let washed = src.0[c] as f32 * (1.0 - alpha) + overlay[c] * alpha;
                // Multiply blend of the original on top of the wash
                dst.0[c] = (washed * src.0[c] as f32 / 255.0).round() as u8;
            }
        }
        canvas
    }

    fn draw_caption(&self, canvas: &mut RgbImage, font: &rusttype::Font<'static>, directive: &OverlayDirective) {
        let (width, height) = canvas.dimensions();
        let font_px = (height as f32 * self.params.font_scale).max(MIN_FONT_PX);
        let baseline_y = height as f32 - (height as f32 * self.params.bottom_margin);

        let shadow = Shadow {
            blur: self.params.shadow_blur,
            offset: self.params.shadow_offset,
            alpha: self.params.shadow_alpha.clamp(0.0, 1.0),
        };

        text::draw_caption(
            canvas,
            font,
            directive.text.as_str(),
            font_px,
            width as f32 / 2.0,
            baseline_y,
            shadow,
        );
    }

    fn encode_jpeg(&self, canvas: &RgbImage) -> Result<Vec<u8>, CompositeError> {
        let (width, height) = canvas.dimensions();
        let mut bytes = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            &mut bytes,
            self.params.jpeg_quality,
        );
        encoder
            .encode(canvas.as_raw(), width, height, image::ColorType::Rgb8)
            .map_err(|e| CompositeError::EncodingFailed {
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(RenderParams::default())
    }
}
