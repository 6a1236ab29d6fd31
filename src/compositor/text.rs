//! Caption rasterization: cached font loading, glyph drawing with manual
//! alpha blending, and the soft drop shadow that keeps white text legible
//! against arbitrary backgrounds.

use std::{collections::HashMap, path::Path, sync::Arc};

use image::RgbImage;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rusttype::{point, Font, Scale};

use crate::error::CompositeError;

/// Bold sans shipped with the binary so rendering works without any
/// installed fonts
static EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const EMBEDDED_KEY: &str = "<embedded>";

static FONT_CACHE: Lazy<Mutex<HashMap<String, Arc<Font<'static>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Drop shadow parameters for one caption draw
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub blur: u32,
    pub offset: i32,
    pub alpha: f32,
}

/// Load a font, caching parsed instances by path
///
/// `None` selects the embedded bold sans. Failures map to
/// [`CompositeError::SurfaceUnavailable`], the recoverable "no rendering
/// backend" case.
pub fn load_font(path: Option<&Path>) -> Result<Arc<Font<'static>>, CompositeError> {
    let key = match path {
        Some(p) => p.display().to_string(),
        None => EMBEDDED_KEY.to_string(),
    };

    if let Some(f) = FONT_CACHE.lock().get(&key) {
        return Ok(Arc::clone(f));
    }

    let font = match path {
        Some(p) => {
            let bytes = std::fs::read(p).map_err(|e| CompositeError::SurfaceUnavailable {
                reason: format!("failed to read font {}: {}", p.display(), e),
            })?;
            Font::try_from_vec(bytes).ok_or_else(|| CompositeError::SurfaceUnavailable {
                reason: format!("failed to parse font {}", p.display()),
            })?
        }
        None => {
            Font::try_from_bytes(EMBEDDED_FONT).ok_or_else(|| {
                CompositeError::SurfaceUnavailable {
                    reason: "embedded font failed to parse".to_string(),
                }
            })?
        }
    };

    let font = Arc::new(font);
    FONT_CACHE.lock().insert(key, Arc::clone(&font));
    Ok(font)
}

/// Advance width of `text` at the given scale
pub fn text_width(font: &Font<'static>, scale: Scale, text: &str) -> f32 {
    let glyphs: Vec<_> = font.layout(text, scale, point(0.0, 0.0)).collect();
    match glyphs.last() {
        Some(g) => g.position().x + g.unpositioned().h_metrics().advance_width,
        None => 0.0,
    }
}

/// Draw a solid-white caption centered on `center_x` with its baseline at
/// `baseline_y`, preceded by a blurred dark drop shadow
pub fn draw_caption(
    img: &mut RgbImage,
    font: &Font<'static>,
    text: &str,
    px: f32,
    center_x: f32,
    baseline_y: f32,
    shadow: Shadow,
) {
    if text.is_empty() {
        return;
    }

    let scale = Scale::uniform(px);
    let width = text_width(font, scale, text);
    let origin_x = center_x - width / 2.0;

    draw_shadow(img, font, text, scale, origin_x, baseline_y, shadow);

    // Caption pass: white glyphs alpha-blended by coverage
    for glyph in font.layout(text, scale, point(origin_x, baseline_y)) {
        let bb = match glyph.pixel_bounding_box() {
            Some(bb) => bb,
            None => continue,
        };
        glyph.draw(|gx, gy, v| {
            let x = gx as i32 + bb.min.x;
            let y = gy as i32 + bb.min.y;
            if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
                return;
            }
            let pixel = img.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                pixel.0[c] = (255.0 * v + pixel.0[c] as f32 * (1.0 - v)) as u8;
            }
        });
    }
}

/// Rasterize glyph coverage into a full-frame mask at the shadow offset,
/// soften it with a box blur, then darken the covered pixels
fn draw_shadow(
    img: &mut RgbImage,
    font: &Font<'static>,
    text: &str,
    scale: Scale,
    origin_x: f32,
    baseline_y: f32,
    shadow: Shadow,
) {
    if shadow.alpha <= 0.0 {
        return;
    }

    let (w, h) = img.dimensions();
    let mut mask = vec![0f32; (w * h) as usize];

    let origin = point(
        origin_x + shadow.offset as f32,
        baseline_y + shadow.offset as f32,
    );
    for glyph in font.layout(text, scale, origin) {
        let bb = match glyph.pixel_bounding_box() {
            Some(bb) => bb,
            None => continue,
        };
        glyph.draw(|gx, gy, v| {
            let x = gx as i32 + bb.min.x;
            let y = gy as i32 + bb.min.y;
            if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                return;
            }
            let idx = (y as u32 * w + x as u32) as usize;
            mask[idx] = mask[idx].max(v);
        });
    }

    box_blur(&mut mask, w as usize, h as usize, (shadow.blur / 2) as usize);

    for y in 0..h {
        for x in 0..w {
            let coverage = mask[(y * w + x) as usize] * shadow.alpha;
            if coverage <= 0.0 {
                continue;
            }
            let pixel = img.get_pixel_mut(x, y);
            for c in 0..3 {
                pixel.0[c] = (pixel.0[c] as f32 * (1.0 - coverage)) as u8;
            }
        }
    }
}

/// Separable box blur over a coverage mask; out-of-frame samples count as
/// zero, which fades the shadow out at image borders
fn box_blur(mask: &mut [f32], w: usize, h: usize, radius: usize) {
    if radius == 0 || w == 0 || h == 0 {
        return;
    }

    let window = (2 * radius + 1) as f32;
    let mut tmp = vec![0f32; mask.len()];

    // Horizontal pass
    for y in 0..h {
        let row = &mask[y * w..(y + 1) * w];
        for x in 0..w {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(w - 1);
            let sum: f32 = row[lo..=hi].iter().sum();
            tmp[y * w + x] = sum / window;
        }
    }

    // Vertical pass
    for x in 0..w {
        for y in 0..h {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(h - 1);
            let mut sum = 0f32;
            for yy in lo..=hi {
                sum += tmp[yy * w + x];
            }
            mask[y * w + x] = sum / window;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_font_loads() {
        let font = load_font(None).unwrap();
        assert!(font.glyph_count() > 0);
    }

    #[test]
    fn test_missing_font_path_is_surface_unavailable() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, CompositeError::SurfaceUnavailable { .. }));
    }

    #[test]
    fn test_text_width_grows_with_text() {
        let font = load_font(None).unwrap();
        let scale = Scale::uniform(48.0);
        let short = text_width(&font, scale, "AB");
        let long = text_width(&font, scale, "ABCDEF");
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn test_caption_brightens_pixels_near_baseline() {
        let font = load_font(None).unwrap();
        let mut img = RgbImage::from_pixel(400, 300, image::Rgb([60, 60, 60]));

        let shadow = Shadow {
            blur: 10,
            offset: 3,
            alpha: 0.8,
        };
        draw_caption(&mut img, &font, "HELLO", 48.0, 200.0, 250.0, shadow);

        // White glyph coverage must appear in the caption band
        let bright = img
            .enumerate_pixels()
            .filter(|(_, y, p)| (200..=260).contains(y) && p.0[0] > 200)
            .count();
        assert!(bright > 0, "expected bright caption pixels");

        // Somewhere below-right of the glyphs the shadow darkens the ground
        let dark = img
            .enumerate_pixels()
            .filter(|(_, y, p)| (200..=270).contains(y) && p.0[0] < 50)
            .count();
        assert!(dark > 0, "expected darkened shadow pixels");
    }

    #[test]
    fn test_box_blur_spreads_coverage() {
        let mut mask = vec![0f32; 9 * 9];
        mask[4 * 9 + 4] = 1.0;
        box_blur(&mut mask, 9, 9, 1);

        // Energy moved off the center into its neighborhood
        assert!(mask[4 * 9 + 4] < 1.0);
        assert!(mask[3 * 9 + 4] > 0.0);
        assert!(mask[4 * 9 + 3] > 0.0);
        // Far corner stays untouched
        assert_eq!(mask[0], 0.0);
    }

    #[test]
    fn test_empty_text_is_a_no_op() {
        let font = load_font(None).unwrap();
        let mut img = RgbImage::from_pixel(50, 50, image::Rgb([99, 99, 99]));
        let before = img.clone();
        draw_caption(
            &mut img,
            &font,
            "",
            32.0,
            25.0,
            40.0,
            Shadow {
                blur: 10,
                offset: 3,
                alpha: 0.8,
            },
        );
        assert_eq!(img.as_raw(), before.as_raw());
    }
}
