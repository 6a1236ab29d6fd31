use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    compositor::{Compositor, SourceImage},
    config::Config,
    error::{GenerationError, Result},
    overlay::PresetRotation,
};

const ADJECTIVES: [&str; 6] = [
    "Vibrant", "Bold", "Energetic", "Dynamic", "Striking", "Powerful",
];
const ELEMENTS: [&str; 5] = [
    "color overlay",
    "text treatment",
    "composition",
    "visual appeal",
    "brand message",
];
const EFFECTS: [&str; 5] = [
    "enhanced",
    "amplified",
    "optimized",
    "transformed",
    "elevated",
];

/// One generated ad variation
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Stable id of the form `img-<unix-millis>-<index>`
    pub id: String,

    /// Encoded image bytes (JPEG, or the untouched upload on passthrough)
    pub bytes: Vec<u8>,

    /// The caption that was composited onto this variant
    pub caption: String,

    /// Human-readable description of the treatment
    pub description: String,

    /// True when compositing fell back to the unmodified source
    pub passthrough: bool,
}

impl GeneratedImage {
    /// Synthesized download filename
    pub fn filename(&self) -> String {
        format!("vibrant-image-{}.jpg", self.id)
    }
}

/// Produces batches of vibrant variations from one uploaded image
///
/// The engine keeps the source and the last batch around so individual
/// variants can be regenerated with a freshly rolled preset.
pub struct GenerationEngine {
    config: Config,
    compositor: Compositor,
    rng: SmallRng,
    source: Option<SourceImage>,
    variants: Vec<GeneratedImage>,
}

impl GenerationEngine {
    pub fn new(config: Config) -> Self {
        let compositor = Compositor::new(config.render.clone());
        Self {
            config,
            compositor,
            rng: SmallRng::from_entropy(),
            source: None,
            variants: Vec::new(),
        }
    }

    /// Read a source image from disk
    pub async fn load_source<P: AsRef<Path>>(path: P) -> Result<SourceImage> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|_| GenerationError::SourceLoadFailed {
                path: path.display().to_string(),
            })?;
        Ok(SourceImage::from_bytes(bytes))
    }

    /// Generate `count` variants, cycling captions and color washes from the
    /// preset rotation (context messages replace the fallback captions)
    pub fn generate(
        &mut self,
        source: SourceImage,
        context_messages: &[String],
        count: usize,
    ) -> Result<&[GeneratedImage]> {
        if count == 0 {
            return Err(GenerationError::InvalidParameters {
                details: "variant count must be at least 1".to_string(),
            }
            .into());
        }

        let rotation = PresetRotation::from_context(context_messages);
        info!(
            "Generating {} variants ({} captions in rotation)",
            count,
            rotation.text_count()
        );

        let batch_millis = Utc::now().timestamp_millis();
        let mut variants = Vec::with_capacity(count);

        // One variant at a time; each pass owns its own output surface
        for i in 0..count {
            let directive = rotation.directive(i);
            let result = self.compositor.composite(&source, &directive);

            debug!(
                "Variant {}: caption '{}', color {}, passthrough={}",
                i,
                directive.text,
                directive.color,
                result.is_passthrough()
            );

            variants.push(GeneratedImage {
                id: format!("img-{}-{}", batch_millis, i),
                passthrough: result.is_passthrough(),
                bytes: result.into_bytes(),
                caption: directive.text.as_str().to_string(),
                description: self.describe(directive.text.as_str()),
            });
        }

        self.source = Some(source);
        self.variants = variants;
        Ok(&self.variants)
    }

    /// Re-composite a single variant with a randomly rolled fallback preset
    pub fn regenerate(&mut self, id: &str) -> Result<&GeneratedImage> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| GenerationError::InvalidParameters {
                details: "no source image available for regeneration".to_string(),
            })?;

        let index = self
            .variants
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| GenerationError::UnknownVariant { id: id.to_string() })?;

        let rotation = PresetRotation::fallback();
        let directive = rotation.random_directive(&mut self.rng);
        info!("Regenerating variant {} with caption '{}'", id, directive.text);

        let result = self.compositor.composite(&source, &directive);
        let description = self.describe(directive.text.as_str());

        let variant = &mut self.variants[index];
        variant.passthrough = result.is_passthrough();
        variant.bytes = result.into_bytes();
        variant.caption = directive.text.as_str().to_string();
        variant.description = description;

        Ok(&self.variants[index])
    }

    /// The last generated batch
    pub fn variants(&self) -> &[GeneratedImage] {
        &self.variants
    }

    /// Look up one variant by id
    pub fn variant(&self, id: &str) -> Option<&GeneratedImage> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write every variant into `dir` under its synthesized filename
    pub async fn save_all<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| GenerationError::OutputFailed {
                reason: format!("could not create {}: {}", dir.display(), e),
            })?;

        let mut written = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            let path = dir.join(variant.filename());
            tokio::fs::write(&path, &variant.bytes)
                .await
                .map_err(|e| GenerationError::OutputFailed {
                    reason: format!("could not write {}: {}", path.display(), e),
                })?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        info!("Saved {} variants to {}", written.len(), dir.display());
        Ok(written)
    }

    fn describe(&mut self, caption: &str) -> String {
        let adjective = ADJECTIVES[self.rng.gen_range(0..ADJECTIVES.len())];
        let element = ELEMENTS[self.rng.gen_range(0..ELEMENTS.len())];
        let effect = EFFECTS[self.rng.gen_range(0..EFFECTS.len())];
        format!(
            "{} design with {} {}. Text: {}",
            adjective, element, effect, caption
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn test_source() -> SourceImage {
        let img = RgbImage::from_pixel(120, 90, image::Rgb([100, 120, 140]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();
        SourceImage::from_bytes(bytes)
    }

    #[test]
    fn test_generate_seven_variants_cycles_presets() {
        let mut engine = GenerationEngine::new(Config::default());
        let variants = engine.generate(test_source(), &[], 7).unwrap().to_vec();

        assert_eq!(variants.len(), 7);
        // Preset rotation wraps at 5: variant 5 reuses variant 0's caption
        assert_eq!(variants[5].caption, variants[0].caption);
        assert_eq!(variants[6].caption, variants[1].caption);
        assert_eq!(variants[0].caption, "MODERN WORKSPACE");
        assert!(variants.iter().all(|v| !v.passthrough));
    }

    #[test]
    fn test_variant_ids_are_unique_and_filenames_match() {
        let mut engine = GenerationEngine::new(Config::default());
        let variants = engine.generate(test_source(), &[], 5).unwrap();

        let mut ids: Vec<_> = variants.iter().map(|v| v.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);

        for variant in variants {
            assert!(variant.id.starts_with("img-"));
            assert_eq!(variant.filename(), format!("vibrant-image-{}.jpg", variant.id));
        }
    }

    #[test]
    fn test_context_messages_drive_captions() {
        let mut engine = GenerationEngine::new(Config::default());
        let messages = vec!["sunlit rooftop terrace".to_string()];
        let variants = engine.generate(test_source(), &messages, 2).unwrap();

        assert_eq!(variants[0].caption, "SUNLIT ROOFTOP TERRACE");
        assert_eq!(variants[1].caption, "SUNLIT ROOFTOP TERRACE");
        assert!(variants[0].description.contains("SUNLIT ROOFTOP TERRACE"));
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let mut engine = GenerationEngine::new(Config::default());
        assert!(engine.generate(test_source(), &[], 0).is_err());
    }

    #[test]
    fn test_regenerate_unknown_id_fails() {
        let mut engine = GenerationEngine::new(Config::default());
        engine.generate(test_source(), &[], 2).unwrap();

        let err = engine.regenerate("img-0-99").unwrap_err();
        assert!(err.to_string().contains("img-0-99"));
    }

    #[test]
    fn test_regenerate_replaces_variant_in_place() {
        let mut engine = GenerationEngine::new(Config::default());
        let id = engine.generate(test_source(), &[], 3).unwrap()[1].id.clone();

        let variant = engine.regenerate(&id).unwrap();
        assert_eq!(variant.id, id);
        assert!(!variant.passthrough);
        assert_eq!(engine.variants().len(), 3);
    }

    #[tokio::test]
    async fn test_save_all_writes_synthesized_filenames() {
        let mut engine = GenerationEngine::new(Config::default());
        engine.generate(test_source(), &[], 2).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = engine.save_all(dir.path()).await.unwrap();

        assert_eq!(written.len(), 2);
        for path in &written {
            assert!(path.exists());
            assert!(path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("vibrant-image-img-"));
        }
    }

    #[tokio::test]
    async fn test_load_source_missing_file() {
        let err = GenerationEngine::load_source("/nonexistent/photo.png")
            .await
            .unwrap_err();
        assert!(err.user_message().contains("/nonexistent/photo.png"));
    }
}
