use rand::Rng;

use crate::overlay::{ColorOverlay, OverlayDirective, OverlayText};

/// Fallback caption options, used when no context messages are provided
pub const FALLBACK_TEXTS: [&str; 5] = [
    "MODERN WORKSPACE",
    "CORPORATE EXCELLENCE",
    "BUSINESS INNOVATION",
    "PROFESSIONAL ENVIRONMENT",
    "EXECUTIVE SUITE",
];

/// Vibrant color washes, alpha kept in the 0.2-0.3 band
pub const COLOR_OVERLAYS: [ColorOverlay; 5] = [
    ColorOverlay::rgba(13, 180, 185, 0.3),  // Teal overlay
    ColorOverlay::rgba(240, 68, 145, 0.25), // Pink overlay
    ColorOverlay::rgba(111, 66, 193, 0.3),  // Purple overlay
    ColorOverlay::rgba(249, 115, 22, 0.25), // Bright orange overlay
    ColorOverlay::rgba(14, 165, 233, 0.25), // Ocean blue overlay
];

/// Fixed rotation sets cycled by index when producing multiple variants
///
/// Variant `i` uses `texts[i % texts.len()]` and `colors[i % colors.len()]`,
/// so requesting more variants than available presets wraps around.
#[derive(Debug, Clone)]
pub struct PresetRotation {
    texts: Vec<OverlayText>,
    colors: Vec<ColorOverlay>,
}

impl PresetRotation {
    /// Rotation over the built-in fallback captions and color washes
    pub fn fallback() -> Self {
        Self {
            texts: FALLBACK_TEXTS.iter().map(|t| OverlayText::new(t)).collect(),
            colors: COLOR_OVERLAYS.to_vec(),
        }
    }

    /// Rotation whose captions come from user context messages
    ///
    /// Each message is normalized into caption form (truncated, upper-cased).
    /// An empty message list falls back to the built-in captions.
    pub fn from_context(messages: &[String]) -> Self {
        if messages.is_empty() {
            return Self::fallback();
        }

        Self {
            texts: messages.iter().map(|m| OverlayText::new(m)).collect(),
            colors: COLOR_OVERLAYS.to_vec(),
        }
    }

    /// Directive for the i-th variant, wrapping modulo the set sizes
    pub fn directive(&self, index: usize) -> OverlayDirective {
        OverlayDirective::new(
            self.texts[index % self.texts.len()].clone(),
            self.colors[index % self.colors.len()],
        )
    }

    /// Randomly chosen directive, used when regenerating a single variant
    pub fn random_directive<R: Rng>(&self, rng: &mut R) -> OverlayDirective {
        let text_index = rng.gen_range(0..self.texts.len());
        let color_index = rng.gen_range(0..self.colors.len());
        OverlayDirective::new(self.texts[text_index].clone(), self.colors[color_index])
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_modulo_preset_count() {
        let rotation = PresetRotation::fallback();

        // 7 variants over 5 presets: variant 5 reuses preset 0, variant 6 preset 1
        let directives: Vec<_> = (0..7).map(|i| rotation.directive(i)).collect();
        assert_eq!(directives[5], directives[0]);
        assert_eq!(directives[6], directives[1]);
        assert_ne!(directives[0], directives[1]);
    }

    #[test]
    fn test_fallback_set_has_five_presets() {
        let rotation = PresetRotation::fallback();
        assert_eq!(rotation.text_count(), 5);
        assert_eq!(rotation.directive(0).text.as_str(), "MODERN WORKSPACE");
        assert_eq!(
            rotation.directive(0).color,
            ColorOverlay::rgba(13, 180, 185, 0.3)
        );
    }

    #[test]
    fn test_context_messages_replace_fallback_captions() {
        let messages = vec![
            "cozy cafe ambience".to_string(),
            "a very long description of the scene that keeps going".to_string(),
        ];
        let rotation = PresetRotation::from_context(&messages);

        assert_eq!(rotation.text_count(), 2);
        assert_eq!(rotation.directive(0).text.as_str(), "COZY CAFE AMBIENCE");
        assert!(rotation.directive(1).text.as_str().ends_with("..."));
        // Captions wrap at 2 while colors wrap at 5
        assert_eq!(rotation.directive(2).text, rotation.directive(0).text);
        assert_ne!(rotation.directive(2).color, rotation.directive(0).color);
    }

    #[test]
    fn test_empty_context_falls_back() {
        let rotation = PresetRotation::from_context(&[]);
        assert_eq!(rotation.text_count(), 5);
        assert_eq!(rotation.directive(4).text.as_str(), "EXECUTIVE SUITE");
    }
}
