use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of visible characters in a caption before truncation
pub const MAX_TEXT_CHARS: usize = 30;

/// Uppercase-normalized caption text for one compositing pass
///
/// Construction enforces the caption budget: phrases longer than
/// [`MAX_TEXT_CHARS`] keep their first 30 characters (whitespace-trimmed)
/// and gain a `...` marker, then the whole string is upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayText(String);

impl OverlayText {
    /// Normalize a raw phrase into caption form
    pub fn new(raw: &str) -> Self {
        let char_count = raw.chars().count();
        let text = if char_count > MAX_TEXT_CHARS {
            let head: String = raw.chars().take(MAX_TEXT_CHARS).collect();
            format!("{}...", head.trim())
        } else {
            raw.trim().to_string()
        };
        Self(text.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translucent color wash applied over the whole surface
///
/// Channels are 8-bit, alpha is a fraction. The built-in presets keep alpha
/// in the 0.2-0.3 band so the source image stays legible under the wash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorOverlay {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl ColorOverlay {
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }
}

impl fmt::Display for ColorOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

#[derive(Error, Debug)]
#[error("invalid color overlay: {0} (expected rgba(r, g, b, a))")]
pub struct ParseColorError(String);

impl FromStr for ColorOverlay {
    type Err = ParseColorError;

    /// Parse CSS-style `rgba(13, 180, 185, 0.3)` notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseColorError(s.to_string()))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParseColorError(s.to_string()));
        }

        let r = parts[0].parse().map_err(|_| ParseColorError(s.to_string()))?;
        let g = parts[1].parse().map_err(|_| ParseColorError(s.to_string()))?;
        let b = parts[2].parse().map_err(|_| ParseColorError(s.to_string()))?;
        let alpha: f32 = parts[3].parse().map_err(|_| ParseColorError(s.to_string()))?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ParseColorError(s.to_string()));
        }

        Ok(Self { r, g, b, alpha })
    }
}

/// The `{text, color}` pair controlling one compositing pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDirective {
    pub text: OverlayText,
    pub color: ColorOverlay,
}

impl OverlayDirective {
    pub fn new(text: OverlayText, color: ColorOverlay) -> Self {
        Self { text, color }
    }
}
