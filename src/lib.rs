//! # Vibrancy
//!
//! Turn a single photo into vibrant, text-overlaid ad variations.
//!
//! This library composites "vibrant" ad-style variations locally (a
//! translucent color wash, a multiply-blend re-draw of the source, and a
//! bold shadowed caption), or forwards the image and its creative context
//! to an externally configured webhook for AI-driven suggestion generation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vibrancy::{config::Config, generation::GenerationEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let mut engine = GenerationEngine::new(config);
//!
//! let source = GenerationEngine::load_source("photo.jpg").await?;
//! engine.generate(source, &["sunlit rooftop terrace".to_string()], 5)?;
//! engine.save_all("out/").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`compositor`] - The core raster pipeline (wash, multiply blend, caption)
//! - [`overlay`] - Caption/color directives and the preset rotation sets
//! - [`generation`] - Variant batches, ids, filenames, disk output
//! - [`export`] - JSON delivery of the creative brief to a webhook
//! - [`config`] - Configuration management
//!
//! ## Compositing a single image
//!
//! ```rust,no_run
//! use vibrancy::compositor::{Compositor, SourceImage};
//! use vibrancy::overlay::{ColorOverlay, OverlayDirective, OverlayText};
//!
//! let compositor = Compositor::default();
//! let source = SourceImage::from_bytes(std::fs::read("photo.jpg").unwrap());
//!
//! let directive = OverlayDirective::new(
//!     OverlayText::new("modern workspace"),
//!     ColorOverlay::rgba(13, 180, 185, 0.3),
//! );
//!
//! // Never fails: an undecodable source passes through unchanged
//! let result = compositor.composite(&source, &directive);
//! std::fs::write("out.jpg", result.bytes()).unwrap();
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod overlay;

// Re-export commonly used types for convenience
pub use crate::{
    compositor::{CompositeResult, Compositor, SourceImage},
    config::Config,
    error::{Result, VibrancyError},
    generation::GenerationEngine,
    overlay::{OverlayDirective, PresetRotation},
};
