//! # Image Compositor
//!
//! The core raster pipeline: color wash, multiply-blend re-draw, and the
//! shadowed bottom-center caption, encoded to JPEG. The pass is
//! deterministic and never raises; unusable inputs degrade to a
//! byte-identical passthrough of the source.

pub mod engine;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use engine::Compositor;
pub use types::{CompositeResult, RenderParams, SourceImage};
