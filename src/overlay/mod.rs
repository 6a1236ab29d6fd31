//! # Overlay Directives
//!
//! A directive is the `{text, color}` pair that controls one compositing
//! pass. Directives come either from caller-supplied context messages or
//! from the built-in preset rotation sets, cycled by index when several
//! variants are requested.

pub mod directive;
pub mod presets;

// Re-exports for convenience
pub use directive::{ColorOverlay, OverlayDirective, OverlayText, ParseColorError};
pub use presets::{PresetRotation, COLOR_OVERLAYS, FALLBACK_TEXTS};
