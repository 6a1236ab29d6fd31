//! # Generation Engine
//!
//! Orchestrates local variant batches: preset rotation, compositing one
//! variant at a time, id/filename synthesis, and saving results to disk.

pub mod engine;

pub use engine::{GeneratedImage, GenerationEngine};
