//! # Webhook Export
//!
//! Serializes the creative brief (image + style guidance + context) to JSON
//! and delivers it to an externally configured webhook, which performs the
//! actual AI-driven ad-suggestion generation and returns image URLs with
//! revised prompts.

pub mod client;
pub mod payload;

pub use client::WebhookClient;
pub use payload::{to_data_url, RemoteImage, WebhookPayload, WebhookResponse};
