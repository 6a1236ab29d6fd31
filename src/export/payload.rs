use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::compositor::SourceImage;

/// Creative brief forwarded to the webhook endpoint
///
/// Field names serialize in camelCase to match what the generation service
/// expects on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Base64 data URL of the uploaded image, if one was provided
    pub uploaded_image: Option<String>,
    pub style_guide: String,
    pub reference_url: String,
    pub context_messages: Vec<String>,
    pub style_strength: f32,
    pub style_preset: String,
    pub variation_count: usize,
}

/// One AI-generated suggestion returned by the webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteImage {
    pub url: String,
    pub revised_prompt: String,
}

/// Webhook response envelope: `{images: [{url, revised_prompt}]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    #[serde(default)]
    pub images: Vec<RemoteImage>,
}

/// Encode the source as a base64 data URL, sniffing the mime type from the
/// leading magic bytes
pub fn to_data_url(source: &SourceImage) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(source.bytes());
    format!("data:{};base64,{}", sniff_mime(source.bytes()), encoded)
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
