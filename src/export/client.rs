use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::{
    config::ExportConfig,
    error::{ExportError, Result},
    export::payload::{RemoteImage, WebhookPayload, WebhookResponse},
};

/// HTTP client for the externally configured generation webhook
///
/// Delivery is a single JSON POST with a configured timeout. The endpoint is
/// a black box; all we rely on is the `{images: [...]}` response shape.
#[derive(Debug)]
pub struct WebhookClient {
    url: String,
    http: Client,
}

impl WebhookClient {
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let url = config
            .webhook_url
            .clone()
            .ok_or(ExportError::MissingWebhookUrl)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExportError::DeliveryFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { url, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the creative brief and collect the suggested images
    pub async fn export(&self, payload: &WebhookPayload) -> Result<Vec<RemoteImage>> {
        info!("Sending creative brief to webhook: {}", self.url);
        debug!(
            "Payload: {} context messages, image attached: {}",
            payload.context_messages.len(),
            payload.uploaded_image.is_some()
        );

        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ExportError::DeliveryFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::BadResponse {
                reason: format!("HTTP {}", status),
            }
            .into());
        }

        let parsed: WebhookResponse =
            response
                .json()
                .await
                .map_err(|e| ExportError::BadResponse {
                    reason: e.to_string(),
                })?;

        info!("Webhook returned {} suggested images", parsed.images.len());
        Ok(parsed.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_webhook_url() {
        let config = ExportConfig::default();
        let err = WebhookClient::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            crate::error::VibrancyError::Export(ExportError::MissingWebhookUrl)
        ));
    }

    #[test]
    fn test_client_keeps_configured_url() {
        let config = ExportConfig {
            webhook_url: Some("https://hooks.example.com/generate".to_string()),
            timeout_secs: 5,
        };
        let client = WebhookClient::from_config(&config).unwrap();
        assert_eq!(client.url(), "https://hooks.example.com/generate");
    }
}
