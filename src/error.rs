use thiserror::Error;

/// Main error type for the Vibrancy library
#[derive(Error, Debug)]
pub enum VibrancyError {
    #[error("Compositing error: {0}")]
    Composite(#[from] CompositeError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Compositor-specific errors
///
/// These are internal to one compositing pass. The public `composite` entry
/// point recovers from all of them by passing the source image through
/// untouched, so they never escape to callers of the engine.
#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("Failed to decode source image: {reason}")]
    DecodeFailed { reason: String },

    #[error("Rendering surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },

    #[error("Image encoding failed: {reason}")]
    EncodingFailed { reason: String },
}

/// Generation-engine errors
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to load source image: {path}")]
    SourceLoadFailed { path: String },

    #[error("No variant with id: {id}")]
    UnknownVariant { id: String },

    #[error("Output writing failed: {reason}")]
    OutputFailed { reason: String },

    #[error("Invalid generation parameters: {details}")]
    InvalidParameters { details: String },
}

/// Webhook-export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No webhook URL configured")]
    MissingWebhookUrl,

    #[error("Failed to encode payload: {reason}")]
    PayloadFailed { reason: String },

    #[error("Webhook delivery failed: {reason}")]
    DeliveryFailed { reason: String },

    #[error("Webhook returned an unusable response: {reason}")]
    BadResponse { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using VibrancyError
pub type Result<T> = std::result::Result<T, VibrancyError>;

impl VibrancyError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // Webhook delivery might work on retry
            Self::Export(ExportError::DeliveryFailed { .. }) => true,
            Self::Generation(GenerationError::SourceLoadFailed { .. }) => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(GenerationError::SourceLoadFailed { path }) => {
                format!(
                    "Could not load image '{}'. Please check the file exists and is a supported format.",
                    path
                )
            }
            Self::Export(ExportError::MissingWebhookUrl) => {
                "No webhook URL configured. Pass --webhook-url or set export.webhook_url."
                    .to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_failure_is_recoverable() {
        let err: VibrancyError = ExportError::DeliveryFailed {
            reason: "connection reset".to_string(),
        }
        .into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_webhook_url_message() {
        let err: VibrancyError = ExportError::MissingWebhookUrl.into();
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("--webhook-url"));
    }
}
