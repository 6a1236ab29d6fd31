use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    compositor::RenderParams,
    error::{ConfigError, Result},
};

/// Main configuration for Vibrancy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Compositing and caption rendering settings
    pub render: RenderParams,

    /// Variant generation settings
    pub generation: GenerationConfig,

    /// Webhook export settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_render(&self.render)?;
        self.generation.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

fn validate_render(render: &RenderParams) -> Result<()> {
    if !(0.0..1.0).contains(&render.font_scale) || render.font_scale == 0.0 {
        return Err(ConfigError::InvalidValue {
            key: "render.font_scale".to_string(),
            value: render.font_scale.to_string(),
        }
        .into());
    }

    if !(0.0..1.0).contains(&render.bottom_margin) {
        return Err(ConfigError::InvalidValue {
            key: "render.bottom_margin".to_string(),
            value: render.bottom_margin.to_string(),
        }
        .into());
    }

    if !(0.0..=1.0).contains(&render.shadow_alpha) {
        return Err(ConfigError::InvalidValue {
            key: "render.shadow_alpha".to_string(),
            value: render.shadow_alpha.to_string(),
        }
        .into());
    }

    if render.jpeg_quality == 0 || render.jpeg_quality > 100 {
        return Err(ConfigError::InvalidValue {
            key: "render.jpeg_quality".to_string(),
            value: render.jpeg_quality.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Variant generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// How many variants to produce per run
    pub variant_count: usize,

    /// Style strength forwarded to the webhook (0.0-1.0)
    pub style_strength: f32,

    /// Style preset name forwarded to the webhook
    pub style_preset: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            variant_count: 5,
            style_strength: 0.75,
            style_preset: "vibrant".to_string(),
        }
    }
}

impl GenerationConfig {
    fn validate(&self) -> Result<()> {
        if self.variant_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "generation.variant_count".to_string(),
                value: self.variant_count.to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.style_strength) {
            return Err(ConfigError::InvalidValue {
                key: "generation.style_strength".to_string(),
                value: self.style_strength.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Webhook export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Webhook endpoint receiving the creative brief
    pub webhook_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 30,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "export.timeout_secs".to_string(),
                value: self.timeout_secs.to_string(),
            }
            .into());
        }

        if let Some(url) = &self.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    key: "export.webhook_url".to_string(),
                    value: url.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original_config = Config::default();

        // Save and load
        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(
            original_config.render.jpeg_quality,
            loaded_config.render.jpeg_quality
        );
        assert_eq!(
            original_config.generation.variant_count,
            loaded_config.generation.variant_count
        );
        assert_eq!(
            original_config.export.timeout_secs,
            loaded_config.export.timeout_secs
        );
    }

    #[test]
    fn test_invalid_jpeg_quality() {
        let mut config = Config::default();
        config.render.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_variant_count() {
        let mut config = Config::default();
        config.generation.variant_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_webhook_url() {
        let mut config = Config::default();
        config.export.webhook_url = Some("ftp://example.com/hook".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/vibrancy.toml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
