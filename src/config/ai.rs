//! AI provider configuration

use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Which provider to use
    #[serde(default)]
    pub provider: AiProvider,

    /// Model override; each provider has its own default when unset
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAI,
    #[default]
    Anthropic,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() && !self.has_anthropic() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        match self.provider {
            AiProvider::OpenAI if !self.has_openai() => {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            AiProvider::Anthropic if !self.has_anthropic() => {
                return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
            }
            _ => {}
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            provider: AiProvider::default(),
            model: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(provider: AiProvider, anthropic: Option<&str>, openai: Option<&str>) -> AiConfig {
        AiConfig {
            anthropic_api_key: anthropic.map(|k| Secret::new(k.to_string())),
            openai_api_key: openai.map(|k| Secret::new(k.to_string())),
            provider,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_anthropic() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Anthropic);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = AiConfig {
            timeout_secs: 20,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn provider_checks_require_non_empty_keys() {
        let config = with_key(AiProvider::Anthropic, Some("sk-ant-xxx"), Some(""));
        assert!(config.has_anthropic());
        assert!(!config.has_openai());
    }

    #[test]
    fn validation_rejects_no_provider() {
        assert!(matches!(
            AiConfig::default().validate(),
            Err(ValidationError::NoAiProviderConfigured)
        ));
    }

    #[test]
    fn validation_rejects_missing_key_for_selected_provider() {
        let config = with_key(AiProvider::Anthropic, None, Some("sk-xxx"));
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        ));
    }

    #[test]
    fn validation_accepts_configured_provider() {
        let config = with_key(AiProvider::OpenAI, None, Some("sk-xxx"));
        assert!(config.validate().is_ok());
    }
}
