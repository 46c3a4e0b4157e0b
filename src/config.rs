//! Provider configuration, resolved once at startup.
//!
//! Credentials come from CLI arguments (Sarvam) or environment variables
//! (Azure) and are passed explicitly into the client. They are never logged.

use thiserror::Error;

// ============================================================================
// SarvamConfig
// ============================================================================

/// Configuration for the Sarvam AI chat-completions API.
#[derive(Debug, Clone)]
pub struct SarvamConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl SarvamConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.sarvam.ai/v1";
    pub const DEFAULT_MODEL: &'static str = "sarvam-m";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ============================================================================
// AzureConfig
// ============================================================================

/// Configuration for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureConfig {
    pub const DEFAULT_API_VERSION: &'static str = "2024-12-01-preview";

    pub const ENV_API_KEY: &'static str = "AZURE_OPENAI_API_KEY";
    pub const ENV_ENDPOINT: &'static str = "AZURE_OPENAI_ENDPOINT";
    pub const ENV_DEPLOYMENT: &'static str = "AZURE_OPENAI_DEPLOYMENT";
    pub const ENV_API_VERSION: &'static str = "AZURE_OPENAI_API_VERSION";

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingEnv(key));

        Ok(Self {
            api_key: require(Self::ENV_API_KEY)?,
            endpoint: require(Self::ENV_ENDPOINT)?,
            deployment: require(Self::ENV_DEPLOYMENT)?,
            api_version: get(Self::ENV_API_VERSION)
                .unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string()),
        })
    }
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--api-key is required when not using --use-azure")]
    MissingApiKey,

    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
}

// ============================================================================
// Tests
// ============================================================================
