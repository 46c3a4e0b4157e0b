//! Chat-completions providers.
//!
//! Both providers speak the same OpenAI-compatible request/response shape and
//! differ only in endpoint layout and authentication headers.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{AzureConfig, SarvamConfig};

use super::error::LLMError;
use super::types::{ChatRequest, ChatResponse};

/// Trait for chat-completion providers with different transports.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Make a single chat completion request. No retry, no state.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError>;
}

/// Sarvam AI provider, authenticated with a bearer API key.
pub struct SarvamProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SarvamProvider {
    pub fn new(client: Client, config: SarvamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for SarvamProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(model = %request.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

/// Azure OpenAI provider, addressed by endpoint + deployment + API version.
pub struct AzureOpenAIProvider {
    client: Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
}

impl AzureOpenAIProvider {
    pub fn new(client: Client, config: AzureConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint,
            deployment: config.deployment,
            api_version: config.api_version,
            api_key: config.api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAIProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint.trim_end_matches('/'),
            self.deployment
        );
        debug!(deployment = %self.deployment, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("Content-Type", "application/json")
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
