//! High-level chat client.

use std::time::Duration;

use reqwest::Client;

use crate::config::{AzureConfig, SarvamConfig};

use super::error::LLMError;
use super::provider::{AzureOpenAIProvider, ChatProvider, SarvamProvider};
use super::types::{ChatReply, ChatRequest};

/// Single-shot chat client: one user message in, one reply out.
pub struct ChatClient {
    provider: Box<dyn ChatProvider>,
    model: String,
}

impl ChatClient {
    /// Timeout applied to the one outbound request.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Client for the Sarvam AI chat-completions API.
    pub fn sarvam(config: SarvamConfig) -> Self {
        let model = config.model.clone();
        let provider = SarvamProvider::new(http_client(), config);
        Self::with_provider(Box::new(provider), model)
    }

    /// Client for an Azure OpenAI deployment. The deployment name doubles as
    /// the model identifier in the request body.
    pub fn azure(config: AzureConfig) -> Self {
        let model = config.deployment.clone();
        let provider = AzureOpenAIProvider::new(http_client(), config);
        Self::with_provider(Box::new(provider), model)
    }

    /// Client backed by an arbitrary provider implementation.
    pub fn with_provider(provider: Box<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Send `user_message` as the sole user turn and return the assistant's
    /// reply text.
    pub async fn complete(&self, user_message: &str) -> Result<ChatReply, LLMError> {
        let request = ChatRequest::single_turn(&self.model, user_message);
        let response = self.provider.chat(request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::Response("response contained no choices".to_string()))?;

        Ok(ChatReply {
            text: choice.message.content,
        })
    }
}

fn http_client() -> Client {
    Client::builder()
        .timeout(ChatClient::REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
