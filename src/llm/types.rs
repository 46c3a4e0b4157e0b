//! Common types for chat completions (OpenAI-compatible format).

use serde::{Deserialize, Serialize};

/// System prompt sent as the first message of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling temperature attached to every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A chat completion request.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl ChatRequest {
    /// Build the fixed two-message conversation: the system prompt followed
    /// by a single user turn.
    pub fn single_turn(model: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: Role::User,
                    content: user_message.into(),
                },
            ],
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The role of a message sender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat completion response. Only `choices[0].message.content` is consumed;
/// the remaining fields are kept for complete deserialization.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The assistant's reply text, the sole datum extracted from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}
