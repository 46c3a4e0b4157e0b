//! Chat-completions client for Sarvam AI and Azure OpenAI.

mod client;
mod error;
mod provider;
mod types;

pub use client::ChatClient;
pub use error::LLMError;
pub use provider::{AzureOpenAIProvider, ChatProvider, SarvamProvider};
pub use types::{ChatReply, ChatRequest, ChatResponse, Choice, Message, Role, Usage};
