//! A minimal command-line chatbot for chat-completions endpoints.
//!
//! Sends a single user message to either the Sarvam AI REST API or an
//! Azure OpenAI deployment and returns the assistant's reply.

pub mod config;
pub mod llm;
