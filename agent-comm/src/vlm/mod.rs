//! Multimodal prompt adapter for hosted vision-language models.
//!
//! Wraps a chat-completions style API: each invocation sends one user
//! message carrying a text prompt and one inline image (as a base64 data
//! URL) and returns the text of the first response choice. Connection
//! parameters, including the credential, are explicit constructor input.

mod client;
mod config;
mod types;

pub use client::{DEFAULT_MIME, Vlm};
pub use config::VlmConfig;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ContentPart, ImageUrl, ResponseMessage,
    WireMessage,
};
