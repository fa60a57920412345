//! Chat-completions wire types.
//!
//! These map directly to the hosted API's request and response JSON and
//! exist only for serialization.

use serde::{Deserialize, Serialize};

/// Outbound chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<WireMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single chat message with multimodal content parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Message role ("user", "assistant", ...).
    pub role: String,
    /// Ordered content parts.
    pub content: Vec<ContentPart>,
}

/// One content part of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// An image referenced by URL (https or `data:` URL).
    ImageUrl {
        /// The image URL payload.
        image_url: ImageUrl,
    },
}

/// Image URL payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    /// An https URL or a base64 `data:` URL.
    pub url: String,
}

/// Inbound chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; only the first is used.
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message of this choice.
    pub message: ResponseMessage,
}

/// Assistant message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content of the message.
    pub content: Option<String>,
}

/// Provider error envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiError,
}

/// Provider error details.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}
