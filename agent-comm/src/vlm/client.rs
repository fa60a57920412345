//! VLM client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{Result, VlmError};

use super::config::VlmConfig;
use super::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ContentPart, ImageUrl,
    WireMessage,
};

/// MIME type assumed when the caller does not supply one.
pub const DEFAULT_MIME: &str = "image/jpeg";

/// Client handle for a hosted vision-language model.
///
/// Construction builds a reusable HTTP client and performs no network
/// activity; each [`describe`](Self::describe) call issues exactly one
/// request. No state is retained between calls beyond the configuration.
#[derive(Clone)]
pub struct Vlm {
    config: Arc<VlmConfig>,
    client: Client,
}

impl fmt::Debug for Vlm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vlm")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Vlm {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the API key is empty or the HTTP client cannot be built.
    pub fn new(config: VlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(VlmError::auth("API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| VlmError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Get the model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build a `data:` URL from base64-encoded image bytes.
    ///
    /// The bytes must already be base64 text, e.g. the output of a base64
    /// encoder, not the raw image.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-image error if the bytes are not valid UTF-8.
    pub fn data_url(image_b64: &[u8], mime: &str) -> Result<String> {
        let text = std::str::from_utf8(image_b64).map_err(|e| {
            VlmError::invalid_image(format!("base64 payload is not valid text: {e}"))
        })?;
        Ok(format!("data:{mime};base64,{text}"))
    }

    /// Base64-encode raw image bytes into a `data:` URL.
    #[must_use]
    pub fn data_url_from_bytes(raw: &[u8], mime: &str) -> String {
        format!("data:{mime};base64,{}", BASE64.encode(raw))
    }

    /// Build the chat completions URL.
    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build the request body: one user message with an ordered pair of
    /// content parts, the prompt first and the image second.
    fn build_body(&self, prompt: &str, data_url: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![WireMessage {
                role: "user".to_owned(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_owned(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            temperature: self.config.temperature,
        }
    }

    /// Parse an error response from the provider.
    fn parse_error(status: u16, body: &str) -> VlmError {
        if let Ok(envelope) = serde_json::from_str::<ApiErrorResponse>(body) {
            let error = envelope.error;
            let code = error
                .code
                .or(error.error_type)
                .unwrap_or_else(|| status.to_string());

            return match status {
                401 => VlmError::auth(error.message),
                _ => VlmError::provider_code(code, error.message),
            };
        }

        VlmError::http_status(status, body.to_owned())
    }

    /// Extract the first choice's text content.
    fn parse_response(response: ChatCompletionResponse) -> Result<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VlmError::response_format("at least one choice", "empty choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| VlmError::response_format("text content", "missing content").into())
    }

    /// Send one prompt-plus-image request and return the response text.
    ///
    /// `image_b64` carries base64-encoded image bytes (not the raw image);
    /// `mime` defaults to [`DEFAULT_MIME`]. Exactly one outbound request is
    /// made; there is no retry and no streaming.
    ///
    /// # Errors
    ///
    /// Fails if the image bytes are not valid base64 text, or if the
    /// remote call errors (authentication, timeout, rate limit, malformed
    /// request). Remote failures are never suppressed.
    #[instrument(skip(self, prompt, image_b64), fields(model = %self.config.model))]
    pub async fn describe(
        &self,
        prompt: &str,
        image_b64: &[u8],
        mime: Option<&str>,
    ) -> Result<String> {
        let data_url = Self::data_url(image_b64, mime.unwrap_or(DEFAULT_MIME))?;
        let body = self.build_body(prompt, data_url);

        debug!("sending chat completion request");

        let response = self
            .client
            .post(self.chat_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            VlmError::response_format("valid chat completion response", format!("parse error: {e}"))
        })?;

        Self::parse_response(parsed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VlmErrorKind;

    fn test_client() -> Vlm {
        Vlm::new(VlmConfig::new("test-vlm", "test-key")).unwrap()
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = Vlm::new(VlmConfig::new("test-vlm", ""));
        assert!(result.is_err());
    }

    #[test]
    fn data_url_matches_literal_form() {
        let url = Vlm::data_url(b"AB==", "image/png").unwrap();
        assert_eq!(url, "data:image/png;base64,AB==");
    }

    #[test]
    fn data_url_rejects_non_utf8_bytes() {
        let err = Vlm::data_url(&[0xff, 0xfe], "image/jpeg").unwrap_err();
        if let crate::error::Error::Vlm(inner) = err {
            assert_eq!(inner.kind, VlmErrorKind::InvalidImage);
        } else {
            panic!("expected Error::Vlm");
        }
    }

    #[test]
    fn data_url_from_bytes_encodes() {
        let url = Vlm::data_url_from_bytes(&[0xff, 0xd8, 0xff], "image/jpeg");
        assert_eq!(url, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn body_has_prompt_then_image() {
        let vlm = test_client();
        let body = vlm.build_body("Describe the scene", "data:image/png;base64,AB==".to_owned());

        assert_eq!(body.model, "test-vlm");
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");

        let content = &body.messages[0].content;
        assert_eq!(content.len(), 2);
        assert!(
            matches!(&content[0], ContentPart::Text { text } if text == "Describe the scene")
        );
        assert!(matches!(
            &content[1],
            ContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,AB=="
        ));
    }

    #[test]
    fn empty_choices_is_a_format_error() {
        let response = ChatCompletionResponse { choices: Vec::new() };
        let result = Vlm::parse_response(response);
        assert!(result.is_err());
    }

    #[test]
    fn parse_error_maps_401_to_auth() {
        let err = Vlm::parse_error(
            401,
            r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#,
        );
        assert_eq!(err.kind, VlmErrorKind::Auth);
    }

    #[test]
    fn parse_error_falls_back_to_status() {
        let err = Vlm::parse_error(502, "Bad Gateway");
        assert_eq!(err.kind, VlmErrorKind::HttpStatus);
        assert_eq!(err.code.as_deref(), Some("502"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let repr = format!("{:?}", test_client());
        assert!(!repr.contains("test-key"));
        assert!(repr.contains("REDACTED"));
    }
}
