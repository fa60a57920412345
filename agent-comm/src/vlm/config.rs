//! VLM client configuration.

/// Configuration for the [`Vlm`](super::Vlm) client.
///
/// Every connection parameter, including the API credential, is passed
/// explicitly. Nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct VlmConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl VlmConfig {
    /// Default chat-completions base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Creates a new configuration for the given model and API key.
    #[must_use]
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: model.into(),
            temperature: None,
            timeout_secs: Some(120),
        }
    }

    /// Sets the base URL (for proxies or self-hosted endpoints).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = VlmConfig::new("gpt-4o", "test-key");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, VlmConfig::DEFAULT_BASE_URL);
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = VlmConfig::new("gpt-4o", "key")
            .with_base_url("http://localhost:8000/v1")
            .with_temperature(0.2)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout_secs, Some(60));
    }
}
