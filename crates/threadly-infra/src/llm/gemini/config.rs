//! Configuration for the Gemini completion provider.

use secrecy::SecretString;

/// Default base URL of Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Configuration for constructing a [`super::GeminiProvider`].
pub struct GeminiConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
}

impl GeminiConfig {
    /// Config pointing at the production endpoint.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Override the base URL (used for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = GeminiConfig::new(SecretString::from("test-key-not-real"));
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_base_url_override() {
        let config = GeminiConfig::new(SecretString::from("test-key-not-real"))
            .with_base_url("http://localhost:9999/v1");
        assert_eq!(config.base_url, "http://localhost:9999/v1");
    }
}
