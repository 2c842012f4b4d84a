//! Gemini REST client

use async_trait::async_trait;
use pactlens_core::{
    Error, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerativeModel,
    Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for the hosted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name, e.g. `gemini-flash-latest`
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-flash-latest".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// `generateContent` client authenticated with an API key
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client for the configured model
    pub fn new(config: &GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: generate_url(&config.endpoint, &config.model),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Full `generateContent` URL this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let body = GenerateContentRequest::from_prompt(prompt, *config);

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generateContent");

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::model(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::model(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::model(format!("Invalid response body: {}", e)))?;

        parsed.text()
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-flash-latest");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url("https://example.test/v1beta/", "gemini-pro"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_client_uses_config() {
        let client = GeminiClient::new(&GeminiConfig::default(), "key").unwrap();
        assert_eq!(client.name(), "gemini-flash-latest");
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: GeminiConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.endpoint, "https://generativelanguage.googleapis.com/v1beta");
    }
}
