//! Gemini `generateContent` Adapter
//!
//! Request body:
//! ```text
//! {"contents":[{"role":"user","parts":[{"text":"..."}]}],
//!  "generationConfig":{"temperature":0.4,"topP":0.8,"topK":40,"maxOutputTokens":8192}}
//! ```
//!
//! Response body:
//! ```text
//! {"candidates":[{"content":{"parts":[{"text":"..."}],"role":"model"},"finishReason":"STOP"}],
//!  "promptFeedback":{"blockReason":"SAFETY"}}
//! ```

use crate::model::GenerationConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Body of a `models/{model}:generateContent` call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn user prompt
    pub fn from_prompt(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: config,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response of a `generateContent` call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    ///
    /// A response without candidate text is an error: the prompt was
    /// blocked or generation stopped before producing output.
    pub fn text(&self) -> Result<String> {
        let candidate = match self.candidates.first() {
            Some(candidate) => candidate,
            None => {
                let reason = self
                    .prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.as_deref())
                    .unwrap_or("no candidates returned");
                return Err(Error::model(format!("response has no candidates: {}", reason)));
            }
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(Error::model(format!(
                "candidate has no text (finish reason: {})",
                reason
            )));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest::from_prompt("Analyze this", GenerationConfig::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Analyze this");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn test_parse_text_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"summary\":"},{"text":"\"ok\"}"}],"role":"model"},"finishReason":"STOP"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().unwrap(), r#"{"summary":"ok"}"#);
    }

    #[test]
    fn test_blocked_prompt() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        let err = response.text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_candidate_without_text() {
        let body = r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        let err = response.text().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
