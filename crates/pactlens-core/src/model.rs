//! Generative model seam

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: f32,

    pub top_k: u32,

    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

/// A hosted text generation model.
///
/// One call is one attempt: implementations must not retry internally.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a text response for the prompt
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;

    /// Model identifier, for logging
    fn name(&self) -> &str;
}
