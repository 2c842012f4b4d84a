//! Analysis result builder

use crate::fallback::{error_analysis, fallback_analysis};
use crate::prompt::build_prompt;
use pactlens_classifiers::DocumentTypeDetector;
use pactlens_core::{parse_analysis, AnalysisResult, GenerationConfig, GenerativeModel};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Whether analysis may call a generative model
#[derive(Clone)]
pub enum AiMode {
    /// Always produce the deterministic fallback
    Disabled,
    /// Call the model once per analysis
    Enabled(Arc<dyn GenerativeModel>),
}

impl AiMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

impl fmt::Debug for AiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Enabled(model) => f.debug_tuple("Enabled").field(&model.name()).finish(),
        }
    }
}

/// Where an analysis result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Parsed model output
    Ai,
    /// Deterministic fallback (AI disabled or unparseable output)
    Fallback,
    /// Model call failed; the result carries `error`
    Error,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
            Self::Error => "error",
        }
    }
}

/// An analysis result with its provenance
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
    /// Document type the analysis was requested for
    pub document_type: String,
    pub latency: Duration,
}

/// Produces a fixed-shape [`AnalysisResult`] for any input.
///
/// Never fails: model errors end up in the result's `error` field and
/// unusable model output is replaced with the deterministic fallback.
pub struct AnalysisBuilder {
    detector: Arc<DocumentTypeDetector>,
    ai: AiMode,
    generation: GenerationConfig,
}

impl AnalysisBuilder {
    pub fn new(detector: Arc<DocumentTypeDetector>, ai: AiMode) -> Self {
        Self {
            detector,
            ai,
            generation: GenerationConfig::default(),
        }
    }

    /// Override the sampling parameters sent to the model
    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn ai_mode(&self) -> &AiMode {
        &self.ai
    }

    /// Analyze `text`, detecting its type when none is given
    pub async fn analyze(&self, text: &str, document_type: Option<&str>) -> AnalysisResult {
        self.analyze_with_source(text, document_type).await.result
    }

    /// Analyze `text` and report which path produced the result
    pub async fn analyze_with_source(
        &self,
        text: &str,
        document_type: Option<&str>,
    ) -> AnalysisOutcome {
        let start = Instant::now();
        let document_type = match document_type.map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.detector.detect(text).to_string(),
        };

        let (result, source) = match &self.ai {
            AiMode::Disabled => {
                info!("AI analysis disabled, using fallback analysis");
                (fallback_analysis(text), AnalysisSource::Fallback)
            }
            AiMode::Enabled(model) => self.run_model(model.as_ref(), text, &document_type).await,
        };

        AnalysisOutcome {
            result,
            source,
            document_type,
            latency: start.elapsed(),
        }
    }

    async fn run_model(
        &self,
        model: &dyn GenerativeModel,
        text: &str,
        document_type: &str,
    ) -> (AnalysisResult, AnalysisSource) {
        let prompt = build_prompt(text, document_type);
        debug!(model = model.name(), document_type, "Requesting model analysis");

        let raw = match model.generate(&prompt, &self.generation).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(model = model.name(), error = %e, "Model analysis failed");
                return (error_analysis(e), AnalysisSource::Error);
            }
        };

        match parse_analysis(&raw) {
            Ok(result) => {
                debug!(model = model.name(), "Model analysis parsed");
                (result, AnalysisSource::Ai)
            }
            Err(e) => {
                warn!(
                    model = model.name(),
                    error = %e,
                    response_chars = raw.len(),
                    "Model response is not valid analysis JSON, using fallback analysis"
                );
                (fallback_analysis(text), AnalysisSource::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pactlens_classifiers::ClassifierConfig;

    fn detector() -> Arc<DocumentTypeDetector> {
        let config = ClassifierConfig::default();
        Arc::new(DocumentTypeDetector::new(&config.document_types, config.fallback_label).unwrap())
    }

    #[tokio::test]
    async fn test_disabled_uses_fallback() {
        let builder = AnalysisBuilder::new(detector(), AiMode::Disabled);
        let outcome = builder
            .analyze_with_source("The Tenant pays the Landlord rent.", None)
            .await;

        assert_eq!(outcome.source, AnalysisSource::Fallback);
        assert_eq!(outcome.document_type, "rental agreement");
        assert_eq!(outcome.result.jurisdiction, "Not analyzed");
    }

    #[tokio::test]
    async fn test_explicit_type_kept() {
        let builder = AnalysisBuilder::new(detector(), AiMode::Disabled);
        let outcome = builder.analyze_with_source("tenant", Some("nda")).await;
        assert_eq!(outcome.document_type, "nda");

        let outcome = builder.analyze_with_source("tenant", Some("  ")).await;
        assert_eq!(outcome.document_type, "rental agreement");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(AnalysisSource::Ai.as_str(), "ai");
        assert_eq!(AnalysisSource::Fallback.as_str(), "fallback");
        assert_eq!(AnalysisSource::Error.as_str(), "error");
        assert!(!AiMode::Disabled.is_enabled());
    }
}
