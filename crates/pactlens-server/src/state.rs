//! Shared application state

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use pactlens_analyzer::{AiMode, AnalysisBuilder, GeminiClient};
use pactlens_classifiers::{AgreementClassifier, ClassifierConfig, DocumentTypeDetector};
use pactlens_extract::Extractor;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Agreement classifier (advisory only)
    pub agreement: Arc<AgreementClassifier>,

    /// Document-type detector
    pub detector: Arc<DocumentTypeDetector>,

    /// Analysis result builder
    pub analyzer: Arc<AnalysisBuilder>,

    /// Upload text extraction
    pub extractor: Extractor,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,

    /// Maximum request body size
    pub body_limit: usize,
}

impl AppState {
    /// Build state from loaded configuration
    pub fn from_config(
        config: &ServerConfig,
        api_key: Option<String>,
        metrics_handle: PrometheusHandle,
    ) -> Result<Self> {
        let classifiers = match &config.classifiers {
            Some(path) => {
                info!("Loading classifier configuration from {}", path);
                ClassifierConfig::from_file(path)
                    .with_context(|| format!("Failed to load classifiers from {}", path))?
            }
            None => ClassifierConfig::default(),
        };

        let api_key = api_key.filter(|key| !key.trim().is_empty());
        let ai = match (config.ai.enabled, api_key) {
            (true, Some(key)) => {
                let client = GeminiClient::new(&config.ai.gemini, key)?;
                info!(model = %config.ai.gemini.model, "AI analysis enabled");
                AiMode::Enabled(Arc::new(client))
            }
            (true, None) => {
                warn!("GEMINI_API_KEY not set, AI analysis disabled");
                AiMode::Disabled
            }
            (false, _) => {
                info!("AI analysis disabled by configuration");
                AiMode::Disabled
            }
        };

        Self::new(
            classifiers,
            ai,
            Extractor::new(config.ocr.clone()),
            metrics_handle,
            config.server.body_limit,
        )
    }

    /// Build state from its parts
    pub fn new(
        classifiers: ClassifierConfig,
        ai: AiMode,
        extractor: Extractor,
        metrics_handle: PrometheusHandle,
        body_limit: usize,
    ) -> Result<Self> {
        classifiers.validate()?;

        let agreement = AgreementClassifier::new(classifiers.agreement.clone())?;
        let detector = Arc::new(DocumentTypeDetector::new(
            &classifiers.document_types,
            classifiers.fallback_label.clone(),
        )?);
        info!(
            section_cues = classifiers.agreement.section_cues.len(),
            document_types = classifiers.document_types.len(),
            "Classifiers loaded"
        );

        Ok(Self {
            agreement: Arc::new(agreement),
            analyzer: Arc::new(AnalysisBuilder::new(Arc::clone(&detector), ai)),
            detector,
            extractor,
            metrics_handle,
            body_limit,
        })
    }

    /// `studio` when a model is configured, `none` otherwise
    pub fn ai_mode_label(&self) -> &'static str {
        if self.analyzer.ai_mode().is_enabled() {
            "studio"
        } else {
            "none"
        }
    }
}
