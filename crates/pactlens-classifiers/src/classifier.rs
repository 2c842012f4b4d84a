//! Uniform view over the keyword classifiers
//!
//! [`AgreementClassifier`](crate::AgreementClassifier) and
//! [`DocumentTypeDetector`](crate::DocumentTypeDetector) each have a richer
//! native API; this trait reduces both to a label and a score for
//! benchmarks and diagnostics.

use serde::Serialize;

/// A synchronous text classifier
pub trait Classifier: Send + Sync {
    /// Classify the given text
    fn classify(&self, text: &str) -> ClassificationResult;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// `agreement` / `not_agreement`, or a document category
    pub label: String,

    /// Strength of the label (0.0-1.0)
    pub score: f32,

    pub metadata: ClassificationMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

/// Metadata about classification
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationMetadata {
    /// Per-category keyword hits, in category order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_scores: Option<Vec<(String, f32)>>,

    /// Additional key-value pairs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}
