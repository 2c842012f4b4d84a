//! PactLens Classifiers
//!
//! Keyword heuristics that decide whether extracted text looks like a legal
//! agreement and which kind of agreement it most resembles.
//!
//! - [`chunker`]: word-window chunking of document text
//! - [`heuristic`]: whole-word keyword coverage score
//! - [`agreement`]: two-signal accept/reject decision over chunks and the full text
//! - [`document_type`]: best-matching document category
//!
//! Everything here is synchronous and allocation-light; classifiers are
//! built once at startup and shared read-only across requests.

pub mod agreement;
pub mod chunker;
pub mod classifier;
pub mod config;
pub mod document_type;
pub mod heuristic;
pub mod keywords;

pub use agreement::AgreementClassifier;
pub use chunker::chunk_text;
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use config::{AgreementConfig, CategorySpec, ClassifierConfig};
pub use document_type::DocumentTypeDetector;
pub use heuristic::HeuristicScorer;
