//! PactLens Analyzer
//!
//! Turns document text into a fixed-shape [`AnalysisResult`]:
//!
//! - AI disabled: a deterministic summary-only result
//! - AI enabled: one prompt/response round trip with a hosted model, the
//!   reply parsed as JSON (falling back when it does not parse, reporting
//!   an `error` when the call fails)
//!
//! [`AnalysisResult`]: pactlens_core::AnalysisResult

pub mod builder;
pub mod fallback;
pub mod gemini;
pub mod prompt;

pub use builder::{AiMode, AnalysisBuilder, AnalysisOutcome, AnalysisSource};
pub use fallback::{error_analysis, fallback_analysis};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::build_prompt;
