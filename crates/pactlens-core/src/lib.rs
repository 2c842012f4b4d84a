//! PactLens Core
//!
//! Core types, traits, and utilities shared across PactLens components.
//!
//! This crate provides:
//! - The fixed-shape analysis record and classification detail types
//! - Error types and result handling
//! - The generative model seam used for AI-backed analysis
//! - Wire-format adapters for hosted model APIs
//! - Cleanup of raw model responses before JSON parsing

pub mod adapters;
pub mod error;
pub mod model;
pub mod response;
pub mod types;

pub use adapters::gemini::{GenerateContentRequest, GenerateContentResponse};
pub use error::{Error, Result};
pub use model::{GenerationConfig, GenerativeModel};
pub use response::{parse_analysis, strip_code_fence};
pub use types::{AnalysisResult, ClassificationDetail, RejectionReason};
