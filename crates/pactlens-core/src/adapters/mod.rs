//! Model API Adapters
//!
//! Request and response wire formats for hosted generative model APIs.

pub mod gemini;

pub use gemini::{GenerateContentRequest, GenerateContentResponse};
