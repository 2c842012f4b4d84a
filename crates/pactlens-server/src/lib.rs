//! PactLens Server
//!
//! HTTP service that extracts text from uploaded documents, classifies it as
//! agreement-like or not (advisory only), detects the document type, and
//! returns a structured analysis.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{Overrides, ServerConfig};
pub use routes::create_router as build_router;
pub use state::AppState;
