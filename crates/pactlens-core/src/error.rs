//! Error types for PactLens

/// Result type alias using PactLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for PactLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier construction errors (bad keyword sets, regex failures)
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Generative model call errors (transport, HTTP status, empty candidates)
    #[error("model error: {0}")]
    Model(String),

    /// Text extraction errors
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Export rendering errors
    #[error("export error: {0}")]
    Export(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new export error
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
