//! Configuration for the keyword classifiers
//!
//! Defaults reproduce the built-in tables in [`crate::keywords`]. A YAML file
//! can override thresholds, replace the section cues, or add categories:
//!
//! ```yaml
//! agreement:
//!   chunk_words: 300
//!   max_chunks: 10
//!   accept_heuristic: 0.4
//! document_types:
//!   - name: rental agreement
//!     keywords: [rent, lease, tenant, landlord, security deposit]
//!   - name: partnership agreement
//!     keywords: [partner, partnership, profit sharing]
//! fallback_label: general legal document
//! ```

use crate::keywords::{DOCUMENT_CATEGORIES, FALLBACK_DOCUMENT_TYPE, SECTION_CUES};
use pactlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for all classifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Agreement classifier settings
    #[serde(default)]
    pub agreement: AgreementConfig,

    /// Document categories, in tie-break order
    #[serde(default = "default_document_types")]
    pub document_types: Vec<CategorySpec>,

    /// Label used when no category keyword matches
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            agreement: AgreementConfig::default(),
            document_types: default_document_types(),
            fallback_label: default_fallback_label(),
        }
    }
}

/// Agreement classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementConfig {
    /// Words per chunk
    #[serde(default = "default_chunk_words")]
    pub chunk_words: usize,

    /// Maximum number of chunks scored
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,

    /// Minimum chunk score for the chunk to vote
    #[serde(default = "default_chunk_vote_threshold")]
    pub chunk_vote_threshold: f64,

    /// Minimum vote ratio for acceptance
    #[serde(default = "default_accept_threshold")]
    pub accept_vote_ratio: f64,

    /// Minimum whole-document score for acceptance
    #[serde(default = "default_accept_threshold")]
    pub accept_heuristic: f64,

    /// Agreement section cues
    #[serde(default = "default_section_cues")]
    pub section_cues: Vec<String>,
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            chunk_words: default_chunk_words(),
            max_chunks: default_max_chunks(),
            chunk_vote_threshold: default_chunk_vote_threshold(),
            accept_vote_ratio: default_accept_threshold(),
            accept_heuristic: default_accept_threshold(),
            section_cues: default_section_cues(),
        }
    }
}

/// A named document category and its keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ClassifierConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid classifier config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check sizes, thresholds, and keyword sets
    pub fn validate(&self) -> Result<()> {
        let a = &self.agreement;

        if a.chunk_words == 0 || a.max_chunks == 0 {
            return Err(Error::config("chunk_words and max_chunks must be positive"));
        }

        for (name, value) in [
            ("chunk_vote_threshold", a.chunk_vote_threshold),
            ("accept_vote_ratio", a.accept_vote_ratio),
            ("accept_heuristic", a.accept_heuristic),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }

        check_keywords("section_cues", &a.section_cues)?;

        if self.document_types.is_empty() {
            return Err(Error::config("at least one document type is required"));
        }
        for category in &self.document_types {
            if category.name.trim().is_empty() {
                return Err(Error::config("document type names must not be empty"));
            }
            check_keywords(&category.name, &category.keywords)?;
        }

        Ok(())
    }
}

fn check_keywords(set: &str, keywords: &[String]) -> Result<()> {
    if keywords.is_empty() {
        return Err(Error::config(format!("keyword set '{}' is empty", set)));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(Error::config(format!("keyword set '{}' contains a blank keyword", set)));
    }
    Ok(())
}

fn default_chunk_words() -> usize {
    300
}

fn default_max_chunks() -> usize {
    10
}

fn default_chunk_vote_threshold() -> f64 {
    0.5
}

fn default_accept_threshold() -> f64 {
    0.4
}

fn default_section_cues() -> Vec<String> {
    SECTION_CUES.iter().map(|s| s.to_string()).collect()
}

fn default_document_types() -> Vec<CategorySpec> {
    DOCUMENT_CATEGORIES
        .iter()
        .map(|(name, keywords)| CategorySpec {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn default_fallback_label() -> String {
    FALLBACK_DOCUMENT_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClassifierConfig::default();
        config.validate().unwrap();
        assert_eq!(config.agreement.section_cues.len(), 23);
        assert_eq!(config.document_types.len(), 7);
        assert_eq!(config.document_types[0].name, "rental agreement");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ClassifierConfig::from_yaml_str("agreement:\n  max_chunks: 4\n").unwrap();
        assert_eq!(config.agreement.max_chunks, 4);
        assert_eq!(config.agreement.chunk_words, 300);
        assert_eq!(config.document_types.len(), 7);
        assert_eq!(config.fallback_label, "general legal document");
    }

    #[test]
    fn test_custom_categories() {
        let yaml = r#"
document_types:
  - name: partnership agreement
    keywords: [partner, profit sharing]
fallback_label: other
"#;
        let config = ClassifierConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.document_types.len(), 1);
        assert_eq!(config.fallback_label, "other");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = ClassifierConfig::from_yaml_str("agreement:\n  accept_heuristic: 1.5\n").unwrap_err();
        assert!(err.to_string().contains("accept_heuristic"));
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let yaml = "document_types:\n  - name: x\n    keywords: ['']\n";
        assert!(ClassifierConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agreement:\n  chunk_words: 50").unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.agreement.chunk_words, 50);

        assert!(ClassifierConfig::from_file("/nonexistent/classifiers.yaml").is_err());
    }
}
