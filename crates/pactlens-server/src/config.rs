//! Server configuration
//!
//! Layered, lowest precedence first: built-in defaults, the YAML file,
//! `PACTLENS__*` environment variables (`PACTLENS__AI__GEMINI__MODEL`,
//! `PACTLENS__SERVER__PORT`, ...), then command-line flags.

use pactlens_analyzer::GeminiConfig;
use pactlens_extract::OcrConfig;
use serde::{Deserialize, Serialize};

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    /// Classifier YAML file; built-in tables when unset
    #[serde(default)]
    pub classifiers: Option<String>,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

/// Generative model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Use the model when an API key is present
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gemini: GeminiConfig::default(),
        }
    }
}

/// Command-line values that win over every other layer
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<String>,
    pub port: Option<u16>,
    pub classifiers: Option<String>,
    pub no_ai: bool,
}

impl ServerConfig {
    /// Load configuration from file and environment, then apply CLI overrides
    pub fn load(config_path: &str, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut config: Self = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix("PACTLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.apply(overrides);
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(listen) = &overrides.listen {
            self.server.listen = listen.clone();
        }

        if let Some(port) = overrides.port {
            self.server.port = port;
        }

        if let Some(path) = &overrides.classifiers {
            self.classifiers = Some(path.clone());
        }

        if overrides.no_ai {
            self.ai.enabled = false;
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    50 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ServerConfig::load("/nonexistent/pactlens.yaml", &Overrides::default()).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.server.body_limit, 50 * 1024 * 1024);
        assert!(config.ai.enabled);
        assert_eq!(config.ai.gemini.model, "gemini-flash-latest");
        assert_eq!(config.ocr.dpi, 200);
        assert!(config.classifiers.is_none());
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 9100\nai:\n  gemini:\n    timeout_secs: 30\nocr:\n  dpi: 300\n"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = ServerConfig::load(path, &Overrides::default()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.ai.gemini.timeout_secs, 30);
        assert_eq!(config.ai.gemini.model, "gemini-flash-latest");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.tesseract, "tesseract");
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = ServerConfig::default();
        config.apply(&Overrides {
            listen: Some("127.0.0.1".to_string()),
            port: Some(3000),
            classifiers: Some("classifiers.yaml".to_string()),
            no_ai: true,
        });

        assert_eq!(config.server.listen, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.classifiers.as_deref(), Some("classifiers.yaml"));
        assert!(!config.ai.enabled);
    }

    #[test]
    fn test_no_overrides_keep_values() {
        let mut config = ServerConfig::default();
        config.apply(&Overrides::default());
        assert_eq!(config.server.port, 8000);
        assert!(config.ai.enabled);
    }
}
