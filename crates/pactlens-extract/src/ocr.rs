//! OCR through the `tesseract` and `pdftoppm` command-line tools
//!
//! Both tools are external binaries (tesseract-ocr and poppler-utils).
//! Calls block; run them on the blocking pool.

use pactlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// OCR tool locations and settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// tesseract executable
    #[serde(default = "default_tesseract")]
    pub tesseract: String,

    /// pdftoppm executable
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: String,

    /// Page render resolution for scanned PDFs
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// tesseract language code
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract: default_tesseract(),
            pdftoppm: default_pdftoppm(),
            dpi: default_dpi(),
            language: default_language(),
        }
    }
}

fn default_tesseract() -> String {
    "tesseract".to_string()
}

fn default_pdftoppm() -> String {
    "pdftoppm".to_string()
}

fn default_dpi() -> u32 {
    200
}

fn default_language() -> String {
    "eng".to_string()
}

/// OCR an encoded image (PNG, JPEG, ...)
pub fn ocr_image(bytes: &[u8], config: &OcrConfig) -> Result<String> {
    let rgb = image::load_from_memory(bytes)
        .map_err(|e| Error::extraction(format!("Image decode failed: {}", e)))?
        .to_rgb8();

    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    rgb.save_with_format(file.path(), image::ImageFormat::Png)
        .map_err(|e| Error::extraction(format!("Image re-encode failed: {}", e)))?;

    run_tesseract(file.path(), config)
}

/// Render every page of a PDF and OCR the pages in order
pub fn ocr_pdf(bytes: &[u8], config: &OcrConfig) -> Result<String> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.pdf");
    std::fs::write(&input, bytes)?;

    let output = Command::new(&config.pdftoppm)
        .arg("-r")
        .arg(config.dpi.to_string())
        .arg("-png")
        .arg(&input)
        .arg(dir.path().join("page"))
        .output()
        .map_err(|e| Error::extraction(format!("Failed to run {}: {}", config.pdftoppm, e)))?;

    if !output.status.success() {
        return Err(Error::extraction(format!(
            "pdftoppm failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // page-1.png, page-2.png, ... zero-padded to a common width
    let mut pages: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "png"))
        .collect();
    pages.sort();

    if pages.is_empty() {
        return Err(Error::extraction("pdftoppm produced no pages"));
    }
    debug!(pages = pages.len(), dpi = config.dpi, "Rendered PDF for OCR");

    let mut texts = Vec::with_capacity(pages.len());
    for page in &pages {
        texts.push(run_tesseract(page, config)?);
    }
    Ok(texts.join("\n"))
}

fn run_tesseract(image: &Path, config: &OcrConfig) -> Result<String> {
    let output = Command::new(&config.tesseract)
        .arg(image)
        .arg("stdout")
        .arg("-l")
        .arg(&config.language)
        .output()
        .map_err(|e| Error::extraction(format!("Failed to run {}: {}", config.tesseract, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.stdout.is_empty() {
            return Err(Error::extraction(format!("tesseract failed: {}", stderr.trim())));
        }
        warn!(image = %image.display(), stderr = %stderr.trim(), "tesseract reported an error");
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
