//! PactLens Extract
//!
//! Text extraction from uploaded documents and plain-text export.
//!
//! Extraction never fails from the caller's point of view: every error is
//! logged and an empty string returned. PDFs without a usable text layer are
//! rendered and OCR'd page by page.

pub mod docx;
pub mod export;
pub mod ocr;
pub mod pdf;

pub use export::{export_docx, export_pdf};
pub use ocr::OcrConfig;

use pactlens_core::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Image,
}

impl DocumentKind {
    /// Kind from the file name's extension, case-insensitively
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if [".png", ".jpg", ".jpeg"].iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Image => "image",
        }
    }
}

/// Runs extraction on the blocking thread pool
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    ocr: Arc<OcrConfig>,
}

impl Extractor {
    pub fn new(ocr: OcrConfig) -> Self {
        Self { ocr: Arc::new(ocr) }
    }

    pub fn ocr_config(&self) -> &OcrConfig {
        &self.ocr
    }

    /// Extract text, or return an empty string when nothing could be read
    pub async fn extract(&self, kind: DocumentKind, bytes: Vec<u8>) -> String {
        let ocr = Arc::clone(&self.ocr);
        let task = tokio::task::spawn_blocking(move || extract_blocking(kind, &bytes, &ocr));

        match task.await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "Extraction task failed");
                String::new()
            }
        }
    }
}

/// Synchronous extraction with the same never-fail contract
pub fn extract_blocking(kind: DocumentKind, bytes: &[u8], ocr: &OcrConfig) -> String {
    let result = match kind {
        DocumentKind::Pdf => extract_pdf(bytes, ocr),
        DocumentKind::Docx => docx::extract_docx_text(bytes),
        DocumentKind::Image => ocr::ocr_image(bytes, ocr),
    };

    match result {
        Ok(text) => {
            debug!(kind = kind.as_str(), chars = text.len(), "Extracted text");
            text
        }
        Err(e) => {
            warn!(kind = kind.as_str(), error = %e, "Extraction failed");
            String::new()
        }
    }
}

/// Text layer first, OCR when it is unreadable or blank
fn extract_pdf(bytes: &[u8], ocr: &OcrConfig) -> Result<String> {
    match pdf::extract_pdf_text(bytes) {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => {
            debug!("PDF has no text layer, falling back to OCR");
            ocr::ocr_pdf(bytes, ocr)
        }
        Err(e) => {
            warn!(error = %e, "PDF text extraction failed, falling back to OCR");
            ocr::ocr_pdf(bytes, ocr)
        }
    }
}
