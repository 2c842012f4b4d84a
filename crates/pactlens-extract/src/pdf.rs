//! PDF text layer extraction

use pactlens_core::{Error, Result};
use std::panic;

/// Text of every page, as laid out by the PDF's text operators.
///
/// Scanned documents have no text layer and yield whitespace only.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::extraction(format!("PDF text extraction failed: {}", e))),
        Err(_) => Err(Error::extraction("PDF parser panicked")),
    }
}
