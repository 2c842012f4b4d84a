//! Deterministic analysis results used without a model

use pactlens_core::AnalysisResult;

use crate::prompt::truncate_chars;

const SUMMARY_FALLBACK_CHARS: usize = 500;

/// Summary-only analysis built from the text itself
pub fn fallback_analysis(text: &str) -> AnalysisResult {
    AnalysisResult {
        summary: leading_sentences(text),
        jurisdiction: "Not analyzed".to_string(),
        recommendations: vec!["Have a legal professional review this document".to_string()],
        next_steps: vec!["Review document with legal counsel".to_string()],
        ..Default::default()
    }
}

/// Result reported when the model call itself failed
pub fn error_analysis(message: impl std::fmt::Display) -> AnalysisResult {
    AnalysisResult {
        error: Some(format!("Analysis failed: {}", message)),
        summary: "Document analysis could not be completed due to technical issues.".to_string(),
        jurisdiction: "Not available".to_string(),
        ..Default::default()
    }
}

/// First three `.`-separated pieces, or the first 500 characters when the
/// text has three pieces or fewer
fn leading_sentences(text: &str) -> String {
    let pieces: Vec<&str> = text.split('.').collect();
    if pieces.len() > 3 {
        format!("{}.", pieces[..3].join(". "))
    } else {
        truncate_chars(text, SUMMARY_FALLBACK_CHARS).to_string()
    }
}
