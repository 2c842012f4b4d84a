//! Cleanup of raw model responses
//!
//! Models asked for "only JSON" still tend to wrap it in a markdown fence:
//! ````text
//! ```json
//! {"summary": "..."}
//! ```
//! ````

use crate::types::AnalysisResult;
use crate::Result;

/// Trim the response and remove a leading ```` ```json ```` or ```` ``` ````
/// fence and a trailing ```` ``` ```` fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse a model response into an [`AnalysisResult`].
///
/// Any `error` key in the model output is discarded; `error` is only set
/// when the model call itself fails.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let mut result: AnalysisResult = serde_json::from_str(strip_code_fence(raw))?;
    result.error = None;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"summary\": \"ok\"}\n```";
        assert_eq!(strip_code_fence(raw), "{\"summary\": \"ok\"}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "  ```\n{}\n```  \n";
        assert_eq!(strip_code_fence(raw), "{}");
    }

    #[test]
    fn test_unfenced_passthrough() {
        assert_eq!(strip_code_fence(" {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_only_trailing_fence() {
        assert_eq!(strip_code_fence("{}\n```"), "{}");
    }

    #[test]
    fn test_parse_fenced_analysis() {
        let raw = "```json\n{\"summary\": \"Lease\", \"jurisdiction\": \"Ontario\"}\n```";
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.summary, "Lease");
        assert_eq!(result.jurisdiction, "Ontario");
    }

    #[test]
    fn test_parse_discards_model_error_key() {
        let result = parse_analysis(r#"{"summary": "Lease", "error": "made up"}"#).unwrap();
        assert_eq!(result.summary, "Lease");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_failure_is_serialization_error() {
        let err = parse_analysis("I could not analyze this document.").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)), "got {:?}", err);

        let err = parse_analysis("42").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }
}
