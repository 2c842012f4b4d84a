//! Analysis prompt

/// Characters of document text sent to the model
pub const MAX_PROMPT_CHARS: usize = 50_000;

/// Shape the model must answer with. Mirrors [`pactlens_core::AnalysisResult`].
pub const ANALYSIS_SCHEMA: &str = r#"{
    "summary": "Brief 2-3 sentence overview of the entire document",
    "key_terms": [
        {
            "term": "Defined term",
            "definition": "Clear definition from the document"
        }
    ],
    "main_clauses": [
        {
            "name": "Clause name/title",
            "description": "Brief description of what this clause covers"
        }
    ],
    "critical_dates": [
        {
            "date": "YYYY-MM-DD or date range",
            "event": "What happens on this date"
        }
    ],
    "parties": [
        {
            "name": "Party name",
            "role": "Their role in the agreement"
        }
    ],
    "jurisdiction": "Governing law and jurisdiction information",
    "obligations": [
        {
            "party": "Which party",
            "responsibility": "What they must do"
        }
    ],
    "risks": [
        {
            "risk": "Identified risk",
            "severity": "high/medium/low",
            "description": "Explanation of the risk"
        }
    ],
    "recommendations": [
        "Actionable recommendation to address identified issues"
    ],
    "missing_clauses": [
        {
            "clause": "Missing clause name",
            "importance": "Why it's important"
        }
    ],
    "compliance_issues": [
        {
            "issue": "Compliance concern",
            "regulation": "Relevant law/regulation (if identifiable)"
        }
    ],
    "next_steps": [
        "Action item that should be taken next"
    ]
}"#;

const RULES: &[&str] = &[
    "If information is not found, return an empty string (\"\") or empty list ([]). Never omit a field or use null.",
    "Do not include explanations outside the JSON.",
    "Keep responses concise and accessible for non-lawyers.",
    "Give enough context in each field for the analysis to be useful on its own.",
    "Strictly return JSON with the specified fields and no additional fields.",
];

/// Build the analysis prompt for a document of the given type
pub fn build_prompt(text: &str, document_type: &str) -> String {
    let label = if document_type.trim().is_empty() {
        "legal document"
    } else {
        document_type
    };

    let mut prompt = format!(
        "Analyze the following {} and provide a comprehensive analysis.\n\
         Return ONLY valid JSON that strictly matches this schema:\n\n{}\n\n\
         Document Text:\n{}\n\nRules:\n",
        label,
        ANALYSIS_SCHEMA,
        truncate_chars(text, MAX_PROMPT_CHARS)
    );
    for rule in RULES {
        prompt.push_str("- ");
        prompt.push_str(rule);
        prompt.push('\n');
    }
    prompt
}

/// Longest prefix of `text` holding at most `max` characters
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pactlens_core::AnalysisResult;

    #[test]
    fn test_prompt_contains_label_and_text() {
        let prompt = build_prompt("The Tenant pays rent.", "rental agreement");
        assert!(prompt.starts_with("Analyze the following rental agreement"));
        assert!(prompt.contains("Document Text:\nThe Tenant pays rent.\n"));
        assert!(prompt.contains("\"compliance_issues\""));
        assert!(prompt.ends_with("no additional fields.\n"));
    }

    #[test]
    fn test_blank_label_defaults() {
        let prompt = build_prompt("text", "  ");
        assert!(prompt.starts_with("Analyze the following legal document"));
    }

    #[test]
    fn test_text_truncated() {
        let text = "é".repeat(MAX_PROMPT_CHARS + 10);
        let prompt = build_prompt(&text, "nda");
        let embedded = "é".repeat(MAX_PROMPT_CHARS);
        assert!(prompt.contains(&format!("Document Text:\n{}\n\nRules:", embedded)));
    }

    #[test]
    fn test_truncate_chars_boundaries() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("aéc", 2), "aé");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_schema_matches_result_shape() {
        let parsed: AnalysisResult = serde_json::from_str(ANALYSIS_SCHEMA).unwrap();
        assert_eq!(parsed.key_terms.len(), 1);
        assert_eq!(parsed.next_steps.len(), 1);
        assert_eq!(parsed.risks[0].severity, "high/medium/low");
        assert!(parsed.error.is_none());
    }
}
