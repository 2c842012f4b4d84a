//! Core types for PactLens

use serde::{Deserialize, Deserializer, Serialize};

/// Why an agreement classification was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Input was empty or whitespace only
    EmptyText,
    /// Neither the chunk vote nor the whole-document score reached the threshold
    LowConfidence,
}

impl RejectionReason {
    /// Wire label of this reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::LowConfidence => "low_confidence",
        }
    }
}

/// Explanation of one agreement classification.
///
/// Ratios are rounded to three decimals for reporting; the accept decision
/// is taken on the unrounded values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDetail {
    /// Number of chunks scored
    pub chunks: usize,

    /// Number of chunks whose score reached the vote threshold
    pub votes: usize,

    /// votes / chunks
    pub vote_ratio: f64,

    /// Heuristic score of the whole document
    pub heuristic: f64,

    /// Mean of the per-chunk scores
    pub avg_chunk_score: f64,

    /// Set when the document was rejected
    pub reason: Option<RejectionReason>,
}

impl ClassificationDetail {
    /// Detail for an input with nothing to score
    pub fn empty() -> Self {
        Self {
            reason: Some(RejectionReason::EmptyText),
            ..Default::default()
        }
    }
}

/// Structured analysis of a legal document.
///
/// Every field is always serialized; an empty string or empty list means
/// "no data". Absent keys and `null` values in model output deserialize to
/// the same empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,

    #[serde(default, deserialize_with = "nullable")]
    pub key_terms: Vec<KeyTerm>,

    #[serde(default, deserialize_with = "nullable")]
    pub main_clauses: Vec<Clause>,

    #[serde(default, deserialize_with = "nullable")]
    pub critical_dates: Vec<CriticalDate>,

    #[serde(default, deserialize_with = "nullable")]
    pub parties: Vec<Party>,

    #[serde(default, deserialize_with = "nullable")]
    pub jurisdiction: String,

    #[serde(default, deserialize_with = "nullable")]
    pub obligations: Vec<Obligation>,

    #[serde(default, deserialize_with = "nullable")]
    pub risks: Vec<Risk>,

    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub missing_clauses: Vec<MissingClause>,

    #[serde(default, deserialize_with = "nullable")]
    pub compliance_issues: Vec<ComplianceIssue>,

    #[serde(default, deserialize_with = "nullable")]
    pub next_steps: Vec<String>,

    /// Populated only when the model call failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// True when no structured list carries data
    pub fn lists_empty(&self) -> bool {
        self.key_terms.is_empty()
            && self.main_clauses.is_empty()
            && self.critical_dates.is_empty()
            && self.parties.is_empty()
            && self.obligations.is_empty()
            && self.risks.is_empty()
            && self.missing_clauses.is_empty()
            && self.compliance_issues.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyTerm {
    #[serde(default, deserialize_with = "nullable")]
    pub term: String,
    #[serde(default, deserialize_with = "nullable")]
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalDate {
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub event: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    #[serde(default, deserialize_with = "nullable")]
    pub party: String,
    #[serde(default, deserialize_with = "nullable")]
    pub responsibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default, deserialize_with = "nullable")]
    pub risk: String,
    /// high / medium / low, as reported by the model
    #[serde(default, deserialize_with = "nullable")]
    pub severity: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingClause {
    #[serde(default, deserialize_with = "nullable")]
    pub clause: String,
    #[serde(default, deserialize_with = "nullable")]
    pub importance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    #[serde(default, deserialize_with = "nullable")]
    pub issue: String,
    #[serde(default, deserialize_with = "nullable")]
    pub regulation: String,
}

/// Treat an explicit `null` like a missing key.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
