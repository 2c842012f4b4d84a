//! Keyword coverage scorer

use pactlens_core::{Error, Result};
use regex::RegexSet;

/// Scores text by the fraction of keywords it contains as whole words.
///
/// Matching is case-insensitive and anchored on word boundaries at both
/// ends, so `agreements` does not count as `agreement`. Multi-word keywords
/// match as phrases. Each keyword counts at most once.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    set: RegexSet,
    keyword_count: usize,
}

impl HeuristicScorer {
    /// Compile a scorer for the given keywords
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = keywords
            .into_iter()
            .map(|k| format!(r"(?i)\b{}\b", regex::escape(k.as_ref())))
            .collect();

        let set = RegexSet::new(&patterns).map_err(|e| {
            Error::classifier(format!("Failed to compile keyword patterns: {}", e))
        })?;

        Ok(Self {
            keyword_count: patterns.len(),
            set,
        })
    }

    /// Number of distinct keywords present in `text`
    pub fn matched(&self, text: &str) -> usize {
        self.set.matches(text).iter().count()
    }

    /// Fraction of keywords present in `text`, in [0, 1]
    pub fn score(&self, text: &str) -> f64 {
        self.matched(text) as f64 / self.keyword_count.max(1) as f64
    }

    /// Number of keywords this scorer checks
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_does_not_match() {
        let scorer = HeuristicScorer::new(["agreement"]).unwrap();
        assert_eq!(scorer.matched("agreements"), 0);
        assert_eq!(scorer.score("These agreements are void"), 0.0);
    }

    #[test]
    fn test_case_insensitive_whole_word() {
        let scorer = HeuristicScorer::new(["agreement"]).unwrap();
        assert_eq!(scorer.matched("This Agreement is binding"), 1);
        assert_eq!(scorer.score("This Agreement is binding"), 1.0);
    }

    #[test]
    fn test_keyword_counted_once() {
        let scorer = HeuristicScorer::new(["salary", "termination"]).unwrap();
        assert_eq!(scorer.score("salary salary salary"), 0.5);
    }

    #[test]
    fn test_phrase_keywords() {
        let scorer = HeuristicScorer::new(["security deposit", "notice period"]).unwrap();
        assert_eq!(scorer.matched("The Security Deposit is refundable."), 1);
        assert_eq!(scorer.matched("security, deposit"), 0);
    }

    #[test]
    fn test_empty_input_and_empty_keywords() {
        let scorer = HeuristicScorer::new(["agreement"]).unwrap();
        assert_eq!(scorer.score(""), 0.0);

        let empty = HeuristicScorer::new(Vec::<String>::new()).unwrap();
        assert_eq!(empty.score("agreement"), 0.0);
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let scorer = HeuristicScorer::new(["non-disclosure", "u.s. law"]).unwrap();
        assert_eq!(scorer.matched("a Non-Disclosure agreement"), 1);
        assert_eq!(scorer.matched("nondisclosure"), 0);
        assert_eq!(scorer.matched("under U.S. law today"), 1);
        assert_eq!(scorer.matched("under uxsx law"), 0);
    }
}
