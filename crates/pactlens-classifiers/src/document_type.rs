//! Document-type detection

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::config::CategorySpec;
use aho_corasick::AhoCorasick;
use pactlens_core::{Error, Result};
use std::time::Instant;

/// Picks the document category whose keywords occur most often.
///
/// A category's score is the number of its keywords found anywhere in the
/// text as case-insensitive substrings (each keyword counts once). The
/// highest score wins, earlier categories win ties, and the fallback label
/// is returned when nothing matches. All categories are scored in one pass
/// over the text.
#[derive(Debug, Clone)]
pub struct DocumentTypeDetector {
    automaton: AhoCorasick,
    /// Category index of each automaton pattern
    pattern_category: Vec<usize>,
    categories: Vec<String>,
    fallback: String,
}

impl DocumentTypeDetector {
    /// Build a detector over the given categories
    pub fn new(categories: &[CategorySpec], fallback: impl Into<String>) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_category = Vec::new();

        for (index, category) in categories.iter().enumerate() {
            for keyword in &category.keywords {
                patterns.push(keyword.to_lowercase());
                pattern_category.push(index);
            }
        }

        // patterns and haystack are both lowercased, so matching is exact
        let automaton = AhoCorasick::new(&patterns)
            .map_err(|e| Error::classifier(format!("Failed to build category matcher: {}", e)))?;

        Ok(Self {
            automaton,
            pattern_category,
            categories: categories.iter().map(|c| c.name.clone()).collect(),
            fallback: fallback.into(),
        })
    }

    /// Keyword hits per category, in category order
    pub fn scores(&self, text: &str) -> Vec<(&str, usize)> {
        let text = text.to_lowercase();
        let mut seen = vec![false; self.pattern_category.len()];
        for m in self.automaton.find_overlapping_iter(&text) {
            seen[m.pattern().as_usize()] = true;
        }

        let mut counts = vec![0usize; self.categories.len()];
        for (pattern, hit) in seen.iter().enumerate() {
            if *hit {
                counts[self.pattern_category[pattern]] += 1;
            }
        }

        self.categories
            .iter()
            .map(String::as_str)
            .zip(counts)
            .collect()
    }

    /// Best-matching category label, or the fallback label
    pub fn detect(&self, text: &str) -> &str {
        let mut best: Option<(&str, usize)> = None;
        for (name, score) in self.scores(text) {
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((name, score));
            }
        }

        match best {
            Some((name, _)) => name,
            None => &self.fallback,
        }
    }

    /// Label used when nothing matches
    pub fn fallback_label(&self) -> &str {
        &self.fallback
    }
}

impl Classifier for DocumentTypeDetector {
    fn classify(&self, text: &str) -> ClassificationResult {
        let start = Instant::now();

        let scores = self.scores(text);
        let total: usize = scores.iter().map(|(_, s)| s).sum();
        let label = self.detect(text).to_string();
        let best = scores
            .iter()
            .find(|(name, _)| *name == label)
            .map_or(0, |(_, s)| *s);

        let metadata = ClassificationMetadata {
            all_scores: Some(
                scores
                    .iter()
                    .map(|(name, s)| (name.to_string(), *s as f32))
                    .collect(),
            ),
            ..Default::default()
        };

        ClassificationResult {
            label,
            score: if total == 0 { 0.0 } else { best as f32 / total as f32 },
            metadata,
            latency_us: start.elapsed().as_micros() as u64,
        }
    }

    fn name(&self) -> &str {
        "document_type"
    }
}
