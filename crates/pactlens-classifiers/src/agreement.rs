//! Agreement classifier
//!
//! Decides whether document text resembles a legal agreement from two
//! signals over the section-cue keyword set:
//!
//! - the share of fixed-size chunks whose cue coverage reaches the vote
//!   threshold (catches agreement language concentrated in a few sections)
//! - the cue coverage of the whole document (catches language spread thinly
//!   but consistently)
//!
//! Either signal reaching its acceptance threshold accepts the document.
//!
//! The decision is advisory. Callers log it and run analysis regardless;
//! a rejected document is never blocked.

use crate::chunker::chunk_text;
use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::config::AgreementConfig;
use crate::heuristic::HeuristicScorer;
use pactlens_core::{ClassificationDetail, RejectionReason, Result};
use std::time::Instant;
use tracing::debug;

/// Chunk-vote plus whole-document agreement classifier
#[derive(Debug, Clone)]
pub struct AgreementClassifier {
    scorer: HeuristicScorer,
    config: AgreementConfig,
}

impl AgreementClassifier {
    /// Build a classifier from configuration
    pub fn new(config: AgreementConfig) -> Result<Self> {
        Ok(Self {
            scorer: HeuristicScorer::new(&config.section_cues)?,
            config,
        })
    }

    /// Accept or reject `text`, with the numbers behind the decision
    pub fn assess(&self, text: &str) -> (bool, ClassificationDetail) {
        if text.trim().is_empty() {
            return (false, ClassificationDetail::empty());
        }

        let chunks = chunk_text(text, self.config.chunk_words, self.config.max_chunks);
        let chunk_scores: Vec<f64> = chunks.iter().map(|c| self.scorer.score(c)).collect();

        let votes = chunk_scores
            .iter()
            .filter(|&&s| s >= self.config.chunk_vote_threshold)
            .count();
        let vote_ratio = votes as f64 / chunks.len() as f64;
        let heuristic = self.scorer.score(text);
        let avg_chunk_score = chunk_scores.iter().sum::<f64>() / chunk_scores.len().max(1) as f64;

        let accepted =
            vote_ratio >= self.config.accept_vote_ratio || heuristic >= self.config.accept_heuristic;

        debug!(
            chunks = chunks.len(),
            votes,
            vote_ratio,
            heuristic,
            accepted,
            "Agreement classification"
        );

        let detail = ClassificationDetail {
            chunks: chunks.len(),
            votes,
            vote_ratio: round3(vote_ratio),
            heuristic: round3(heuristic),
            avg_chunk_score: round3(avg_chunk_score),
            reason: (!accepted).then_some(RejectionReason::LowConfidence),
        };

        (accepted, detail)
    }

    pub fn config(&self) -> &AgreementConfig {
        &self.config
    }
}

impl Classifier for AgreementClassifier {
    fn classify(&self, text: &str) -> ClassificationResult {
        let start = Instant::now();

        let (accepted, detail) = self.assess(text);
        let label = if accepted { "agreement" } else { "not_agreement" };

        let mut metadata = ClassificationMetadata::default();
        metadata.extra = vec![
            ("chunks".to_string(), detail.chunks.to_string()),
            ("votes".to_string(), detail.votes.to_string()),
        ];
        if let Some(reason) = detail.reason {
            metadata.extra.push(("reason".to_string(), reason.as_str().to_string()));
        }

        ClassificationResult {
            label: label.to_string(),
            score: detail.vote_ratio.max(detail.heuristic) as f32,
            metadata,
            latency_us: start.elapsed().as_micros() as u64,
        }
    }

    fn name(&self) -> &str {
        "agreement"
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
