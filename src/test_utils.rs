//! Test utilities for smart-chunker.
//!
//! Shared stubs for unit tests: a deterministic word-count length oracle and
//! scripted boundary scorers, so the partitioning algorithm is testable
//! without any model or tokenizer assets. Only compiled for tests.

use crate::error::ScoringError;
use crate::scoring::{BoundaryScorer, TokenCount};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Length oracle that counts whitespace-separated words as tokens.
#[derive(Debug, Clone, Copy)]
pub struct WordCounter;

impl TokenCount for WordCounter {
    fn token_len(&self, text: &str) -> Result<usize, ScoringError> {
        Ok(text.split_whitespace().count())
    }
}

/// Scorer that replays one canned score vector per call, in order.
///
/// Each `score_boundaries` call pops the next response; running out of
/// responses is a test bug and panics.
pub struct FixedScorer {
    responses: Mutex<Vec<Vec<f32>>>,
}

impl FixedScorer {
    pub fn new(responses: Vec<Vec<f32>>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
        }
    }
}

impl BoundaryScorer for FixedScorer {
    fn score_boundaries(&self, sentences: &[String]) -> Result<Vec<f32>, ScoringError> {
        if sentences.len() < 2 {
            return Ok(vec![]);
        }
        let response = self
            .responses
            .lock()
            .expect("scorer mutex poisoned")
            .pop()
            .expect("FixedScorer ran out of canned responses");
        assert_eq!(
            response.len(),
            sentences.len() - 1,
            "canned response does not match boundary count"
        );
        Ok(response)
    }
}

/// Scorer that serves a score template and counts invocations.
///
/// Each call returns the first `n - 1` template values (padded with 0.5 when
/// the template is short), so recursive calls over smaller slices stay
/// deterministic.
#[derive(Clone)]
pub struct CountingScorer {
    template: Vec<f32>,
    calls: Arc<AtomicUsize>,
}

impl CountingScorer {
    pub fn new(template: Vec<f32>) -> Self {
        Self {
            template,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `score_boundaries` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BoundaryScorer for CountingScorer {
    fn score_boundaries(&self, sentences: &[String]) -> Result<Vec<f32>, ScoringError> {
        if sentences.len() < 2 {
            return Ok(vec![]);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n_boundaries = sentences.len() - 1;
        let mut scores: Vec<f32> = self.template.iter().copied().take(n_boundaries).collect();
        scores.resize(n_boundaries, 0.5);
        Ok(scores)
    }
}

/// Minimal word-level tokenizer JSON for tokenizer tests.
///
/// One token per lowercase whitespace word, no special tokens, so token
/// counts are easy to reason about by eye.
pub fn test_tokenizer_json() -> String {
    let words = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    ];
    let mut vocab = String::from("\"[UNK]\": 0");
    for (i, word) in words.iter().enumerate() {
        vocab.push_str(&format!(", \"{}\": {}", word, i + 1));
    }
    format!(
        r#"{{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": {{"type": "Lowercase"}},
  "pre_tokenizer": {{"type": "Whitespace"}},
  "post_processor": null,
  "decoder": null,
  "model": {{"type": "WordLevel", "vocab": {{{vocab}}}, "unk_token": "[UNK]"}}
}}"#
    )
}
