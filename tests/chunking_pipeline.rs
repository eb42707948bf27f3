//! End-to-end tests for the chunking pipeline over the public API.
//!
//! These tests exercise the full workflow with deterministic stand-ins for
//! the model-facing collaborators: a word-count length oracle and a scripted
//! boundary scorer. Model-backed scoring is covered by unit tests against
//! invalid inputs; real weights are not required here.

use smart_chunker::{
    BoundaryScorer, ChunkerConfig, ChunkerError, Language, RuleSentenceSplitter, ScoringError,
    SmartChunker, TokenCount,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts whitespace-separated words as tokens.
struct WordCounter;

impl TokenCount for WordCounter {
    fn token_len(&self, text: &str) -> Result<usize, ScoringError> {
        Ok(text.split_whitespace().count())
    }
}

/// Scores boundary `i` as `base[i]`, padding with 0.5, and counts calls.
#[derive(Clone)]
struct ScriptedScorer {
    base: Vec<f32>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedScorer {
    fn new(base: Vec<f32>) -> Self {
        Self {
            base,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BoundaryScorer for ScriptedScorer {
    fn score_boundaries(&self, sentences: &[String]) -> Result<Vec<f32>, ScoringError> {
        if sentences.len() < 2 {
            return Ok(vec![]);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = sentences.len() - 1;
        let mut scores: Vec<f32> = self.base.iter().copied().take(n).collect();
        scores.resize(n, 0.5);
        Ok(scores)
    }
}

/// Scorer whose inference always fails.
struct FailingScorer;

impl BoundaryScorer for FailingScorer {
    fn score_boundaries(&self, _sentences: &[String]) -> Result<Vec<f32>, ScoringError> {
        Err(ScoringError::InferenceFailed("device lost".to_string()))
    }
}

fn build_chunker(max_chunk_length: usize, scorer: ScriptedScorer) -> SmartChunker {
    SmartChunker::with_parts(
        ChunkerConfig {
            language: Language::English,
            max_chunk_length,
            ..ChunkerConfig::default()
        },
        Box::new(RuleSentenceSplitter),
        Box::new(scorer),
        Arc::new(WordCounter),
    )
    .expect("valid config")
}

#[test]
fn empty_and_whitespace_inputs_yield_no_chunks() {
    let chunker = build_chunker(8, ScriptedScorer::new(vec![]));
    assert!(chunker.split_into_chunks("").unwrap().is_empty());
    assert!(chunker.split_into_chunks(" \n\t  ").unwrap().is_empty());
}

#[test]
fn short_input_returns_single_trimmed_chunk_without_scoring() {
    let scorer = ScriptedScorer::new(vec![]);
    let chunker = build_chunker(20, scorer.clone());

    let chunks = chunker
        .split_into_chunks("  One short paragraph. It fits easily.  ")
        .unwrap();
    assert_eq!(chunks, vec!["One short paragraph. It fits easily."]);
    assert_eq!(scorer.calls(), 0);
}

#[test]
fn long_input_is_split_at_the_weakest_boundary() {
    // Four three-word sentences; the weakest boundary sits after the second.
    let scorer = ScriptedScorer::new(vec![0.8, 0.1, 0.9]);
    let chunker = build_chunker(6, scorer.clone());

    let text = "Cats chase mice. Dogs chase cats. Rust is fast. Python is easy.";
    let chunks = chunker.split_into_chunks(text).unwrap();

    assert_eq!(
        chunks,
        vec!["Cats chase mice. Dogs chase cats.", "Rust is fast. Python is easy."]
    );
    assert_eq!(scorer.calls(), 1);
}

#[test]
fn chunks_cover_the_input_with_no_gaps_or_overlaps() {
    let scorer = ScriptedScorer::new(vec![0.3, 0.7, 0.2, 0.9, 0.4]);
    let chunker = build_chunker(5, scorer);

    let text = "Aa bb cc. Dd ee ff. Gg hh ii. Jj kk ll. Mm nn oo. Pp qq rr.";
    let chunks = chunker.split_into_chunks(text).unwrap();

    let rejoined: Vec<String> = chunks
        .join(" ")
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    assert_eq!(rejoined, original);

    for chunk in &chunks {
        assert!(!chunk.trim().is_empty());
    }
}

#[test]
fn every_chunk_fits_the_cap_or_is_one_sentence() {
    let scorer = ScriptedScorer::new(vec![0.6, 0.2, 0.8, 0.1]);
    let chunker = build_chunker(4, scorer);

    let text = "Aa bb cc. Dd ee ff. Gg hh ii. Jj kk ll. Mm nn oo.";
    let chunks = chunker.split_into_chunks(text).unwrap();

    for chunk in &chunks {
        let words = chunk.split_whitespace().count();
        let sentence_count = chunk.matches('.').count();
        assert!(
            words <= 4 || sentence_count <= 1,
            "oversized chunk must be a single indivisible sentence: {chunk:?}"
        );
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    let text = "Aa bb cc. Dd ee ff. Gg hh ii. Jj kk ll.";
    let mut previous: Option<Vec<String>> = None;
    for _ in 0..5 {
        let chunker = build_chunker(5, ScriptedScorer::new(vec![0.5, 0.5, 0.5]));
        let chunks = chunker.split_into_chunks(text).unwrap();
        if let Some(prev) = &previous {
            assert_eq!(prev, &chunks);
        }
        previous = Some(chunks);
    }
}

#[test]
fn invalid_language_tag_fails_configuration() {
    let err = Language::from_tag("fr").unwrap_err();
    assert!(matches!(err, ChunkerError::InvalidConfig(_)));
}

#[test]
fn inference_failure_aborts_the_whole_call() {
    let chunker = SmartChunker::with_parts(
        ChunkerConfig {
            language: Language::English,
            max_chunk_length: 4,
            ..ChunkerConfig::default()
        },
        Box::new(RuleSentenceSplitter),
        Box::new(FailingScorer),
        Arc::new(WordCounter),
    )
    .unwrap();

    let result = chunker.split_into_chunks("Aa bb cc. Dd ee ff. Gg hh ii.");
    assert!(matches!(result, Err(ChunkerError::Scoring(_))));
}
