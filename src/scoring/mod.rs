//! Boundary scoring abstractions and the cross-encoder implementation.
//!
//! The partitioner only depends on two capability traits defined here:
//!
//! - [`TokenCount`] - the length oracle: token length of a text under a
//!   fixed vocabulary.
//! - [`BoundaryScorer`] - one relevance score per adjacent-sentence boundary;
//!   lower means the two sides are more separable.
//!
//! The production implementation is [`CrossEncoderScorer`], which frames each
//! boundary as a whole-prefix vs whole-suffix text pair, shrinks the pair to
//! the model's context window ([`pairs`]), and scores batches of pairs with a
//! candle BERT cross-encoder ([`model`]).

pub mod config;
pub mod model;
pub mod pairs;
pub mod scorer;
pub mod tokenizer;

use crate::error::ScoringError;

pub use config::CrossEncoderConfig;
pub use model::CrossEncoder;
pub use scorer::CrossEncoderScorer;
pub use tokenizer::{EncodedPair, TokenizerHandle};

/// Length oracle: token length of a text under a fixed vocabulary.
///
/// Deterministic for a given vocabulary. Counts content tokens only, without
/// special tokens such as CLS/SEP.
pub trait TokenCount: Send + Sync {
    /// Returns the token length of `text`.
    fn token_len(&self, text: &str) -> Result<usize, ScoringError>;
}

/// Scores the semantic continuity across each adjacent-sentence boundary.
///
/// For `n` sentences there are `n - 1` boundaries; score `i` measures the
/// relatedness across the gap between sentence `i` and sentence `i + 1`.
/// The partitioner splits at the boundary with the *minimum* score.
///
/// Implementations must preserve boundary order and must not retry failed
/// inference internally; a failed call aborts the whole chunking call.
pub trait BoundaryScorer: Send + Sync {
    /// Returns one score per boundary, aligned index-for-index with boundary
    /// positions. Fewer than two sentences have no boundaries: empty vec.
    fn score_boundaries(&self, sentences: &[String]) -> Result<Vec<f32>, ScoringError>;
}
