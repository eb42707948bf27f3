//! Cross-encoder boundary scorer.
//!
//! Implements [`BoundaryScorer`] on top of [`CrossEncoder`]: builds the
//! whole-prefix vs whole-suffix pair for every boundary, shrinks each pair
//! to the model's context window, and scores the pairs in minibatches.

use super::model::CrossEncoder;
use super::pairs::{pair_texts, shrink_to_fit};
use super::tokenizer::{EncodedPair, TokenizerHandle};
use super::BoundaryScorer;
use crate::error::ScoringError;
use std::sync::Arc;
use tracing::debug;

/// Boundary scorer backed by a cross-encoder relevance model.
///
/// One instance wraps a shared model and tokenizer; both are read-only
/// after construction, so the scorer is reusable across sequential chunking
/// calls.
pub struct CrossEncoderScorer {
    model: Arc<CrossEncoder>,
    tokenizer: Arc<TokenizerHandle>,
    minibatch_size: usize,
}

impl CrossEncoderScorer {
    /// Creates a scorer over a shared model and tokenizer.
    ///
    /// `minibatch_size` bounds how many pairs are submitted to the model per
    /// inference call and must be positive.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidConfig` for a zero `minibatch_size`.
    pub fn new(
        model: Arc<CrossEncoder>,
        tokenizer: Arc<TokenizerHandle>,
        minibatch_size: usize,
    ) -> Result<Self, ScoringError> {
        if minibatch_size == 0 {
            return Err(ScoringError::InvalidConfig(
                "minibatch_size must be positive".to_string(),
            ));
        }
        Ok(Self {
            model,
            tokenizer,
            minibatch_size,
        })
    }

    /// Builds the encoded pair for one boundary, narrowed to fit the model.
    fn encode_boundary(
        &self,
        sentences: &[String],
        boundary: usize,
    ) -> Result<EncodedPair, ScoringError> {
        let window = shrink_to_fit(
            sentences,
            boundary,
            self.tokenizer.as_ref(),
            self.model.max_input_len(),
        )?;
        let (left, right) = pair_texts(sentences, boundary, &window);
        self.tokenizer.encode_pair(&left, &right)
    }
}

impl BoundaryScorer for CrossEncoderScorer {
    fn score_boundaries(&self, sentences: &[String]) -> Result<Vec<f32>, ScoringError> {
        if sentences.len() < 2 {
            return Ok(vec![]);
        }

        let pairs = (0..sentences.len() - 1)
            .map(|boundary| self.encode_boundary(sentences, boundary))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Scoring {} boundary pairs in batches of {}",
            pairs.len(),
            self.minibatch_size
        );

        let mut scores = Vec::with_capacity(pairs.len());
        for batch in pairs.chunks(self.minibatch_size) {
            scores.extend(self.model.score_pairs(batch)?);
        }
        Ok(scores)
    }
}
