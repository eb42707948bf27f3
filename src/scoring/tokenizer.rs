//! Tokenization utilities for the cross-encoder.
//!
//! This module provides the `TokenizerHandle` type for managing HuggingFace
//! tokenizers with proper truncation configuration. The handle doubles as the
//! length oracle ([`TokenCount`]) used by pair construction and the
//! partitioner.

use super::TokenCount;
use crate::error::ScoringError;
use tokenizers::tokenizer::{Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy};

/// A tokenized sentence pair ready for cross-encoder inference.
#[derive(Debug, Clone)]
pub struct EncodedPair {
    /// Token IDs for both sides packed into one sequence
    pub ids: Vec<u32>,
    /// Segment IDs (0 for the left side, 1 for the right side)
    pub type_ids: Vec<u32>,
}

/// Handle for a configured tokenizer.
///
/// Wraps a HuggingFace tokenizer with pair truncation configured to the
/// model's maximum input length. Read-only after construction and safely
/// reusable across sequential chunking calls.
///
/// # Examples
///
/// ```ignore
/// let tokenizer_bytes = std::fs::read("tokenizer.json")?;
/// let handle = TokenizerHandle::from_bytes(tokenizer_bytes, 8192)?;
///
/// let n = handle.token_len("Hello, world!")?;
/// let pair = handle.encode_pair("left text", "right text")?;
/// ```
pub struct TokenizerHandle {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TokenizerHandle {
    /// Creates a tokenizer from JSON bytes with pair truncation configured.
    ///
    /// # Arguments
    ///
    /// * `tokenizer_bytes` - Serialized tokenizer JSON bytes
    /// * `max_length` - Maximum combined sequence length for a pair
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TokenizerUnavailable` if initialization fails.
    pub fn from_bytes(tokenizer_bytes: Vec<u8>, max_length: usize) -> Result<Self, ScoringError> {
        let mut tokenizer = Tokenizer::from_bytes(tokenizer_bytes).map_err(|e| {
            ScoringError::TokenizerUnavailable(format!("Failed to deserialize tokenizer: {}", e))
        })?;

        configure_truncation(&mut tokenizer, max_length)?;

        Ok(Self {
            tokenizer,
            max_length,
        })
    }

    /// Returns the configured maximum pair length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    /// Encodes a sentence pair into one packed sequence.
    ///
    /// Both sides are tokenized jointly with special tokens, truncated to the
    /// configured maximum length (longest side first).
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TokenizationFailed` if encoding fails or
    /// produces no tokens.
    pub fn encode_pair(&self, left: &str, right: &str) -> Result<EncodedPair, ScoringError> {
        let encoding = self
            .tokenizer
            .encode((left, right), true)
            .map_err(|e| ScoringError::TokenizationFailed(format!("Encoding failed: {}", e)))?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Err(ScoringError::TokenizationFailed(
                "Tokenizer returned no tokens".to_string(),
            ));
        }

        Ok(EncodedPair {
            ids: ids.to_vec(),
            type_ids: encoding.get_type_ids().to_vec(),
        })
    }
}

impl TokenCount for TokenizerHandle {
    /// Counts content tokens, excluding special tokens such as CLS/SEP.
    fn token_len(&self, text: &str) -> Result<usize, ScoringError> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| ScoringError::TokenizationFailed(format!("Encoding failed: {}", e)))?;
        Ok(encoding.get_ids().len())
    }
}

impl Clone for TokenizerHandle {
    fn clone(&self) -> Self {
        Self {
            tokenizer: self.tokenizer.clone(),
            max_length: self.max_length,
        }
    }
}

/// Configures tokenizer with pair truncation settings.
fn configure_truncation(tokenizer: &mut Tokenizer, max_length: usize) -> Result<(), ScoringError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            stride: 0,
            strategy: TruncationStrategy::LongestFirst,
            direction: TruncationDirection::Right,
        }))
        .map_err(|e| {
            ScoringError::InvalidConfig(format!("Failed to configure tokenizer truncation: {}", e))
        })?;

    Ok(())
}
