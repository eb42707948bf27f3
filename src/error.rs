//! Error types for smart-chunker.
//!
//! This module defines error types used across the library, covering
//! configuration validation, model loading, tokenization, and inference.

use thiserror::Error;

/// Errors that can occur while scoring boundary candidates.
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    /// Failed to load model from bytes
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    /// Failed to create tensor during inference
    #[error("Failed to create tensor: {0}")]
    TensorCreation(String),
    /// Forward pass through the model failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    /// Failed to tokenize text
    #[error("Tokenization failed: {0}")]
    TokenizationFailed(String),
    /// Tokenizer not available or initialization failed
    #[error("Tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),
    /// Invalid scorer configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur during chunking.
#[derive(Debug, Clone, Error)]
pub enum ChunkerError {
    /// Invalid chunker configuration (unsupported language, zero limits)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Boundary scoring failed; aborts the whole chunking call
    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

impl From<ChunkerError> for String {
    fn from(err: ChunkerError) -> String {
        err.to_string()
    }
}
