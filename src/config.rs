//! Chunker configuration and validation.
//!
//! This module defines [`ChunkerConfig`], the construction-time options for
//! [`SmartChunker`](crate::chunker::SmartChunker), and the [`Language`] tag
//! parsing. Validation happens before any model or tokenizer resource is
//! loaded, so a bad configuration fails fast and cheaply.

use crate::error::ChunkerError;
use serde::{Deserialize, Serialize};

/// Default reranker model identifier.
///
/// A BERT-architecture cross-encoder whose checkpoint layout matches the
/// loader: `bert.*` weights plus a single-output `classifier` head.
pub const DEFAULT_MODEL_ID: &str = "cross-encoder/ms-marco-MiniLM-L-6-v2";

/// Default maximum tokens per accepted chunk.
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 256;

/// Default number of sentence pairs per inference batch.
pub const DEFAULT_MINIBATCH_SIZE: usize = 8;

/// Languages the sentence splitter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Russian ("ru", "rus", "russian")
    Russian,
    /// English ("en", "eng", "english")
    English,
}

impl Language {
    /// Parses a language tag.
    ///
    /// Accepts the common spellings of Russian and English, case-insensitive
    /// and whitespace-tolerant. Any other tag is a configuration error.
    pub fn from_tag(tag: &str) -> Result<Self, ChunkerError> {
        match tag.trim().to_lowercase().as_str() {
            "ru" | "rus" | "russian" => Ok(Language::Russian),
            "en" | "eng" | "english" => Ok(Language::English),
            _ => Err(ChunkerError::InvalidConfig(format!(
                "The language {tag} is not supported!"
            ))),
        }
    }
}

/// Compute device preference for model loading.
///
/// Selection is best-effort: unavailable backends fall back to the next
/// level down (CUDA -> Metal -> CPU). The preference never affects chunking
/// semantics, only where inference runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DevicePreference {
    /// Pick the best available backend.
    Auto,
    /// Prefer CUDA; fall back to Metal, then CPU.
    Cuda,
    /// Prefer Metal; fall back to CPU.
    Metal,
    /// CPU only.
    #[default]
    Cpu,
}

/// Construction options for [`SmartChunker`](crate::chunker::SmartChunker).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Language tag forwarded to the sentence splitter.
    pub language: Language,

    /// Reranker model identifier (informational; weights are passed as bytes).
    pub model_id: String,

    /// Maximum token length for an accepted chunk.
    pub max_chunk_length: usize,

    /// Number of boundary pairs submitted to the model per batch.
    pub minibatch_size: usize,

    /// Whether newlines terminate sentences in the splitter.
    pub newline_as_separator: bool,

    /// Compute device preference for the cross-encoder.
    pub device: DevicePreference,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            language: Language::Russian,
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            minibatch_size: DEFAULT_MINIBATCH_SIZE,
            newline_as_separator: true,
            device: DevicePreference::Cpu,
        }
    }
}

impl ChunkerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ChunkerError::InvalidConfig` if either limit is zero.
    /// Language tags are validated at parse time by [`Language::from_tag`].
    pub fn validate(&self) -> Result<(), ChunkerError> {
        if self.max_chunk_length == 0 {
            return Err(ChunkerError::InvalidConfig(
                "max_chunk_length must be positive".to_string(),
            ));
        }
        if self.minibatch_size == 0 {
            return Err(ChunkerError::InvalidConfig(
                "minibatch_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Target token cap for a single sentence from the splitter.
    ///
    /// Two thirds of the chunk cap, so that no single sentence forces an
    /// oversized, unsplittable chunk.
    pub fn target_sentence_length(&self) -> usize {
        (2 * self.max_chunk_length) / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags_all_spellings() {
        for tag in ["ru", "rus", "russian", "RU", " Russian "] {
            assert_eq!(Language::from_tag(tag).unwrap(), Language::Russian);
        }
        for tag in ["en", "eng", "english", "EN", "English"] {
            assert_eq!(Language::from_tag(tag).unwrap(), Language::English);
        }
    }

    #[test]
    fn test_language_unsupported_tag() {
        let result = Language::from_tag("fr");
        assert!(matches!(result, Err(ChunkerError::InvalidConfig(_))));
        assert!(result.unwrap_err().to_string().contains("fr"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ChunkerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chunk_length, 256);
        assert_eq!(config.minibatch_size, 8);
        assert!(config.newline_as_separator);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = ChunkerConfig {
            max_chunk_length: 0,
            ..ChunkerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChunkerConfig {
            minibatch_size: 0,
            ..ChunkerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_target_sentence_length() {
        let config = ChunkerConfig {
            max_chunk_length: 256,
            ..ChunkerConfig::default()
        };
        assert_eq!(config.target_sentence_length(), 170);
    }
}
