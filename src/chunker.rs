//! Top-level chunking entry point.
//!
//! [`SmartChunker`] wires the sentence splitter, the boundary scorer, and the
//! length oracle into the `text -> chunks` call. Trivial inputs never touch
//! the model: empty text returns no chunks, and text that already fits the
//! cap is returned as a single chunk without a single scorer invocation.

use crate::chunking::partition;
use crate::config::ChunkerConfig;
use crate::error::ChunkerError;
use crate::scoring::{
    BoundaryScorer, CrossEncoder, CrossEncoderConfig, CrossEncoderScorer, TokenCount,
    TokenizerHandle,
};
use crate::splitting::{RuleSentenceSplitter, SentenceSplitter};
use std::sync::Arc;
use tracing::{debug, info};

/// Semantic text chunker driven by a cross-encoder relevance model.
///
/// Splits a passage into ordered, length-bounded chunks by recursively
/// cutting at the semantically weakest sentence boundary. Synchronous and
/// blocking: the only suspension points are the model's inference calls, and
/// they are not cancellable mid-call. All state is read-only after
/// construction, so one instance is safely reusable across sequential calls.
///
/// # Examples
///
/// ```ignore
/// use smart_chunker::{ChunkerConfig, SmartChunker};
///
/// let model_bytes = std::fs::read("reranker.safetensors")?;
/// let tokenizer_bytes = std::fs::read("tokenizer.json")?;
/// let chunker = SmartChunker::from_bytes(model_bytes, tokenizer_bytes, ChunkerConfig::default())?;
///
/// let chunks = chunker.split_into_chunks("long document text...")?;
/// ```
pub struct SmartChunker {
    config: ChunkerConfig,
    splitter: Box<dyn SentenceSplitter>,
    scorer: Box<dyn BoundaryScorer>,
    counter: Arc<dyn TokenCount>,
}

impl SmartChunker {
    /// Creates a chunker with the production cross-encoder stack.
    ///
    /// The configuration is validated before any resource is loaded, so an
    /// unsupported language or a zero limit fails without touching the model
    /// bytes.
    ///
    /// # Arguments
    ///
    /// * `model_bytes` - Safetensors-format reranker weights
    /// * `tokenizer_bytes` - Tokenizer JSON bytes
    /// * `config` - Chunker configuration
    ///
    /// # Errors
    ///
    /// Returns `ChunkerError::InvalidConfig` for bad configuration and
    /// `ChunkerError::Scoring` when model or tokenizer loading fails.
    pub fn from_bytes(
        model_bytes: Vec<u8>,
        tokenizer_bytes: Vec<u8>,
        config: ChunkerConfig,
    ) -> Result<Self, ChunkerError> {
        config.validate()?;

        let model_config = CrossEncoderConfig {
            model_id: config.model_id.clone(),
            ..CrossEncoderConfig::default()
        };
        let tokenizer = Arc::new(TokenizerHandle::from_bytes(
            tokenizer_bytes,
            model_config.max_position_embeddings,
        )?);
        let model = Arc::new(CrossEncoder::from_bytes(
            model_bytes,
            tokenizer.vocab_size(),
            model_config,
            config.device,
        )?);
        let scorer = CrossEncoderScorer::new(model, tokenizer.clone(), config.minibatch_size)?;

        info!(
            "SmartChunker ready (model '{}', max chunk {} tokens)",
            config.model_id, config.max_chunk_length
        );

        Ok(Self {
            config,
            splitter: Box::new(RuleSentenceSplitter),
            scorer: Box::new(scorer),
            counter: tokenizer,
        })
    }

    /// Creates a chunker from explicit collaborators.
    ///
    /// This is the seam for alternative splitters, scorers, and length
    /// oracles; the chunking algorithm itself never changes.
    pub fn with_parts(
        config: ChunkerConfig,
        splitter: Box<dyn SentenceSplitter>,
        scorer: Box<dyn BoundaryScorer>,
        counter: Arc<dyn TokenCount>,
    ) -> Result<Self, ChunkerError> {
        config.validate()?;
        Ok(Self {
            config,
            splitter,
            scorer,
            counter,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Splits `text` into an ordered sequence of chunks.
    ///
    /// Whitespace-only input yields no chunks. Text whose whole token length
    /// already fits `max_chunk_length` is returned trimmed as a single chunk
    /// with zero scorer invocations. Anything longer is segmented into
    /// sentences and recursively partitioned at the weakest boundaries.
    ///
    /// # Errors
    ///
    /// Propagates scoring and tokenization failures. Chunking is
    /// all-or-nothing: either the full chunk sequence is returned or an
    /// error, never a partial result.
    pub fn split_into_chunks(&self, text: &str) -> Result<Vec<String>, ChunkerError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(vec![]);
        }
        if self.counter.token_len(trimmed)? <= self.config.max_chunk_length {
            debug!("Text fits within the chunk cap, skipping the model");
            return Ok(vec![trimmed.to_string()]);
        }

        let sentences = self.splitter.split(
            text,
            self.config.newline_as_separator,
            self.config.language,
            self.config.target_sentence_length(),
            self.counter.as_ref(),
        )?;
        debug!("Partitioning {} sentences", sentences.len());

        partition(
            &sentences,
            0,
            sentences.len(),
            self.scorer.as_ref(),
            self.counter.as_ref(),
            self.config.max_chunk_length,
        )
    }
}
