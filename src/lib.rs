//! # Smart Chunker
//!
//! Semantic text chunking driven by a cross-encoder relevance model.
//!
//! A long passage is segmented into sentences, every adjacent-sentence
//! boundary is scored for semantic continuity by a cross-encoder reranker,
//! and the passage is recursively split at the weakest boundary until every
//! chunk fits a token cap. The result is an ordered sequence of coherent,
//! length-bounded chunks suitable for indexing and retrieval.
//!
//! ## Modules
//!
//! - [`chunker`] - [`SmartChunker`], the top-level entry point
//! - [`chunking`] - Recursive minimum-score boundary partitioning
//! - [`scoring`] - Boundary scoring: pair construction, tokenization, and
//!   cross-encoder inference via Candle
//! - [`splitting`] - Sentence segmentation behind the `SentenceSplitter` trait
//! - [`config`] - Construction options and validation
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```ignore
//! use smart_chunker::{ChunkerConfig, Language, SmartChunker};
//!
//! let config = ChunkerConfig {
//!     language: Language::English,
//!     max_chunk_length: 256,
//!     ..ChunkerConfig::default()
//! };
//!
//! let model_bytes = std::fs::read("reranker.safetensors")?;
//! let tokenizer_bytes = std::fs::read("tokenizer.json")?;
//! let chunker = SmartChunker::from_bytes(model_bytes, tokenizer_bytes, config)?;
//!
//! for chunk in chunker.split_into_chunks(&document)? {
//!     println!("{chunk}");
//! }
//! ```

pub mod chunker;
pub mod chunking;
pub mod config;
pub mod error;
pub mod scoring;
pub mod splitting;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chunker::SmartChunker;
pub use config::{ChunkerConfig, DevicePreference, Language};
pub use error::{ChunkerError, ScoringError};
pub use scoring::{BoundaryScorer, TokenCount};
pub use splitting::{RuleSentenceSplitter, SentenceSplitter};
