//! Configuration for the cross-encoder relevance model.

use serde::{Deserialize, Serialize};

/// Configuration for a BERT-style cross-encoder reranker.
///
/// A cross-encoder scores a pair of texts jointly: both sides are packed into
/// one input sequence and the model emits a single relevance logit. The
/// defaults describe `cross-encoder/ms-marco-MiniLM-L-6-v2`, a
/// `BertForSequenceClassification` checkpoint whose tensor layout the loader
/// expects (`bert.*` encoder weights and a one-output `classifier` linear).
/// Rerankers with other layouts (e.g. XLM-RoBERTa checkpoints keyed
/// `roberta.*` with a two-layer head) are not loadable.
///
/// `max_position_embeddings` bounds the combined token length of a scored
/// pair; pair construction must shrink inputs below this limit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrossEncoderConfig {
    /// Model identifier (e.g., "BAAI/bge-reranker-v2-m3")
    pub model_id: String,

    /// Hidden dimension size
    pub hidden_size: usize,

    /// Number of transformer layers
    pub num_hidden_layers: usize,

    /// Number of attention heads per layer
    pub num_attention_heads: usize,

    /// Intermediate (FFN) dimension size
    pub intermediate_size: usize,

    /// Maximum position embeddings (pair input length limit)
    pub max_position_embeddings: usize,
}

impl Default for CrossEncoderConfig {
    fn default() -> Self {
        // Default config for cross-encoder/ms-marco-MiniLM-L-6-v2
        Self {
            model_id: crate::config::DEFAULT_MODEL_ID.to_string(),
            hidden_size: 384,
            num_hidden_layers: 6,
            num_attention_heads: 12,
            intermediate_size: 1536,
            max_position_embeddings: 512,
        }
    }
}

impl CrossEncoderConfig {
    /// Creates a configuration with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `model_id` - Model identifier string
    /// * `hidden_size` - Hidden dimension
    /// * `num_layers` - Number of transformer layers
    /// * `num_heads` - Number of attention heads per layer
    /// * `max_positions` - Maximum pair input length in tokens
    pub fn new(
        model_id: String,
        hidden_size: usize,
        num_layers: usize,
        num_heads: usize,
        max_positions: usize,
    ) -> Self {
        Self {
            model_id,
            hidden_size,
            num_hidden_layers: num_layers,
            num_attention_heads: num_heads,
            intermediate_size: hidden_size * 4, // Standard transformer ratio
            max_position_embeddings: max_positions,
        }
    }
}
