//! Cross-encoder model implementation and inference.
//!
//! This module provides the cross-encoder relevance model using the Candle
//! ML framework: a BERT encoder with a single-output linear head that scores
//! how strongly two texts belong together. Candle runs in inference mode
//! only, so no gradient state is ever tracked.

use super::config::CrossEncoderConfig;
use super::tokenizer::EncodedPair;
use crate::config::DevicePreference;
use crate::error::ScoringError;
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use tracing::{info, warn};

/// BERT cross-encoder with a relevance classification head.
///
/// Inputs are packed sentence pairs (token IDs plus segment IDs); the output
/// is one scalar logit per pair. Higher logits mean stronger semantic
/// continuity across the pair. The model is read-only after construction and
/// reusable across sequential scoring calls.
///
/// # Checkpoint Layout
///
/// The loader reads `BertForSequenceClassification` safetensors: encoder
/// tensors under the `bert.` prefix and a one-output `classifier` linear
/// (`cross-encoder/ms-marco-MiniLM-L-6-v2` and friends). Checkpoints with a
/// different layout, such as XLM-RoBERTa rerankers keyed `roberta.*` with a
/// `classifier.dense`/`classifier.out_proj` head, fail with `ModelLoad`.
///
/// # Examples
///
/// ```ignore
/// let model_bytes = std::fs::read("reranker.safetensors")?;
/// let config = CrossEncoderConfig::default();
/// let model = CrossEncoder::from_bytes(model_bytes, 30522, config, DevicePreference::Cpu)?;
///
/// let scores = model.score_pairs(&encoded_pairs)?;
/// ```
pub struct CrossEncoder {
    bert: BertModel,
    classifier: Linear,
    config: CrossEncoderConfig,
    device: Device,
}

impl CrossEncoder {
    /// Creates a cross-encoder from safetensors bytes.
    ///
    /// # Arguments
    ///
    /// * `model_bytes` - Safetensors-format model weights
    /// * `vocab_size` - Size of the tokenizer vocabulary
    /// * `config` - Model configuration
    /// * `preference` - Compute device preference (best-effort)
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ModelLoad` if initialization fails. Exhausting
    /// every execution backend is a fatal construction error, not a retry.
    pub fn from_bytes(
        model_bytes: Vec<u8>,
        vocab_size: usize,
        config: CrossEncoderConfig,
        preference: DevicePreference,
    ) -> Result<Self, ScoringError> {
        info!("Loading cross-encoder model '{}'", config.model_id);
        info!(
            "Model bytes length: {} bytes ({:.2}MB)",
            model_bytes.len(),
            model_bytes.len() as f64 / 1_000_000.0
        );

        let device = Self::select_device(preference);
        let (bert, classifier) = Self::create_model(model_bytes, vocab_size, &config, &device)?;

        Ok(Self {
            bert,
            classifier,
            config,
            device,
        })
    }

    /// Returns a reference to the config.
    pub fn config(&self) -> &CrossEncoderConfig {
        &self.config
    }

    /// Returns a reference to the device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Maximum combined token length of a scored pair.
    pub fn max_input_len(&self) -> usize {
        self.config.max_position_embeddings
    }

    /// Selects a compute device, falling back through decreasing levels of
    /// acceleration: CUDA -> Metal -> CPU.
    pub fn select_device(preference: DevicePreference) -> Device {
        if matches!(preference, DevicePreference::Cpu) {
            info!("Using CPU");
            return Device::Cpu;
        }

        if matches!(preference, DevicePreference::Cuda | DevicePreference::Auto) {
            match Device::new_cuda(0) {
                Ok(cuda_device) => {
                    #[cfg(feature = "cudnn")]
                    info!("Using CUDA GPU (with cuDNN)");
                    #[cfg(not(feature = "cudnn"))]
                    info!("Using CUDA GPU");
                    return cuda_device;
                }
                Err(e) => warn!("CUDA unavailable ({e}), trying next backend"),
            }
        }

        match Device::new_metal(0) {
            Ok(metal_device) => {
                info!("Using Metal GPU");
                return metal_device;
            }
            Err(e) => warn!("Metal unavailable ({e}), falling back to CPU"),
        }

        #[cfg(any(target_os = "macos", target_os = "ios"))]
        info!("Using CPU (with Accelerate)");
        #[cfg(not(any(target_os = "macos", target_os = "ios")))]
        info!("Using CPU");

        Device::Cpu
    }

    /// Creates the BERT encoder and classification head from bytes.
    ///
    /// Expects `BertForSequenceClassification` tensor names: the encoder
    /// under `bert.` and the relevance head as `classifier.weight` /
    /// `classifier.bias` with one output.
    pub fn create_model(
        model_bytes: Vec<u8>,
        vocab_size: usize,
        config: &CrossEncoderConfig,
        device: &Device,
    ) -> Result<(BertModel, Linear), ScoringError> {
        info!(
            "Config: {}d hidden, {} layers, {} heads",
            config.hidden_size, config.num_hidden_layers, config.num_attention_heads
        );

        // Candle's bert Config deserializes from a HuggingFace config.json;
        // build the equivalent document from our own configuration.
        let model_config: Config = serde_json::from_value(serde_json::json!({
            "vocab_size": vocab_size,
            "hidden_size": config.hidden_size,
            "num_hidden_layers": config.num_hidden_layers,
            "num_attention_heads": config.num_attention_heads,
            "intermediate_size": config.intermediate_size,
            "hidden_act": "gelu",
            "hidden_dropout_prob": 0.1,
            "max_position_embeddings": config.max_position_embeddings,
            "type_vocab_size": 2,
            "initializer_range": 0.02,
            "layer_norm_eps": 1e-12,
            "pad_token_id": 0,
            "position_embedding_type": "absolute",
            "classifier_dropout": null
        }))
        .map_err(|e| ScoringError::ModelLoad(format!("Failed to build model config: {}", e)))?;

        // Validate safetensors header
        if model_bytes.len() < 8 {
            return Err(ScoringError::ModelLoad("Model file too small".to_string()));
        }

        let header_size = u64::from_le_bytes([
            model_bytes[0],
            model_bytes[1],
            model_bytes[2],
            model_bytes[3],
            model_bytes[4],
            model_bytes[5],
            model_bytes[6],
            model_bytes[7],
        ]);
        info!("Safetensors header size: {} bytes", header_size);

        info!("Loading VarBuilder from safetensors...");
        let vb = VarBuilder::from_buffered_safetensors(model_bytes, DType::F32, device)
            .map_err(|e| ScoringError::ModelLoad(format!("Failed to create VarBuilder: {}", e)))?;
        info!("VarBuilder created successfully");

        info!("Creating BertModel...");
        let bert = BertModel::load(vb.pp("bert"), &model_config)
            .map_err(|e| ScoringError::ModelLoad(format!("Failed to create BertModel: {}", e)))?;

        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))
            .map_err(|e| ScoringError::ModelLoad(format!("Failed to load classifier: {}", e)))?;
        info!("Cross-encoder created successfully");

        Ok((bert, classifier))
    }

    /// Scores a batch of encoded pairs, one logit per pair, input order
    /// preserved.
    ///
    /// Sequences are padded to the batch maximum with the pad token and
    /// masked so padding does not attend.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TensorCreation` or
    /// `ScoringError::InferenceFailed` on failure; the caller must not retry.
    pub fn score_pairs(&self, pairs: &[EncodedPair]) -> Result<Vec<f32>, ScoringError> {
        if pairs.is_empty() {
            return Ok(vec![]);
        }

        let batch_size = pairs.len();
        let max_len = pairs.iter().map(|p| p.ids.len()).max().unwrap_or(0);

        // Pad ids, type ids, and attention mask to the batch maximum.
        let mut ids = Vec::with_capacity(batch_size * max_len);
        let mut type_ids = Vec::with_capacity(batch_size * max_len);
        let mut mask = Vec::with_capacity(batch_size * max_len);
        for pair in pairs {
            let len = pair.ids.len();
            ids.extend_from_slice(&pair.ids);
            ids.extend(std::iter::repeat(0u32).take(max_len - len));
            type_ids.extend_from_slice(&pair.type_ids);
            type_ids.extend(std::iter::repeat(0u32).take(max_len - len));
            mask.extend(std::iter::repeat(1u32).take(len));
            mask.extend(std::iter::repeat(0u32).take(max_len - len));
        }

        let ids = Tensor::from_vec(ids, (batch_size, max_len), &self.device)
            .map_err(|e| ScoringError::TensorCreation(format!("Failed to create tensor: {}", e)))?;
        let type_ids = Tensor::from_vec(type_ids, (batch_size, max_len), &self.device)
            .map_err(|e| ScoringError::TensorCreation(format!("Failed to create tensor: {}", e)))?;
        let mask = Tensor::from_vec(mask, (batch_size, max_len), &self.device)
            .map_err(|e| ScoringError::TensorCreation(format!("Failed to create tensor: {}", e)))?;

        // Forward pass: [batch_size, seq_len] -> [batch_size, seq_len, hidden]
        let hidden = self
            .bert
            .forward(&ids, &type_ids, Some(&mask))
            .map_err(|e| ScoringError::InferenceFailed(format!("Forward pass failed: {}", e)))?;

        // CLS pooling: the first token summarizes the pair.
        let cls = hidden
            .narrow(1, 0, 1)
            .and_then(|t| t.squeeze(1))
            .map_err(|e| ScoringError::InferenceFailed(format!("Failed to pool CLS: {}", e)))?;

        // [batch_size, hidden] -> [batch_size, 1] -> Vec<f32>
        let logits = self
            .classifier
            .forward(&cls)
            .map_err(|e| ScoringError::InferenceFailed(format!("Classifier failed: {}", e)))?;

        logits
            .squeeze(1)
            .and_then(|t| t.to_dtype(DType::F32))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| ScoringError::InferenceFailed(format!("Failed to convert to vec: {}", e)))
    }
}
