//! Candle BERT emotion classifier
//!
//! Loads a BERT sequence-classification checkpoint (`config.json`,
//! `tokenizer.json`, `model.safetensors`) from disk or the Hugging Face Hub
//! and ranks its labels by softmax probability.

use crate::model::EmotionClassifier;
use adorescore_core::{EmotionScore, Error, Result};
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

const MODEL_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// Where the checkpoint lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BertSource {
    /// Directory on the local filesystem
    Local { path: PathBuf },

    /// Download from Hugging Face Hub
    HuggingFace {
        repo: String,
        #[serde(default = "default_revision")]
        revision: String,
    },
}

fn default_revision() -> String {
    "main".to_string()
}

/// Settings for the BERT emotion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BertSpec {
    pub source: BertSource,

    /// Maximum token sequence length
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    512
}

/// Classification head fields not covered by the encoder config
#[derive(Debug, Deserialize)]
struct HeadConfig {
    hidden_size: usize,
    id2label: HashMap<String, String>,
}

struct BertInner {
    tokenizer: Tokenizer,
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    labels: Vec<String>,
    device: Device,
}

/// BERT emotion classifier running on CPU
pub struct BertEmotionClassifier {
    name: String,
    inner: Arc<BertInner>,
}

impl BertEmotionClassifier {
    /// Load the checkpoint described by `spec`. Blocks on file IO and
    /// downloads, so call it from a blocking context.
    pub fn load(spec: &BertSpec) -> Result<Self> {
        let model_dir = resolve_model_dir(&spec.source)?;
        let device = Device::Cpu;

        let mut tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| Error::model(format!("Failed to load tokenizer: {}", e)))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: spec.max_length,
                ..Default::default()
            }))
            .map_err(|e| Error::model(format!("Failed to configure truncation: {}", e)))?;

        let config_text = std::fs::read_to_string(model_dir.join("config.json"))?;
        let bert_config: BertConfig = serde_json::from_str(&config_text)
            .map_err(|e| Error::model(format!("Failed to parse config: {}", e)))?;
        let head: HeadConfig = serde_json::from_str(&config_text)
            .map_err(|e| Error::model(format!("Failed to parse label map: {}", e)))?;

        let labels = ordered_labels(&head.id2label)?;

        let weights_path = model_dir.join("model.safetensors");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| Error::model(format!("Failed to load weights: {}", e)))?
        };

        let model = BertModel::load(vb.clone(), &bert_config)
            .map_err(|e| Error::model(format!("Failed to load BERT model: {}", e)))?;
        let pooler = candle_nn::linear(head.hidden_size, head.hidden_size, vb.pp("bert.pooler.dense"))
            .map_err(|e| Error::model(format!("Failed to load pooler: {}", e)))?;
        let classifier = candle_nn::linear(head.hidden_size, labels.len(), vb.pp("classifier"))
            .map_err(|e| Error::model(format!("Failed to load classifier head: {}", e)))?;

        info!(
            "Loaded BERT emotion classifier with {} labels from {}",
            labels.len(),
            model_dir.display()
        );

        Ok(Self {
            name: "emotion-bert".to_string(),
            inner: Arc::new(BertInner {
                tokenizer,
                model,
                pooler,
                classifier,
                labels,
                device,
            }),
        })
    }
}

impl BertInner {
    fn rank(&self, text: &str) -> Result<Vec<EmotionScore>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::model(format!("Tokenization failed: {}", e)))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::model(format!("Failed to create input tensor: {}", e)))?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::model(format!("Failed to create token type tensor: {}", e)))?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::model(format!("Failed to create attention mask: {}", e)))?;

        let probs = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .and_then(|hidden| hidden.i((.., 0)))
            .and_then(|cls| self.pooler.forward(&cls))
            .and_then(|pooled| pooled.tanh())
            .and_then(|pooled| self.classifier.forward(&pooled))
            .and_then(|logits| candle_nn::ops::softmax(&logits, D::Minus1))
            .and_then(|probs| probs.squeeze(0))
            .and_then(|probs| probs.to_vec1::<f32>())
            .map_err(|e| Error::model(format!("Model forward pass failed: {}", e)))?;

        let mut ranking: Vec<EmotionScore> = self
            .labels
            .iter()
            .zip(probs)
            .map(|(label, p)| EmotionScore::new(label.clone(), f64::from(p)))
            .collect();
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranking)
    }
}

#[async_trait::async_trait]
impl EmotionClassifier for BertEmotionClassifier {
    async fn rank(&self, text: &str) -> Result<Vec<EmotionScore>> {
        let start = Instant::now();
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        let ranking = tokio::task::spawn_blocking(move || inner.rank(&text))
            .await
            .map_err(|e| Error::internal(format!("Inference task failed: {}", e)))??;

        debug!("BERT emotion inference took {}us", start.elapsed().as_micros());
        Ok(ranking)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Labels ordered by their numeric id
fn ordered_labels(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
    let mut indexed = id2label
        .iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label.clone()))
                .map_err(|_| Error::model(format!("Invalid label id '{}'", id)))
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(id, _)| *id);

    if indexed.iter().enumerate().any(|(expected, (id, _))| expected != *id) {
        return Err(Error::model("Label ids are not contiguous from 0"));
    }
    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

fn resolve_model_dir(source: &BertSource) -> Result<PathBuf> {
    match source {
        BertSource::Local { path } => {
            for file in MODEL_FILES {
                if !path.join(file).exists() {
                    return Err(Error::model(format!(
                        "Model file missing: {}",
                        path.join(file).display()
                    )));
                }
            }
            Ok(path.clone())
        }
        BertSource::HuggingFace { repo, revision } => download(repo, revision),
    }
}

fn download(repo: &str, revision: &str) -> Result<PathBuf> {
    info!("Downloading model from HuggingFace: {} @ {}", repo, revision);

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adorescore/models");
    let api = hf_hub::api::sync::ApiBuilder::new()
        .with_cache_dir(cache_dir)
        .build()
        .map_err(|e| Error::model(format!("Failed to initialize HuggingFace API: {}", e)))?;
    let repo = api.repo(hf_hub::Repo::with_revision(
        repo.to_string(),
        hf_hub::RepoType::Model,
        revision.to_string(),
    ));

    let mut model_dir: Option<PathBuf> = None;
    for file in MODEL_FILES {
        let path = repo
            .get(file)
            .map_err(|e| Error::model(format!("Failed to download {}: {}", file, e)))?;
        model_dir = path.parent().map(Path::to_path_buf);
    }

    model_dir.ok_or_else(|| Error::model("Invalid cache path"))
}
