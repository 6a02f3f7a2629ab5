//! Model configuration
//!
//! `models.yaml` names one backend per slot. Every field has a default, so
//! an empty file (or no file) selects the lexicon backends.
//!
//! ```yaml
//! emotion:
//!   backend: remote
//!   url: https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base
//!   token_env: HF_TOKEN
//! topic_model:
//!   backend: keyword
//!   corpus: data/topics.csv
//! ```

use crate::remote::RemoteSpec;
use crate::topic_model::DEFAULT_TOP_N;
use adorescore_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(feature = "ml-models")]
use crate::bert::BertSpec;

/// Backend choice for every model slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub sentiment: SentimentBackend,

    #[serde(default)]
    pub emotion: EmotionBackend,

    #[serde(default)]
    pub topic_classifier: TopicClassifierBackend,

    #[serde(default)]
    pub topic_model: TopicModelBackend,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SentimentBackend {
    #[default]
    Lexicon,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum EmotionBackend {
    #[default]
    Lexicon,

    /// Hugging Face style text-classification endpoint
    Remote(RemoteSpec),

    /// Local Candle BERT checkpoint
    #[cfg(feature = "ml-models")]
    Bert(BertSpec),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum TopicClassifierBackend {
    #[default]
    Lexicon,

    /// Hugging Face style zero-shot endpoint
    Remote(RemoteSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum TopicModelBackend {
    Keyword {
        /// CSV corpus the model is refitted on at startup
        #[serde(default)]
        corpus: Option<PathBuf>,

        /// Keywords kept per topic
        #[serde(default = "default_top_n")]
        top_n: usize,
    },
}

impl Default for TopicModelBackend {
    fn default() -> Self {
        Self::Keyword {
            corpus: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl ModelsConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid models config: {}", e)))
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Corpus path of the topic model, if any
    pub fn corpus_path(&self) -> Option<&Path> {
        match &self.topic_model {
            TopicModelBackend::Keyword { corpus, .. } => corpus.as_deref(),
        }
    }
}
