//! Model registry with per-slot readiness
//!
//! Every slot is loaded once at startup. A slot that fails to load is
//! recorded as failed instead of aborting the process; using it later
//! yields [`Error::ModelUnavailable`] and the service reports itself as
//! not ready.

use crate::config::{
    EmotionBackend, ModelsConfig, SentimentBackend, TopicClassifierBackend, TopicModelBackend,
};
use crate::lexicon::{LexiconEmotion, LexiconSentiment, LexiconTopicClassifier};
use crate::model::{EmotionClassifier, ModelSlot, SentimentScorer, TopicClassifier, TopicModel};
use crate::remote::{RemoteEmotionClassifier, RemoteInference, RemoteTopicClassifier};
use crate::topic_model::{load_corpus, KeywordTopicModel};
use adorescore_core::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Load state of one slot, as reported by the readiness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModelStatus {
    Ready { backend: String },
    Failed { reason: String },
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

enum Slot<T: ?Sized> {
    Ready(Arc<T>),
    Failed(String),
}

impl<T: ?Sized> Slot<T> {
    fn from_result(slot: ModelSlot, result: Result<Arc<T>>) -> Self {
        match result {
            Ok(model) => {
                info!("Loaded {} model", slot);
                Self::Ready(model)
            }
            Err(e) => {
                warn!("Failed to load {} model: {}", slot, e);
                Self::Failed(e.to_string())
            }
        }
    }

    fn get(&self, slot: ModelSlot) -> Result<&T> {
        match self {
            Self::Ready(model) => Ok(model.as_ref()),
            Self::Failed(reason) => Err(Error::unavailable(slot.as_str(), reason.clone())),
        }
    }
}

fn not_configured<T: ?Sized>() -> Slot<T> {
    Slot::Failed("no backend configured".to_string())
}

/// The four collaborator models shared by every request
pub struct ModelRegistry {
    sentiment: Slot<dyn SentimentScorer>,
    emotion: Slot<dyn EmotionClassifier>,
    topic_classifier: Slot<dyn TopicClassifier>,
    topic_model: Slot<dyn TopicModel>,
}

impl ModelRegistry {
    /// Load every slot described by `config`
    pub async fn load(config: &ModelsConfig) -> Self {
        info!("Loading models");

        let registry = Self {
            sentiment: Slot::from_result(ModelSlot::Sentiment, load_sentiment(&config.sentiment)),
            emotion: Slot::from_result(ModelSlot::Emotion, load_emotion(&config.emotion).await),
            topic_classifier: Slot::from_result(
                ModelSlot::TopicClassifier,
                load_topic_classifier(&config.topic_classifier),
            ),
            topic_model: Slot::from_result(
                ModelSlot::TopicModel,
                load_topic_model(&config.topic_model),
            ),
        };

        let ready = ModelSlot::ALL
            .iter()
            .filter(|slot| registry.status(**slot).is_ready())
            .count();
        info!("Model registry initialized with {}/{} models", ready, ModelSlot::ALL.len());

        registry
    }

    /// Start building a registry from already constructed models
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    pub fn sentiment(&self) -> Result<&dyn SentimentScorer> {
        self.sentiment.get(ModelSlot::Sentiment)
    }

    pub fn emotion(&self) -> Result<&dyn EmotionClassifier> {
        self.emotion.get(ModelSlot::Emotion)
    }

    pub fn topic_classifier(&self) -> Result<&dyn TopicClassifier> {
        self.topic_classifier.get(ModelSlot::TopicClassifier)
    }

    pub fn topic_model(&self) -> Result<&dyn TopicModel> {
        self.topic_model.get(ModelSlot::TopicModel)
    }

    /// Status of one slot
    pub fn status(&self, slot: ModelSlot) -> ModelStatus {
        fn describe<T: ?Sized>(slot: &Slot<T>, name: impl FnOnce(&T) -> String) -> ModelStatus {
            match slot {
                Slot::Ready(model) => ModelStatus::Ready {
                    backend: name(model.as_ref()),
                },
                Slot::Failed(reason) => ModelStatus::Failed {
                    reason: reason.clone(),
                },
            }
        }

        match slot {
            ModelSlot::Sentiment => describe(&self.sentiment, |m| m.name().to_string()),
            ModelSlot::Emotion => describe(&self.emotion, |m| m.name().to_string()),
            ModelSlot::TopicClassifier => {
                describe(&self.topic_classifier, |m| m.name().to_string())
            }
            ModelSlot::TopicModel => describe(&self.topic_model, |m| m.name().to_string()),
        }
    }

    /// Status of every slot keyed by slot name
    pub fn statuses(&self) -> BTreeMap<&'static str, ModelStatus> {
        ModelSlot::ALL
            .iter()
            .map(|slot| (slot.as_str(), self.status(*slot)))
            .collect()
    }

    /// True when every slot loaded
    pub fn is_ready(&self) -> bool {
        ModelSlot::ALL.iter().all(|slot| self.status(*slot).is_ready())
    }
}

/// Builder for registries assembled in code
#[derive(Default)]
pub struct ModelRegistryBuilder {
    sentiment: Option<Arc<dyn SentimentScorer>>,
    emotion: Option<Arc<dyn EmotionClassifier>>,
    topic_classifier: Option<Arc<dyn TopicClassifier>>,
    topic_model: Option<Arc<dyn TopicModel>>,
}

impl ModelRegistryBuilder {
    pub fn sentiment(mut self, model: Arc<dyn SentimentScorer>) -> Self {
        self.sentiment = Some(model);
        self
    }

    pub fn emotion(mut self, model: Arc<dyn EmotionClassifier>) -> Self {
        self.emotion = Some(model);
        self
    }

    pub fn topic_classifier(mut self, model: Arc<dyn TopicClassifier>) -> Self {
        self.topic_classifier = Some(model);
        self
    }

    pub fn topic_model(mut self, model: Arc<dyn TopicModel>) -> Self {
        self.topic_model = Some(model);
        self
    }

    /// Build the registry. Slots left unset are reported as failed.
    pub fn build(self) -> ModelRegistry {
        ModelRegistry {
            sentiment: self.sentiment.map_or_else(not_configured, Slot::Ready),
            emotion: self.emotion.map_or_else(not_configured, Slot::Ready),
            topic_classifier: self.topic_classifier.map_or_else(not_configured, Slot::Ready),
            topic_model: self.topic_model.map_or_else(not_configured, Slot::Ready),
        }
    }
}

fn load_sentiment(backend: &SentimentBackend) -> Result<Arc<dyn SentimentScorer>> {
    match backend {
        SentimentBackend::Lexicon => Ok(Arc::new(LexiconSentiment::new())),
    }
}

async fn load_emotion(backend: &EmotionBackend) -> Result<Arc<dyn EmotionClassifier>> {
    match backend {
        EmotionBackend::Lexicon => Ok(Arc::new(LexiconEmotion::new()?)),
        EmotionBackend::Remote(spec) => {
            let inner = RemoteInference::from_spec("emotion-remote", spec)?;
            Ok(Arc::new(RemoteEmotionClassifier::new(inner)))
        }
        #[cfg(feature = "ml-models")]
        EmotionBackend::Bert(spec) => {
            let spec = spec.clone();
            let model = tokio::task::spawn_blocking(move || {
                crate::bert::BertEmotionClassifier::load(&spec)
            })
            .await
            .map_err(|e| Error::internal(format!("Model loading task failed: {}", e)))??;
            Ok(Arc::new(model))
        }
    }
}

fn load_topic_classifier(backend: &TopicClassifierBackend) -> Result<Arc<dyn TopicClassifier>> {
    match backend {
        TopicClassifierBackend::Lexicon => Ok(Arc::new(LexiconTopicClassifier::new()?)),
        TopicClassifierBackend::Remote(spec) => {
            let inner = RemoteInference::from_spec("topic-remote", spec)?;
            Ok(Arc::new(RemoteTopicClassifier::new(inner)))
        }
    }
}

/// The corpus refit is best effort: a missing or unusable corpus leaves
/// the built-in topics in place.
fn load_topic_model(backend: &TopicModelBackend) -> Result<Arc<dyn TopicModel>> {
    match backend {
        TopicModelBackend::Keyword { corpus, top_n } => {
            let mut model = KeywordTopicModel::new().with_top_n(*top_n);

            if let Some(path) = corpus {
                match load_corpus(path).and_then(|documents| model.fit(&documents)) {
                    Ok(()) => info!("Topic model refitted on {}", path.display()),
                    Err(e) => warn!(
                        "Topic model refit on {} failed, keeping default topics: {}",
                        path.display(),
                        e
                    ),
                }
            }

            Ok(Arc::new(model))
        }
    }
}
