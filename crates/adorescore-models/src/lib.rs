//! Adorescore Models
//!
//! The four collaborator models behind the analysis endpoint:
//! - Sentiment scorer (compound polarity)
//! - Emotion classifier (ranked labels)
//! - Zero-shot topic classifier
//! - Topic-model transform
//!
//! Each model is reached through a trait. Lexicon backends work out of the
//! box; remote inference endpoints and (with the `ml-models` feature) a
//! local Candle BERT emotion model can be selected in `models.yaml`.

#[cfg(feature = "ml-models")]
pub mod bert;
pub mod config;
pub mod lexicon;
pub mod model;
pub mod registry;
pub mod remote;
pub mod topic_model;

pub use config::{
    EmotionBackend, ModelsConfig, SentimentBackend, TopicClassifierBackend, TopicModelBackend,
};
pub use lexicon::{LexiconEmotion, LexiconSentiment, LexiconTopicClassifier};
pub use model::{EmotionClassifier, ModelSlot, SentimentScorer, TopicClassifier, TopicModel};
pub use registry::{ModelRegistry, ModelRegistryBuilder, ModelStatus};
pub use remote::{RemoteEmotionClassifier, RemoteInference, RemoteSpec, RemoteTopicClassifier};
pub use topic_model::{load_corpus, CorpusDocument, KeywordTopicModel, Topic};

#[cfg(feature = "ml-models")]
pub use bert::{BertEmotionClassifier, BertSource, BertSpec};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::model::{EmotionClassifier, SentimentScorer, TopicClassifier, TopicModel};
    pub use crate::registry::{ModelRegistry, ModelStatus};
    pub use crate::ModelsConfig;
}
