//! Model traits and slot identifiers

use adorescore_core::{EmotionScore, PolarityScores, Result, TopicId, ZeroShotOutput};
use async_trait::async_trait;
use std::fmt;

/// Compound polarity scorer
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score the given text
    async fn polarity(&self, text: &str) -> Result<PolarityScores>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Multi-class emotion classifier
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Rank every known emotion for the text, highest score first
    async fn rank(&self, text: &str) -> Result<Vec<EmotionScore>>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Zero-shot classifier over a caller-supplied label set
#[async_trait]
pub trait TopicClassifier: Send + Sync {
    /// Score `candidates` against the text.
    ///
    /// With `multi_label` each candidate is scored independently in [0, 1];
    /// otherwise the scores form a distribution over the candidates.
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
        multi_label: bool,
    ) -> Result<ZeroShotOutput>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Topic-model transform
#[async_trait]
pub trait TopicModel: Send + Sync {
    /// Assign the text to a topic, or [`adorescore_core::NO_TOPIC`]
    async fn transform(&self, text: &str) -> Result<TopicId>;

    /// Representative keywords of a topic, best first
    fn topic_keywords(&self, id: TopicId) -> Option<Vec<(String, f64)>>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// The four model roles loaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSlot {
    Sentiment,
    Emotion,
    TopicClassifier,
    TopicModel,
}

impl ModelSlot {
    pub const ALL: [ModelSlot; 4] = [
        ModelSlot::Sentiment,
        ModelSlot::Emotion,
        ModelSlot::TopicClassifier,
        ModelSlot::TopicModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Emotion => "emotion",
            Self::TopicClassifier => "topic_classifier",
            Self::TopicModel => "topic_model",
        }
    }
}

impl fmt::Display for ModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
