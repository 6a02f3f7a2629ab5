//! Review analysis pipeline

use crate::aggregate::{adorescore, summarize_emotions};
use crate::topics::{assemble_subtopics, select_topics, subtopic_label, TOPIC_CANDIDATES};
use crate::weights::EmotionWeights;
use adorescore_core::text::{normalize, truncate_chars, EMOTION_INPUT_LIMIT};
use adorescore_core::{AnalysisResponse, Result, TopicSummary};
use adorescore_models::ModelRegistry;
use std::time::Instant;
use tracing::debug;

/// Runs one review through every model and aggregates the outputs.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Analyzer {
    models: ModelRegistry,
    weights: EmotionWeights,
}

impl Analyzer {
    pub fn new(models: ModelRegistry) -> Self {
        Self {
            models,
            weights: EmotionWeights::new(),
        }
    }

    /// Replace the emotion weight table
    pub fn with_weights(mut self, weights: EmotionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn weights(&self) -> &EmotionWeights {
        &self.weights
    }

    /// Analyze one review. Any model failure aborts the whole analysis.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResponse> {
        let start = Instant::now();
        let cleaned = normalize(text);

        let polarity = self.models.sentiment()?.polarity(&cleaned).await?;

        let ranking = self
            .models
            .emotion()?
            .rank(truncate_chars(&cleaned, EMOTION_INPUT_LIMIT))
            .await?;

        let zero_shot = self
            .models
            .topic_classifier()?
            .classify(&cleaned, &TOPIC_CANDIDATES, true)
            .await?;
        let main = select_topics(&zero_shot);

        let topic_model = self.models.topic_model()?;
        let topic_id = topic_model.transform(&cleaned).await?;
        let subtopic = subtopic_label(topic_id, topic_model.topic_keywords(topic_id));

        let response = AnalysisResponse {
            emotions: summarize_emotions(&ranking),
            adorescore: adorescore(&ranking, &main, polarity.compound, &self.weights),
            topics: TopicSummary {
                subtopics: assemble_subtopics(&main, &subtopic),
                main,
            },
        };

        debug!(
            overall = response.adorescore.overall,
            topics = response.topics.main.len(),
            "Analysis completed in {}us",
            start.elapsed().as_micros()
        );

        Ok(response)
    }
}
