//! Adorescore aggregation
//!
//! The overall score is the emotion-weighted sum of the *whole* ranking,
//! scaled to a percentage. The per-topic breakdown reuses the sentiment
//! compound for every selected topic. Ties round to the even neighbour.

use crate::weights::EmotionWeights;
use adorescore_core::{
    Activation, AdorescoreResult, EmotionDetail, EmotionScore, EmotionSummary,
};
use std::collections::BTreeMap;

/// `round(100 * sum(weight(label) * score))` over every ranked emotion
pub fn overall_score(ranking: &[EmotionScore], weights: &EmotionWeights) -> i64 {
    let sum: f64 = ranking
        .iter()
        .map(|e| weights.weight(&e.label) * e.score)
        .sum();
    (100.0 * sum).round_ties_even() as i64
}

/// `round(100 * compound)` for every topic
pub fn topic_breakdown(topics: &[String], compound: f64) -> BTreeMap<String, i64> {
    let value = (100.0 * compound).round_ties_even() as i64;
    topics.iter().map(|topic| (topic.clone(), value)).collect()
}

pub fn adorescore(
    ranking: &[EmotionScore],
    topics: &[String],
    compound: f64,
    weights: &EmotionWeights,
) -> AdorescoreResult {
    AdorescoreResult {
        overall: overall_score(ranking, weights),
        breakdown: topic_breakdown(topics, compound),
    }
}

pub fn activation(score: f64) -> Activation {
    if score > 0.75 {
        Activation::High
    } else if score > 0.5 {
        Activation::Medium
    } else {
        Activation::Low
    }
}

/// Score rounded to two decimals
pub fn intensity(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}

pub fn emotion_detail(emotion: &EmotionScore) -> EmotionDetail {
    EmotionDetail {
        emotion: emotion.label.clone(),
        activation: activation(emotion.score),
        intensity: intensity(emotion.score),
    }
}

/// Primary and secondary emotion, padded with "Unknown"
pub fn summarize_emotions(ranking: &[EmotionScore]) -> EmotionSummary {
    let unknown = EmotionScore::unknown();
    let primary = ranking.first().unwrap_or(&unknown);
    let secondary = ranking.get(1).unwrap_or(&unknown);

    EmotionSummary {
        primary: emotion_detail(primary),
        secondary: emotion_detail(secondary),
    }
}
