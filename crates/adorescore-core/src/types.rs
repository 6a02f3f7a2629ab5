//! Core types for Adorescore

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used when the emotion ranking is too short to fill a slot
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Topic id the topic model returns when a document matches no topic
pub const NO_TOPIC: TopicId = -1;

/// Identifier of a topic-model cluster
pub type TopicId = i64;

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text review
    pub text: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One entry of an emotion classifier's ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    /// Emotion label as returned by the model
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Placeholder for a missing primary or secondary emotion
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LABEL, 0.0)
    }
}

/// Lexical sentiment signals for one text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,

    /// Combined polarity in [-1, 1]
    pub compound: f64,
}

/// Output of a zero-shot topic classifier
///
/// `labels` and `scores` are parallel and sorted by descending score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZeroShotOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl ZeroShotOutput {
    /// Build from unordered `(label, score)` pairs, sorting by score
    pub fn from_pairs(mut pairs: Vec<(String, f64)>) -> Self {
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        let (labels, scores) = pairs.into_iter().unzip();
        Self { labels, scores }
    }

    /// Iterate `(label, score)` pairs in ranked order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

/// Arousal bucket for a displayed emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    High,
    Medium,
    Low,
}

/// A displayed emotion with its activation and rounded intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionDetail {
    pub emotion: String,
    pub activation: Activation,
    pub intensity: f64,
}

/// Primary and secondary emotion of a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    pub primary: EmotionDetail,
    pub secondary: EmotionDetail,
}

/// Selected main topics and their subtopic keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub main: Vec<String>,
    pub subtopics: BTreeMap<String, Vec<String>>,
}

/// Composite score and its per-topic breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdorescoreResult {
    pub overall: i64,
    pub breakdown: BTreeMap<String, i64>,
}

/// Successful response of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub emotions: EmotionSummary,
    pub topics: TopicSummary,
    pub adorescore: AdorescoreResult,
}
