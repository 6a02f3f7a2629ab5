//! Keyword emotion classifier
//!
//! Covers Plutchik's eight basic emotions plus "neutral". Each emotion
//! gets `hits / (total_hits + 1)` and neutral keeps the remaining
//! `1 / (total_hits + 1)`, so the ranking always sums to one.

use super::KeywordMatcher;
use crate::model::EmotionClassifier;
use adorescore_core::{EmotionScore, Result};

const NEUTRAL: &str = "neutral";

const EMOTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "anger",
        &[
            "angry", "anger", "furious", "mad", "annoy", "outrage", "rude", "ridiculous",
            "unacceptable", "infuriat", "irritat", "hate",
        ],
    ),
    (
        "anticipation",
        &[
            "expect", "hope", "looking forward", "eager", "can t wait", "cant wait",
            "waiting", "soon", "excited", "anticipat",
        ],
    ),
    (
        "disgust",
        &[
            "disgust", "gross", "awful", "terrible", "nasty", "junk", "garbage", "horrible",
            "poor quality", "cheaply made", "trash", "filthy", "smell",
        ],
    ),
    (
        "fear",
        &[
            "afraid", "scared", "worried", "worry", "fear", "dangerous", "unsafe", "concern",
            "nervous", "anxious", "risk", "scam",
        ],
    ),
    (
        "joy",
        &[
            "happy", "love", "great", "excellent", "amazing", "glad", "perfect", "awesome",
            "wonderful", "delight", "enjoy", "good", "best", "fantastic", "pleased", "nice",
            "beautiful",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "disappoint", "broke", "unhappy", "regret", "unfortunate", "sorry",
            "upset", "waste", "miss", "lost", "heartbroken",
        ],
    ),
    (
        "surprise",
        &[
            "surpris", "wow", "unexpected", "shock", "amazed", "can t believe",
            "cant believe", "astonish", "suddenly",
        ],
    ),
    (
        "trust",
        &[
            "reliable", "trust", "recommend", "durable", "sturdy", "genuine", "authentic",
            "dependable", "honest", "solid", "as described", "legit",
        ],
    ),
];

/// Lexicon-based emotion classifier
pub struct LexiconEmotion {
    name: String,
    matchers: Vec<(&'static str, KeywordMatcher)>,
}

impl LexiconEmotion {
    pub fn new() -> Result<Self> {
        Self::with_name("emotion-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        let matchers = EMOTION_KEYWORDS
            .iter()
            .map(|(label, keywords)| Ok((*label, KeywordMatcher::new(label, keywords)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            matchers,
        })
    }

    /// Rank emotions synchronously
    pub fn rank_text(&self, text: &str) -> Vec<EmotionScore> {
        if text.split_whitespace().next().is_none() {
            return Vec::new();
        }

        let hits: Vec<(&str, usize)> = self
            .matchers
            .iter()
            .map(|(label, matcher)| (*label, matcher.hits(text)))
            .collect();
        let total = hits.iter().map(|(_, h)| h).sum::<usize>() as f64 + 1.0;

        let mut ranking: Vec<EmotionScore> = hits
            .into_iter()
            .map(|(label, h)| EmotionScore::new(label, h as f64 / total))
            .chain(std::iter::once(EmotionScore::new(NEUTRAL, 1.0 / total)))
            .collect();

        // Stable sort keeps the table order for ties.
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranking
    }
}

#[async_trait::async_trait]
impl EmotionClassifier for LexiconEmotion {
    async fn rank(&self, text: &str) -> Result<Vec<EmotionScore>> {
        Ok(self.rank_text(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adorescore_core::text::normalize;

    #[tokio::test]
    async fn test_emotion_empty_text_yields_empty_ranking() {
        let classifier = LexiconEmotion::new().unwrap();
        assert!(classifier.rank("").await.unwrap().is_empty());
        assert!(classifier.rank("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_emotion_no_hits_is_neutral() {
        let classifier = LexiconEmotion::new().unwrap();
        let ranking = classifier.rank("the box is blue").await.unwrap();
        assert_eq!(ranking[0], EmotionScore::new("neutral", 1.0));
        assert_eq!(ranking.len(), EMOTION_KEYWORDS.len() + 1);
    }

    #[tokio::test]
    async fn test_emotion_joy_ranks_first() {
        let classifier = LexiconEmotion::new().unwrap();
        let ranking = classifier
            .rank("i love it great quality happy customer")
            .await
            .unwrap();
        assert_eq!(ranking[0].label, "joy");
        assert!((ranking[0].score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_emotion_scores_sum_to_one() {
        let classifier = LexiconEmotion::new().unwrap();
        let ranking = classifier.rank_text("broke immediately terrible quality");
        let sum: f64 = ranking.iter().map(|e| e.score).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_emotion_matches_normalized_contractions() {
        let classifier = LexiconEmotion::new().unwrap();
        let ranking = classifier.rank_text(&normalize("I can't wait for the next one"));
        assert_eq!(ranking[0].label, "anticipation");

        let ranking = classifier.rank_text(&normalize("Can't believe it!"));
        assert_eq!(ranking[0].label, "surprise");
    }
}
