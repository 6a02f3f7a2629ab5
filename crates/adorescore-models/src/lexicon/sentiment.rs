//! Valence-lexicon sentiment scorer
//!
//! Token valences are summed with negation and booster handling, a
//! contrastive "but" weighting, and exclamation emphasis, then squashed
//! into a compound score with `x / sqrt(x^2 + alpha)`.

use crate::model::SentimentScorer;
use adorescore_core::{PolarityScores, Result};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Normalization constant approximating the max expected valence sum
const ALPHA: f64 = 15.0;

/// Scalar applied to a valence preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Increment for booster words such as "very"
const BOOSTER_INCR: f64 = 0.293;

/// Emphasis added per exclamation mark, capped at four marks
const EXCLAMATION_INCR: f64 = 0.292;

/// How many preceding tokens are searched for a negation
const NEGATION_WINDOW: usize = 3;

static VALENCES: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        // positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 3.2),
        ("amazing", 2.8),
        ("awesome", 3.1),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("perfect", 2.7),
        ("perfectly", 2.7),
        ("love", 3.2),
        ("loved", 2.9),
        ("loves", 2.7),
        ("like", 1.5),
        ("liked", 1.8),
        ("nice", 1.8),
        ("happy", 2.7),
        ("glad", 2.0),
        ("pleased", 1.9),
        ("satisfied", 1.8),
        ("recommend", 1.5),
        ("recommended", 1.6),
        ("best", 3.2),
        ("better", 1.9),
        ("beautiful", 2.9),
        ("comfortable", 1.5),
        ("fast", 1.1),
        ("quick", 1.1),
        ("quickly", 1.0),
        ("easy", 1.9),
        ("helpful", 1.8),
        ("reliable", 1.6),
        ("sturdy", 1.4),
        ("durable", 1.4),
        ("worth", 0.9),
        ("fine", 0.8),
        ("enjoy", 2.2),
        ("enjoyed", 2.3),
        ("delighted", 2.9),
        ("impressed", 2.1),
        ("thank", 1.5),
        ("thanks", 1.9),
        ("superb", 3.1),
        ("fabulous", 2.4),
        ("delicious", 2.7),
        ("trust", 2.3),
        ("fun", 2.3),
        ("win", 2.8),
        ("yay", 2.4),
        ("wow", 2.8),
        // negative
        ("bad", -2.5),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("worst", -3.1),
        ("worse", -2.1),
        ("poor", -2.1),
        ("poorly", -1.9),
        ("hate", -2.7),
        ("hated", -3.2),
        ("disappointed", -1.9),
        ("disappointing", -2.2),
        ("disappointment", -2.3),
        ("broke", -1.8),
        ("broken", -2.1),
        ("break", -0.9),
        ("damaged", -2.2),
        ("defective", -1.9),
        ("faulty", -1.8),
        ("useless", -1.8),
        ("waste", -1.8),
        ("junk", -1.8),
        ("garbage", -1.9),
        ("fake", -2.1),
        ("scam", -2.6),
        ("fraud", -2.8),
        ("refund", -0.3),
        ("wrong", -2.1),
        ("late", -0.5),
        ("slow", -0.8),
        ("delay", -1.3),
        ("delayed", -1.3),
        ("problem", -1.7),
        ("problems", -1.7),
        ("issue", -0.6),
        ("issues", -0.6),
        ("angry", -2.3),
        ("annoyed", -1.6),
        ("annoying", -1.9),
        ("frustrated", -2.4),
        ("frustrating", -1.9),
        ("sad", -2.1),
        ("unhappy", -1.8),
        ("upset", -1.6),
        ("fail", -2.5),
        ("failed", -2.3),
        ("flimsy", -1.4),
        ("cheap", -0.5),
        ("cheaply", -1.0),
        ("ripped", -1.2),
        ("torn", -1.2),
        ("expensive", -0.9),
        ("overpriced", -1.7),
        ("rude", -2.0),
        ("unacceptable", -2.0),
        ("avoid", -1.2),
        ("never", -0.4),
        ("fear", -2.2),
        ("afraid", -2.2),
        ("disgusting", -2.4),
        ("gross", -2.1),
        ("lost", -1.3),
        ("missing", -1.2),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "not", "no", "never", "none", "nothing", "nor", "neither", "nobody", "without",
        "cannot", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont",
        "wouldnt", "shouldnt", "couldnt", "cant", "hardly", "rarely", "aint",
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("very", BOOSTER_INCR),
        ("really", BOOSTER_INCR),
        ("extremely", BOOSTER_INCR),
        ("absolutely", BOOSTER_INCR),
        ("totally", BOOSTER_INCR),
        ("completely", BOOSTER_INCR),
        ("incredibly", BOOSTER_INCR),
        ("so", BOOSTER_INCR),
        ("super", BOOSTER_INCR),
        ("highly", BOOSTER_INCR),
        ("most", BOOSTER_INCR),
        ("slightly", -BOOSTER_INCR),
        ("somewhat", -BOOSTER_INCR),
        ("barely", -BOOSTER_INCR),
        ("kinda", -BOOSTER_INCR),
        ("marginally", -BOOSTER_INCR),
        ("partly", -BOOSTER_INCR),
    ]
    .into_iter()
    .collect()
});

/// Lexicon-based compound sentiment scorer
pub struct LexiconSentiment {
    name: String,
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self::with_name("sentiment-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Score text synchronously
    pub fn score(&self, text: &str) -> PolarityScores {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '_')
                    .to_lowercase()
                    .replace('\'', "")
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut valences = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let Some(&base) = VALENCES.get(word.as_str()) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            if i > 0 {
                if let Some(&incr) = BOOSTERS.get(words[i - 1].as_str()) {
                    valence += incr * valence.signum();
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if words[window_start..i]
                .iter()
                .any(|w| NEGATIONS.contains(w.as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            valences.push(valence);
        }

        // Clauses after "but" dominate the clause before it.
        if let Some(but_idx) = words.iter().position(|w| w == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < but_idx {
                    *v *= 0.5;
                } else if i > but_idx {
                    *v *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        let exclamations = text.matches('!').count().min(4) as f64;
        if sum > 0.0 {
            sum += exclamations * EXCLAMATION_INCR;
        } else if sum < 0.0 {
            sum -= exclamations * EXCLAMATION_INCR;
        }

        let compound = if sum == 0.0 {
            0.0
        } else {
            (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
        };

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total == 0.0 {
            return PolarityScores {
                neg: 0.0,
                neu: 0.0,
                pos: 0.0,
                compound,
            };
        }

        PolarityScores {
            neg: neg_sum.abs() / total,
            neu: neu_count / total,
            pos: pos_sum / total,
            compound,
        }
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SentimentScorer for LexiconSentiment {
    async fn polarity(&self, text: &str) -> Result<PolarityScores> {
        Ok(self.score(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
