//! Keyword zero-shot topic classifier
//!
//! Each known topic label owns a keyword list. In multi-label mode a topic
//! scores `1 - exp(-hits)`, so a single hit clears the 0.5 selection line.
//! Labels without a keyword list score zero.

use super::KeywordMatcher;
use crate::model::TopicClassifier;
use adorescore_core::{Result, ZeroShotOutput};
use std::collections::HashMap;

const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Product Quality",
        &[
            "quality", "well made", "poorly made", "cheaply made", "flimsy", "material",
            "craftsmanship", "build",
        ],
    ),
    (
        "Durability",
        &[
            "durab", "broke", "fell apart", "falling apart", "lasted", "last long",
            "wear out", "wore out", "sturdy", "tear", "ripped", "after a week",
            "after a month",
        ],
    ),
    (
        "Defective Item",
        &[
            "defect", "broke", "broken", "faulty", "doesn t work", "doesnt work",
            "does not work", "stopped working", "not working", "malfunction", "dead on arrival",
            "dud",
        ],
    ),
    (
        "Wrong Item Sent",
        &[
            "wrong item", "wrong size", "wrong color", "wrong colour", "not what i ordered",
            "different item", "sent the wrong", "received the wrong", "wrong product",
        ],
    ),
    (
        "Packaging Issue",
        &["packag", "box", "wrapped", "wrapping", "seal", "crushed", "bubble wrap"],
    ),
    (
        "Late Delivery",
        &[
            "late", "delay", "took forever", "took weeks", "still waiting", "never arrived",
            "never came", "slow shipping", "slow delivery",
        ],
    ),
    (
        "Fast Delivery",
        &[
            "fast delivery", "fast shipping", "quick delivery", "quick shipping",
            "arrived early", "arrived quickly", "next day", "ahead of schedule", "promptly",
        ],
    ),
    (
        "Damaged During Shipping",
        &[
            "damaged", "arrived broken", "dented", "scratched", "smashed", "cracked",
            "crushed in transit", "shattered",
        ],
    ),
    (
        "Customer Support Response",
        &[
            "customer service", "customer support", "support team", "support", "agent",
            "representative", "no response", "responded", "helpline", "contacted",
        ],
    ),
    (
        "Refund & Returns",
        &["refund", "return", "money back", "reimburs", "send it back", "sent it back"],
    ),
    (
        "Replacement Process",
        &["replacement", "replace", "exchange", "swap", "new one sent"],
    ),
    (
        "Expensive Product",
        &[
            "expensive", "overpriced", "pricey", "too much money", "costly", "rip off",
            "ripoff", "not worth the price",
        ],
    ),
    (
        "Discounts & Deals",
        &[
            "discount", "deal", "sale", "coupon", "promo", "offer", "bargain", "cheaper",
        ],
    ),
    (
        "Value for Money",
        &[
            "value for money", "worth the money", "worth the price", "worth it",
            "good value", "great value", "affordable", "for the price", "bang for",
        ],
    ),
    (
        "Website Usability",
        &[
            "website", "site", "the app", "mobile app", "checkout", "navigate", "navigation", "login",
            "search", "interface", "ordering process",
        ],
    ),
    (
        "Trust in Brand",
        &["brand", "trust", "reliable", "reputation", "loyal", "company", "seller"],
    ),
    (
        "Fake or Counterfeit Product",
        &["fake", "counterfeit", "knockoff", "knock off", "not genuine", "not authentic", "replica"],
    ),
    (
        "Delivery",
        &["deliver", "shipping", "shipped", "courier", "arrived", "arrival", "package"],
    ),
    (
        "Quality",
        &["quality", "well made", "poorly made", "material", "fabric", "finish"],
    ),
    (
        "Clothes",
        &[
            "shirt", "dress", "pants", "jeans", "jacket", "shoe", "size", "fit", "fabric",
            "sleeve", "clothes", "clothing", "wear", "sock", "sweater", "coat",
        ],
    ),
];

/// Lexicon-based zero-shot topic classifier
pub struct LexiconTopicClassifier {
    name: String,
    matchers: HashMap<&'static str, KeywordMatcher>,
}

impl LexiconTopicClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("topic-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        let matchers = TOPIC_KEYWORDS
            .iter()
            .map(|(label, keywords)| Ok((*label, KeywordMatcher::new(label, keywords)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            name: name.into(),
            matchers,
        })
    }

    /// Labels this classifier has keywords for
    pub fn known_labels(&self) -> impl Iterator<Item = &str> {
        TOPIC_KEYWORDS.iter().map(|(label, _)| *label)
    }

    /// Score candidates synchronously
    pub fn score(&self, text: &str, candidates: &[&str], multi_label: bool) -> ZeroShotOutput {
        let raw: Vec<(String, f64)> = candidates
            .iter()
            .map(|candidate| {
                let hits = self
                    .matchers
                    .get(*candidate)
                    .map_or(0, |matcher| matcher.hits(text));
                (candidate.to_string(), 1.0 - (-(hits as f64)).exp())
            })
            .collect();

        if multi_label || raw.is_empty() {
            return ZeroShotOutput::from_pairs(raw);
        }

        let total: f64 = raw.iter().map(|(_, s)| s).sum();
        let uniform = 1.0 / raw.len() as f64;
        let normalized = raw
            .into_iter()
            .map(|(label, s)| {
                let p = if total > 0.0 { s / total } else { uniform };
                (label, p)
            })
            .collect();
        ZeroShotOutput::from_pairs(normalized)
    }
}

#[async_trait::async_trait]
impl TopicClassifier for LexiconTopicClassifier {
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
        multi_label: bool,
    ) -> Result<ZeroShotOutput> {
        Ok(self.score(text, candidates, multi_label))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adorescore_core::text::normalize;

    const CANDIDATES: &[&str] = &["Product Quality", "Defective Item", "Durability", "Delivery"];

    #[tokio::test]
    async fn test_topics_multi_label() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        let output = classifier
            .classify("this product broke immediately terrible quality", CANDIDATES, true)
            .await
            .unwrap();

        let selected: Vec<&str> = output
            .iter()
            .filter(|(_, s)| *s > 0.5)
            .map(|(l, _)| l)
            .collect();
        assert!(selected.contains(&"Product Quality"));
        assert!(selected.contains(&"Defective Item"));
        assert!(selected.contains(&"Durability"));
        assert!(!selected.contains(&"Delivery"));
    }

    #[test]
    fn test_topics_single_label_sums_to_one() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        let output = classifier.score("arrived late and broken", CANDIDATES, false);
        let sum: f64 = output.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_topics_single_label_no_hits_is_uniform() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        let output = classifier.score("blue", CANDIDATES, false);
        assert!(output.scores.iter().all(|s| (s - 0.25).abs() < 1e-9));
    }

    #[test]
    fn test_unknown_candidate_scores_zero() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        let output = classifier.score("quality", &["Weather"], true);
        assert_eq!(output.scores, vec![0.0]);
    }

    #[test]
    fn test_keyword_table_covers_twenty_topics() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        assert_eq!(classifier.known_labels().count(), 20);
    }

    #[tokio::test]
    async fn test_topics_match_normalized_contractions() {
        let classifier = LexiconTopicClassifier::new().unwrap();
        let output = classifier
            .classify(&normalize("It doesn't work at all"), CANDIDATES, true)
            .await
            .unwrap();
        assert_eq!(output.labels[0], "Defective Item");
        assert!(output.scores[0] > 0.5);
    }
}
