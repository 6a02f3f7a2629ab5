//! Keyword topic model
//!
//! Topics are weighted keyword lists. `fit` derives them from a corpus:
//! labelled documents are grouped by label, unlabelled ones by their most
//! frequent content term, and each group's top terms (by relative
//! frequency, stop words removed) become its keywords. `transform` assigns
//! a document to the topic whose keywords it overlaps most.

use crate::model::TopicModel;
use adorescore_core::{Error, Result, TopicId, NO_TOPIC};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Default number of keywords kept per topic
pub const DEFAULT_TOP_N: usize = 10;

/// Groups smaller than this are dropped when fitting unlabelled documents
const MIN_UNLABELLED_GROUP: usize = 2;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "if", "of", "to", "in", "on", "at", "for",
        "with", "by", "from", "up", "out", "as", "is", "it", "its", "was", "were", "be",
        "been", "being", "am", "are", "this", "that", "these", "those", "i", "me", "my",
        "we", "our", "you", "your", "he", "she", "they", "them", "their", "his", "her",
        "so", "very", "just", "too", "not", "no", "do", "did", "does", "have", "has", "had",
        "will", "would", "can", "could", "should", "than", "then", "there", "here", "what",
        "when", "which", "who", "how", "all", "any", "some", "one", "also", "after",
        "before", "about", "into", "again", "only", "more", "most", "get", "got", "s", "t",
    ]
    .into_iter()
    .collect()
});

/// One topic of the model
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: TopicId,
    pub label: String,
    pub keywords: Vec<(String, f64)>,
}

/// A corpus document used for fitting
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusDocument {
    #[serde(rename = "Processed_Text")]
    pub text: String,

    #[serde(rename = "Sub_Topic", default)]
    pub label: Option<String>,
}

impl CorpusDocument {
    pub fn new(text: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            text: text.into(),
            label: label.map(str::to_string),
        }
    }
}

/// Read a topic corpus CSV with a `Processed_Text` column and an optional
/// `Sub_Topic` label column.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<CorpusDocument>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::dataset(format!("Failed to open corpus {}: {}", path.display(), e)))?;

    let mut documents = Vec::new();
    for record in reader.deserialize() {
        let document: CorpusDocument = record
            .map_err(|e| Error::dataset(format!("Failed to parse corpus row: {}", e)))?;
        documents.push(document);
    }

    info!("Loaded {} corpus documents from {}", documents.len(), path.display());
    Ok(documents)
}

/// Keyword-overlap topic model
#[derive(Debug, Clone)]
pub struct KeywordTopicModel {
    name: String,
    topics: Vec<Topic>,
    top_n: usize,
}

impl KeywordTopicModel {
    /// Model with a small built-in set of review topics
    pub fn new() -> Self {
        let seed: &[(&str, &[&str])] = &[
            ("shipping", &["delivery", "shipping", "arrived", "days", "late", "package", "week", "fast", "time", "order"]),
            ("quality", &["quality", "cheap", "material", "broke", "made", "flimsy", "poor", "durable", "sturdy", "plastic"]),
            ("fit", &["size", "fit", "small", "large", "fits", "wear", "tight", "comfortable", "color", "dress"]),
            ("service", &["customer", "service", "support", "refund", "return", "email", "response", "seller", "contact", "help"]),
            ("price", &["price", "money", "worth", "value", "expensive", "cost", "paid", "deal", "cheaper", "discount"]),
            ("taste", &["taste", "flavor", "coffee", "tea", "sweet", "food", "eat", "delicious", "snack", "chocolate"]),
        ];

        let topics = seed
            .iter()
            .enumerate()
            .map(|(id, (label, words))| {
                let n = words.len() as f64;
                Topic {
                    id: id as TopicId,
                    label: label.to_string(),
                    keywords: words
                        .iter()
                        .enumerate()
                        .map(|(rank, w)| (w.to_string(), (n - rank as f64) / n))
                        .collect(),
                }
            })
            .collect();

        Self {
            name: "topic-model-keyword".to_string(),
            topics,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Set how many keywords `fit` keeps per topic
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Replace the topics with ones derived from `corpus`.
    ///
    /// Fails without touching the current topics if no topic can be formed.
    pub fn fit(&mut self, corpus: &[CorpusDocument]) -> Result<()> {
        let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        let mut unlabelled: Vec<&str> = Vec::new();

        for document in corpus {
            match document.label.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => {
                    groups.entry(label.to_string()).or_default().push(&document.text);
                }
                _ => unlabelled.push(&document.text),
            }
        }

        let mut by_anchor: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for text in unlabelled {
            if let Some(anchor) = top_terms(std::iter::once(text), 1).into_iter().next() {
                by_anchor.entry(anchor.0).or_default().push(text);
            }
        }
        for (anchor, texts) in by_anchor {
            if texts.len() >= MIN_UNLABELLED_GROUP {
                groups.entry(anchor).or_default().extend(texts);
            }
        }

        let topics: Vec<Topic> = groups
            .into_iter()
            .map(|(label, texts)| (label, top_terms(texts.into_iter(), self.top_n)))
            .filter(|(_, keywords)| !keywords.is_empty())
            .enumerate()
            .map(|(id, (label, keywords))| Topic {
                id: id as TopicId,
                label,
                keywords,
            })
            .collect();

        if topics.is_empty() {
            return Err(Error::model("Corpus produced no topics"));
        }

        info!("Topic model fitted with {} topics", topics.len());
        self.topics = topics;
        Ok(())
    }

    /// Assign text to a topic synchronously
    pub fn assign(&self, text: &str) -> TopicId {
        let words: HashSet<&str> = text.split_whitespace().collect();

        let mut best = (NO_TOPIC, 0.0);
        for topic in &self.topics {
            let overlap: f64 = topic
                .keywords
                .iter()
                .filter(|(word, _)| words.contains(word.as_str()))
                .map(|(_, weight)| weight)
                .sum();
            if overlap > best.1 {
                best = (topic.id, overlap);
            }
        }

        debug!("Assigned topic {} (overlap {:.3})", best.0, best.1);
        best.0
    }
}

impl Default for KeywordTopicModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Top `n` content terms by relative frequency, ties broken alphabetically
fn top_terms<'a>(texts: impl Iterator<Item = &'a str>, n: usize) -> Vec<(String, f64)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    for text in texts {
        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            if word.len() < 2 || STOP_WORDS.contains(word.as_str()) {
                continue;
            }
            if word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
            total += 1;
        }
    }

    let mut terms: Vec<(String, usize)> = counts.into_iter().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    terms
        .into_iter()
        .take(n)
        .map(|(word, count)| (word, count as f64 / total as f64))
        .collect()
}

#[async_trait::async_trait]
impl TopicModel for KeywordTopicModel {
    async fn transform(&self, text: &str) -> Result<TopicId> {
        Ok(self.assign(text))
    }

    fn topic_keywords(&self, id: TopicId) -> Option<Vec<(String, f64)>> {
        self.topics
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.keywords.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
