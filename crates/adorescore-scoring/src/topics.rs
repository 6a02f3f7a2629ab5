//! Topic vocabulary, selection and subtopic assembly

use adorescore_core::{TopicId, ZeroShotOutput, NO_TOPIC, UNKNOWN_LABEL};
use std::collections::BTreeMap;

/// Candidate labels sent to the zero-shot classifier
pub const TOPIC_CANDIDATES: [&str; 20] = [
    "Product Quality",
    "Durability",
    "Defective Item",
    "Wrong Item Sent",
    "Packaging Issue",
    "Late Delivery",
    "Fast Delivery",
    "Damaged During Shipping",
    "Customer Support Response",
    "Refund & Returns",
    "Replacement Process",
    "Expensive Product",
    "Discounts & Deals",
    "Value for Money",
    "Website Usability",
    "Trust in Brand",
    "Fake or Counterfeit Product",
    "Delivery",
    "Quality",
    "Clothes",
];

/// A topic is selected only when its score is strictly above this
pub const TOPIC_THRESHOLD: f64 = 0.5;

/// Sole topic reported when nothing clears the threshold
pub const GENERAL_FEEDBACK: &str = "General Feedback";

/// Topics scoring above [`TOPIC_THRESHOLD`], in classifier order
pub fn select_topics(output: &ZeroShotOutput) -> Vec<String> {
    let selected: Vec<String> = output
        .iter()
        .filter(|(_, score)| *score > TOPIC_THRESHOLD)
        .map(|(label, _)| label.to_string())
        .collect();

    if selected.is_empty() {
        vec![GENERAL_FEEDBACK.to_string()]
    } else {
        selected
    }
}

/// Subtopic string for a topic-model assignment.
///
/// The sentinel id, or an id the model has no keywords for, gives
/// `"Unknown"`.
pub fn subtopic_label(id: TopicId, keywords: Option<Vec<(String, f64)>>) -> String {
    if id == NO_TOPIC {
        return UNKNOWN_LABEL.to_string();
    }
    match keywords {
        Some(keywords) if !keywords.is_empty() => keywords
            .into_iter()
            .map(|(word, _)| word)
            .collect::<Vec<_>>()
            .join(", "),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Every main topic gets the same one-element subtopic list
pub fn assemble_subtopics(main: &[String], subtopic: &str) -> BTreeMap<String, Vec<String>> {
    main.iter()
        .map(|topic| (topic.clone(), vec![subtopic.to_string()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(pairs: &[(&str, f64)]) -> ZeroShotOutput {
        ZeroShotOutput::from_pairs(pairs.iter().map(|(l, s)| (l.to_string(), *s)).collect())
    }

    #[test]
    fn test_vocabulary_is_unique() {
        let mut labels = TOPIC_CANDIDATES.to_vec();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), TOPIC_CANDIDATES.len());
    }

    #[test]
    fn test_select_topics_threshold_is_strict() {
        let selected = select_topics(&output(&[
            ("Durability", 0.9),
            ("Quality", 0.51),
            ("Delivery", 0.5),
        ]));
        assert_eq!(selected, vec!["Durability", "Quality"]);
    }

    #[test]
    fn test_select_topics_falls_back_to_general_feedback() {
        assert_eq!(select_topics(&output(&[("Delivery", 0.2)])), vec![GENERAL_FEEDBACK]);
        assert_eq!(select_topics(&ZeroShotOutput::default()), vec![GENERAL_FEEDBACK]);
    }

    #[test]
    fn test_subtopic_label() {
        let keywords = vec![("battery".to_string(), 0.4), ("charge".to_string(), 0.2)];
        assert_eq!(subtopic_label(3, Some(keywords)), "battery, charge");
        assert_eq!(subtopic_label(NO_TOPIC, None), "Unknown");
        assert_eq!(subtopic_label(7, None), "Unknown");
    }

    #[test]
    fn test_assemble_subtopics_is_identical_per_topic() {
        let main = vec!["Durability".to_string(), "Quality".to_string()];
        let subtopics = assemble_subtopics(&main, "broke, cheap");
        assert_eq!(subtopics.len(), 2);
        assert!(subtopics.values().all(|v| v == &vec!["broke, cheap".to_string()]));
    }
}
