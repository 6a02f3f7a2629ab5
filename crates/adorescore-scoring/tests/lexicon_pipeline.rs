//! End-to-end analysis with the built-in lexicon models

use adorescore_models::{ModelRegistry, ModelsConfig};
use adorescore_scoring::{Analyzer, GENERAL_FEEDBACK, TOPIC_THRESHOLD};
use proptest::prelude::*;
use std::io::Write;

async fn lexicon_analyzer() -> Analyzer {
    let registry = ModelRegistry::load(&ModelsConfig::default()).await;
    assert!(registry.is_ready());
    Analyzer::new(registry)
}

#[tokio::test]
async fn test_negative_product_review() {
    let analyzer = lexicon_analyzer().await;
    let response = analyzer
        .analyze("This product broke immediately, terrible quality!")
        .await
        .unwrap();

    assert!(response.adorescore.overall < 0, "got {}", response.adorescore.overall);

    let expected = ["Product Quality", "Defective Item", "Durability"];
    assert!(response
        .topics
        .main
        .iter()
        .any(|topic| expected.contains(&topic.as_str())));

    let values: Vec<i64> = response.adorescore.breakdown.values().copied().collect();
    assert!(values.iter().all(|v| *v == values[0] && *v < 0));
}

#[tokio::test]
async fn test_empty_review_does_not_fail() {
    let analyzer = lexicon_analyzer().await;
    let response = analyzer.analyze("").await.unwrap();

    assert_eq!(response.emotions.primary.emotion, "Unknown");
    assert_eq!(response.emotions.secondary.emotion, "Unknown");
    assert_eq!(response.adorescore.overall, 0);
    assert_eq!(response.topics.main, vec![GENERAL_FEEDBACK]);
    assert_eq!(response.topics.subtopics[GENERAL_FEEDBACK], vec!["Unknown"]);
    assert_eq!(response.adorescore.breakdown[GENERAL_FEEDBACK], 0);
}

#[tokio::test]
async fn test_punctuation_only_review() {
    let analyzer = lexicon_analyzer().await;
    let response = analyzer.analyze("!!! ??? ...").await.unwrap();
    assert_eq!(response.adorescore.overall, 0);
    assert_eq!(response.topics.main, vec![GENERAL_FEEDBACK]);
}

#[tokio::test]
async fn test_analysis_is_deterministic() {
    let analyzer = lexicon_analyzer().await;
    let text = "Love the dress, fast delivery, but the size runs small.";
    let first = analyzer.analyze(text).await.unwrap();
    let second = analyzer.analyze(text).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_subtopics_follow_fitted_corpus() {
    let mut corpus = tempfile::NamedTempFile::new().unwrap();
    writeln!(corpus, "Processed_Text,Sub_Topic").unwrap();
    writeln!(corpus, "zipper stuck zipper broke,zipper").unwrap();
    writeln!(corpus, "zipper jammed,zipper").unwrap();
    writeln!(corpus, "strap snapped strap,strap").unwrap();

    let config = ModelsConfig::from_yaml(&format!(
        "topic_model:\n  backend: keyword\n  corpus: {}\n  top_n: 2\n",
        corpus.path().display()
    ))
    .unwrap();
    let analyzer = Analyzer::new(ModelRegistry::load(&config).await);

    let response = analyzer.analyze("The zipper broke on day one").await.unwrap();
    for subtopics in response.topics.subtopics.values() {
        assert_eq!(subtopics, &vec!["zipper, broke".to_string()]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selected_topics_clear_threshold(text in "[a-zA-Z !,.]{0,80}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (response, classifier_scores) = rt.block_on(async {
            let analyzer = lexicon_analyzer().await;
            let response = analyzer.analyze(&text).await.unwrap();
            let cleaned = adorescore_core::text::normalize(&text);
            let scores = analyzer
                .models()
                .topic_classifier()
                .unwrap()
                .classify(&cleaned, &adorescore_scoring::TOPIC_CANDIDATES, true)
                .await
                .unwrap();
            (response, scores)
        });

        let main = &response.topics.main;
        if !(main.len() == 1 && main[0] == GENERAL_FEEDBACK) {
            for topic in main {
                let score = classifier_scores
                    .iter()
                    .find(|(label, _)| *label == topic.as_str())
                    .map(|(_, s)| s)
                    .unwrap();
                prop_assert!(score > TOPIC_THRESHOLD);
            }
        } else {
            prop_assert!(classifier_scores.scores.iter().all(|s| *s <= TOPIC_THRESHOLD));
        }

        let values: Vec<&i64> = response.adorescore.breakdown.values().collect();
        prop_assert!(values.windows(2).all(|w| w[0] == w[1]));
        prop_assert_eq!(response.topics.subtopics.len(), main.len());
    }
}
