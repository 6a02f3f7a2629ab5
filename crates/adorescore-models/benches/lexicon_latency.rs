//! Latency benchmarks for the lexicon backends
//!
//! Run with: cargo bench -p adorescore-models

use adorescore_models::{
    EmotionClassifier, KeywordTopicModel, LexiconEmotion, LexiconSentiment,
    LexiconTopicClassifier, SentimentScorer, TopicClassifier, TopicModel,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

const TEXTS: &[(&str, &str)] = &[
    ("short", "love it"),
    ("negative", "this product broke immediately terrible quality"),
    (
        "long",
        "ordered a dress for a wedding and the package arrived two weeks late the fabric \
         feels cheap and the size runs small customer service never answered my emails \
         about a refund so i would not recommend this seller",
    ),
];

const CANDIDATES: &[&str] = &[
    "Product Quality",
    "Durability",
    "Defective Item",
    "Late Delivery",
    "Refund & Returns",
    "Clothes",
];

fn benchmark_sentiment(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let scorer = LexiconSentiment::new();

    let mut group = c.benchmark_group("Lexicon_Sentiment");
    for (name, text) in TEXTS {
        group.bench_with_input(BenchmarkId::new("polarity", name), text, |b, text| {
            b.iter(|| rt.block_on(async { scorer.polarity(black_box(text)).await.unwrap() }));
        });
    }
    group.finish();
}

fn benchmark_emotion(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = LexiconEmotion::new().expect("Failed to create emotion lexicon");

    let mut group = c.benchmark_group("Lexicon_Emotion");
    for (name, text) in TEXTS {
        group.bench_with_input(BenchmarkId::new("rank", name), text, |b, text| {
            b.iter(|| rt.block_on(async { classifier.rank(black_box(text)).await.unwrap() }));
        });
    }
    group.finish();
}

fn benchmark_topics(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = LexiconTopicClassifier::new().expect("Failed to create topic lexicon");
    let model = KeywordTopicModel::new();

    let mut group = c.benchmark_group("Lexicon_Topics");
    for (name, text) in TEXTS {
        group.bench_with_input(BenchmarkId::new("zero_shot", name), text, |b, text| {
            b.iter(|| {
                rt.block_on(async {
                    classifier
                        .classify(black_box(text), CANDIDATES, true)
                        .await
                        .unwrap()
                })
            });
        });
        group.bench_with_input(BenchmarkId::new("transform", name), text, |b, text| {
            b.iter(|| rt.block_on(async { model.transform(black_box(text)).await.unwrap() }));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_sentiment, benchmark_emotion, benchmark_topics);
criterion_main!(benches);
