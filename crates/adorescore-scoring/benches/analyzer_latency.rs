//! End-to-end analysis latency with the lexicon models
//!
//! Run with: cargo bench -p adorescore-scoring

use adorescore_models::{ModelRegistry, ModelsConfig};
use adorescore_scoring::Analyzer;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

fn benchmark_analyze(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let analyzer = rt.block_on(async {
        Analyzer::new(ModelRegistry::load(&ModelsConfig::default()).await)
    });

    let reviews = vec![
        ("empty", String::new()),
        ("short", "This product broke immediately, terrible quality!".to_string()),
        (
            "medium",
            "Fast delivery and the jacket fits perfectly. Great value for money, \
             would recommend this seller."
                .to_string(),
        ),
        ("long", "The package arrived late and damaged. ".repeat(40)),
    ];

    let mut group = c.benchmark_group("Analyzer");
    group.sample_size(100);

    for (name, text) in &reviews {
        group.bench_with_input(BenchmarkId::new("analyze", name), text, |b, text| {
            b.iter(|| rt.block_on(async { analyzer.analyze(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_analyze);
criterion_main!(benches);
