use criterion::{criterion_group, criterion_main, Criterion};

use archetype_classification::ClassificationEngine;
use archetype_core::{
    ArchetypeCandidate, ArchetypeContext, CardSignature, DeckCards, InMemoryCardDatabase,
    RuleRegistry,
};

/// 30 archetypes of 20 signature cards each, overlapping on a shared core.
fn build_candidates() -> Vec<ArchetypeCandidate> {
    (0..30)
        .map(|a| {
            let signature: CardSignature = (0..20u32)
                .map(|i| (a * 7 + i, 1.0 - f64::from(i) * 0.04))
                .collect();
            ArchetypeCandidate::new(i64::from(a), signature)
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let candidates = build_candidates();
    let deck: DeckCards = (70..85u32).map(|card| (card, 2)).collect();
    let db = InMemoryCardDatabase::new();
    let rules = RuleRegistry::with_defaults();
    let ctx = ArchetypeContext::new(&db, &rules);
    let engine = ClassificationEngine::default();

    c.bench_function("classify_30_archetypes", |b| {
        b.iter(|| engine.classify(&deck, &candidates, &ctx, None).unwrap())
    });
}

fn bench_normalizers(c: &mut Criterion) {
    let candidates = build_candidates();
    let engine = ClassificationEngine::default();

    c.bench_function("normalizers_30_archetypes", |b| {
        b.iter(|| engine.normalizers(&candidates))
    });
}

criterion_group!(benches, bench_classify, bench_normalizers);
criterion_main!(benches);
