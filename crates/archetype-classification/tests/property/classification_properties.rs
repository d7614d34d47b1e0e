//! Property tests for deck classification.

use proptest::prelude::*;

use archetype_classification::ClassificationEngine;
use archetype_core::{
    ArchetypeCandidate, ArchetypeContext, CardSignature, DeckCards, InMemoryCardDatabase,
    RuleRegistry,
};

fn candidates_strategy() -> impl Strategy<Value = Vec<ArchetypeCandidate>> {
    prop::collection::vec(prop::collection::btree_map(0u32..20, 0.05f64..1.0, 1..8), 1..6)
        .prop_map(|signatures| {
            signatures
                .into_iter()
                .enumerate()
                .map(|(i, weights)| {
                    ArchetypeCandidate::new(i as i64 + 100, CardSignature::from(weights))
                })
                .collect()
        })
}

fn deck_strategy() -> impl Strategy<Value = DeckCards> {
    prop::collection::btree_map(0u32..20, 1u32..3, 1..15)
}

proptest! {
    #[test]
    fn result_is_a_qualifying_candidate(
        candidates in candidates_strategy(),
        deck in deck_strategy(),
    ) {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::with_defaults();
        let ctx = ArchetypeContext::new(&db, &rules);
        let engine = ClassificationEngine::default();

        let result = engine.classify(&deck, &candidates, &ctx, None).unwrap();
        let scores = engine.scores(&deck, &candidates, &ctx).unwrap();
        match result {
            Some(id) => {
                let winner = scores.iter().find(|s| s.archetype_id == id).unwrap();
                prop_assert!(winner.qualifies());
                prop_assert!(scores.iter().all(|s| !s.qualifies() || s.distance <= winner.distance));
            }
            None => prop_assert!(scores.iter().all(|s| !s.qualifies())),
        }
    }

    #[test]
    fn empty_signature_candidate_changes_nothing(
        candidates in candidates_strategy(),
        deck in deck_strategy(),
    ) {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::with_defaults();
        let ctx = ArchetypeContext::new(&db, &rules);
        let engine = ClassificationEngine::default();

        let before = engine.classify(&deck, &candidates, &ctx, None).unwrap();
        let mut extended = candidates.clone();
        extended.insert(0, ArchetypeCandidate::new(1, CardSignature::new()));
        let after = engine.classify(&deck, &extended, &ctx, None).unwrap();
        prop_assert_eq!(before, after);
    }
}
