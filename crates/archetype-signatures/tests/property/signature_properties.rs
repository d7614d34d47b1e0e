//! Property tests for signature weights, cross-cluster modifiers and similarity.

use proptest::prelude::*;

use archetype_core::{CardSignature, DeckObservation};
use archetype_signatures::{cross_cluster_modifier, SignatureCalculator, SimilarityScorer};

fn signature_strategy() -> impl Strategy<Value = CardSignature> {
    prop::collection::btree_map(0u32..40, 0.0f64..=1.0, 0..20)
        .prop_map(|m| m.into_iter().collect())
}

fn decks_strategy() -> impl Strategy<Value = Vec<DeckObservation>> {
    prop::collection::vec(
        (prop::collection::btree_set(0u32..30, 1..10), 1u64..100),
        1..10,
    )
    .prop_map(|decks| {
        decks
            .into_iter()
            .map(|(cards, obs)| {
                DeckObservation::new(cards.into_iter().map(|c| (c, 1)).collect(), obs).unwrap()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn modifier_is_in_unit_interval(n in 1usize..50, k_seed in 0usize..50) {
        let k = k_seed % (n + 1);
        let m = cross_cluster_modifier(k, n);
        prop_assert!((0.0..=1.0).contains(&m));
        let p = 1.0 - k as f64 / n as f64;
        prop_assert!((m - p * p).abs() < 1e-12);
        prop_assert_eq!(cross_cluster_modifier(0, n), 1.0);
        prop_assert_eq!(cross_cluster_modifier(n, n), 0.0);
    }

    #[test]
    fn similarity_is_bounded_and_symmetric(a in signature_strategy(), b in signature_strategy()) {
        let scorer = SimilarityScorer::default();
        let ab = scorer.score(&a, &b);
        let ba = scorer.score(&b, &a);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn self_similarity_is_one_when_anything_is_significant(a in signature_strategy()) {
        let scorer = SimilarityScorer::default();
        let score = scorer.score(&a, &a);
        if a.iter().any(|(_, w)| w >= scorer.significance_floor()) {
            prop_assert!((score - 1.0).abs() < 1e-12);
        } else {
            prop_assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn raw_weights_are_prevalences(decks in decks_strategy()) {
        let calc = SignatureCalculator::default();
        let sig = calc.cluster_signature(&decks, None, None);
        let total: u64 = decks.iter().map(|d| d.observations).sum();
        for (card, weight) in sig.iter() {
            let count: u64 = decks.iter().filter(|d| d.contains(card)).map(|d| d.observations).sum();
            prop_assert!((weight - count as f64 / total as f64).abs() < 1e-12);
            prop_assert!(weight > 0.0 && weight <= 1.0);
        }
    }
}
