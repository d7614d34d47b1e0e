//! Property tests for cluster splitting and experimental extraction.

use proptest::prelude::*;

use archetype_core::cards::{CardDatabase, InMemoryCardDatabase, PlayerClass};
use archetype_core::models::{split_by_rules, DeckCards};
use archetype_core::rules::RuleRegistry;
use archetype_core::{ArchetypeContext, ClassCluster, Cluster, DeckObservation};

fn contains_low_card(deck: &DeckCards, _: &dyn CardDatabase) -> bool {
    deck.keys().any(|&c| c < 5)
}

fn contains_even_card(deck: &DeckCards, _: &dyn CardDatabase) -> bool {
    deck.keys().any(|&c| c % 2 == 0)
}

fn deck_strategy() -> impl Strategy<Value = DeckObservation> {
    (prop::collection::btree_set(0u32..20, 1..6), 1u64..50).prop_map(|(cards, obs)| {
        DeckObservation::new(cards.into_iter().map(|c| (c, 1)).collect(), obs).unwrap()
    })
}

fn clusters_strategy() -> impl Strategy<Value = Vec<Cluster>> {
    prop::collection::vec(prop::collection::vec(deck_strategy(), 1..6), 1..6).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, decks)| Cluster::new(i as i64, decks))
            .collect()
    })
}

proptest! {
    #[test]
    fn split_members_satisfy_their_rules(clusters in clusters_strategy()) {
        let db = InMemoryCardDatabase::new();
        let mut rules = RuleRegistry::empty();
        rules.register("contains_low_card", contains_low_card).unwrap();
        rules.register("contains_even_card", contains_even_card).unwrap();
        let ctx = ArchetypeContext::new(&db, &rules);

        let before: u64 = clusters.iter().map(Cluster::observations).sum();
        let mut next = clusters.len() as i64;
        let out = split_by_rules(clusters, &mut next, &ctx).unwrap();
        let after: u64 = out.iter().map(Cluster::observations).sum();
        prop_assert_eq!(before, after);

        for cluster in &out {
            prop_assert!(!cluster.data_points.is_empty());
            prop_assert!(cluster.satisfies_rules(&cluster.rules, &ctx).unwrap());
        }
    }

    #[test]
    fn experimental_extraction_preserves_observations(
        clusters in clusters_strategy(),
        threshold in 0u64..200,
    ) {
        let mut cc = ClassCluster::new(PlayerClass::Hunter, clusters);
        let before = cc.observations();
        let data_points: usize = cc.clusters.iter().map(|c| c.data_points.len()).sum();
        cc.split_off_experimental(threshold);

        prop_assert_eq!(cc.observations(), before);
        let after: usize = cc.clusters.iter().map(|c| c.data_points.len()).sum();
        prop_assert_eq!(after, data_points);
        for cluster in cc.clusters.iter().filter(|c| !c.is_experimental()) {
            prop_assert!(cluster.observations() >= threshold);
        }
    }
}
