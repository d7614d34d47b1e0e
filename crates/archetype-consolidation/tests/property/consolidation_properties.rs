//! Property tests for the merge loop and identity inheritance.

use std::collections::BTreeSet;

use proptest::prelude::*;

use archetype_consolidation::{ClusterConsolidator, InheritanceMatcher};
use archetype_core::{
    ArchetypeConfig, ArchetypeContext, ClassCluster, Cluster, DeckObservation,
    InMemoryCardDatabase, PlayerClass, RuleRegistry,
};

fn deck_strategy() -> impl Strategy<Value = DeckObservation> {
    (prop::collection::btree_set(0u32..12, 1..6), 1u64..40).prop_map(|(cards, obs)| {
        DeckObservation::new(cards.into_iter().map(|c| (c, 2)).collect(), obs).unwrap()
    })
}

fn class_strategy() -> impl Strategy<Value = ClassCluster> {
    prop::collection::vec(prop::collection::vec(deck_strategy(), 1..4), 1..7).prop_map(|groups| {
        let clusters = groups
            .into_iter()
            .enumerate()
            .map(|(i, decks)| Cluster::new(i as i64, decks))
            .collect();
        ClassCluster::new(PlayerClass::Warlock, clusters)
    })
}

proptest! {
    #[test]
    fn consolidation_never_grows_and_keeps_observations(
        mut cc in class_strategy(),
        floor in 0.3f64..1.0,
    ) {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::with_defaults();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut config = ArchetypeConfig::default();
        config.consolidation.merge_similarity = floor;

        let before_len = cc.len();
        let before_obs = cc.observations();
        let report = ClusterConsolidator::from_config(&config)
            .consolidate(&mut cc, &ctx)
            .unwrap();

        prop_assert!(cc.len() <= before_len);
        prop_assert_eq!(cc.len(), before_len - report.merges.len());
        prop_assert_eq!(cc.observations(), before_obs);
        for merge in &report.merges {
            prop_assert!(merge.score >= floor);
        }
        let ids: BTreeSet<i64> = cc.clusters.iter().map(|c| c.cluster_id).collect();
        prop_assert_eq!(ids.len(), cc.len());
    }

    #[test]
    fn inheritance_hands_out_each_identity_once(
        previous in class_strategy(),
        mut current in class_strategy(),
    ) {
        let config = ArchetypeConfig::default();
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::with_defaults();
        let ctx = ArchetypeContext::new(&db, &rules);
        let consolidator = ClusterConsolidator::from_config(&config);

        let mut previous = previous;
        for (i, cluster) in previous.clusters.iter_mut().enumerate() {
            *cluster = cluster.clone().with_identity(100 + i as i64, format!("archetype {i}"));
        }
        consolidator.update_signatures(&mut previous, &ctx);
        consolidator.update_signatures(&mut current, &ctx);

        let report = InheritanceMatcher::from_config(&config).inherit(&mut current, &previous);

        let inherited: Vec<i64> = current.clusters.iter().filter_map(|c| c.external_id).collect();
        let unique: BTreeSet<i64> = inherited.iter().copied().collect();
        prop_assert_eq!(inherited.len(), unique.len());
        prop_assert_eq!(inherited.len(), report.matches.len());
        prop_assert_eq!(
            unique.len() + report.unconsumed_external_ids.len(),
            previous.len()
        );
        prop_assert!(unique.is_disjoint(&report.unconsumed_external_ids));
        for m in &report.matches {
            prop_assert!(m.score >= config.inheritance.threshold);
        }
    }
}
