use tracing::debug;

use super::{Cluster, ClusterId, DeckObservation};
use crate::context::ArchetypeContext;
use crate::errors::ArchetypeResult;

/// Split raw clusters along every registered false-positive rule.
///
/// For each rule (in registry order) and each cluster with at least one
/// matching deck, the cluster is replaced by a "matches" cluster that carries
/// the rule, and a "misses" cluster for the rest when any remain. Both keep
/// the parent's rules. Fresh ids are drawn from `next_cluster_id`.
pub fn split_by_rules(
    clusters: Vec<Cluster>,
    next_cluster_id: &mut ClusterId,
    ctx: &ArchetypeContext<'_>,
) -> ArchetypeResult<Vec<Cluster>> {
    let mut clusters = clusters;

    for (rule_name, rule) in ctx.rules.iter() {
        let mut next_clusters = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            if !cluster.data_points.iter().any(|d| rule(&d.cards, ctx.cards)) {
                next_clusters.push(cluster);
                continue;
            }

            let parent_rules = cluster.rules.clone();
            let parent_id = cluster.cluster_id;
            let (hits, misses): (Vec<DeckObservation>, Vec<DeckObservation>) = cluster
                .data_points
                .into_iter()
                .partition(|d| rule(&d.cards, ctx.cards));

            let mut matches = Cluster::new(*next_cluster_id, hits);
            matches.rules = parent_rules.clone();
            matches.rules.insert(rule_name.to_string());
            *next_cluster_id += 1;
            debug!(
                rule = rule_name,
                parent = parent_id,
                matches = matches.cluster_id,
                "split cluster by rule"
            );
            next_clusters.push(matches);

            if !misses.is_empty() {
                let mut rest = Cluster::new(*next_cluster_id, misses);
                rest.rules = parent_rules;
                *next_cluster_id += 1;
                next_clusters.push(rest);
            }
        }
        clusters = next_clusters;
    }

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDatabase, InMemoryCardDatabase};
    use crate::models::DeckCards;
    use crate::rules::RuleRegistry;

    fn deck(cards: &[u32]) -> DeckObservation {
        DeckObservation::new(cards.iter().map(|&c| (c, 1)).collect(), 1).unwrap()
    }

    fn has_one(deck: &DeckCards, _: &dyn CardDatabase) -> bool {
        deck.contains_key(&1)
    }

    fn has_two(deck: &DeckCards, _: &dyn CardDatabase) -> bool {
        deck.contains_key(&2)
    }

    #[test]
    fn splits_matches_from_misses() {
        let db = InMemoryCardDatabase::new();
        let mut rules = RuleRegistry::empty();
        rules.register("has_one", has_one).unwrap();
        let ctx = ArchetypeContext::new(&db, &rules);

        let clusters = vec![Cluster::new(0, vec![deck(&[1]), deck(&[3]), deck(&[1, 3])])];
        let mut next = 1;
        let out = split_by_rules(clusters, &mut next, &ctx).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(next, 3);
        assert_eq!(out[0].cluster_id, 1);
        assert_eq!(out[0].data_points.len(), 2);
        assert!(out[0].rules.contains("has_one"));
        assert_eq!(out[1].data_points.len(), 1);
        assert!(out[1].rules.is_empty());
    }

    #[test]
    fn untouched_when_no_deck_matches() {
        let db = InMemoryCardDatabase::new();
        let mut rules = RuleRegistry::empty();
        rules.register("has_one", has_one).unwrap();
        let ctx = ArchetypeContext::new(&db, &rules);

        let clusters = vec![Cluster::new(0, vec![deck(&[3])])];
        let mut next = 1;
        let out = split_by_rules(clusters, &mut next, &ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].cluster_id, 0);
        assert_eq!(next, 1);
    }

    #[test]
    fn rules_accumulate_across_passes() {
        let db = InMemoryCardDatabase::new();
        let mut rules = RuleRegistry::empty();
        rules.register("has_one", has_one).unwrap();
        rules.register("has_two", has_two).unwrap();
        let ctx = ArchetypeContext::new(&db, &rules);

        let clusters = vec![Cluster::new(
            0,
            vec![deck(&[1, 2]), deck(&[1]), deck(&[2]), deck(&[5])],
        )];
        let mut next = 1;
        let out = split_by_rules(clusters, &mut next, &ctx).unwrap();

        let total: usize = out.iter().map(|c| c.data_points.len()).sum();
        assert_eq!(total, 4);
        let both = out
            .iter()
            .find(|c| c.rules.contains("has_one") && c.rules.contains("has_two"))
            .unwrap();
        assert_eq!(both.data_points.len(), 1);
        for cluster in &out {
            for rule in &cluster.rules {
                assert!(cluster
                    .data_points
                    .iter()
                    .all(|d| ctx.rule_holds(rule, &d.cards).unwrap()));
            }
        }
    }
}
