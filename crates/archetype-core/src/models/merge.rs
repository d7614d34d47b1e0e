use std::collections::BTreeSet;

use tracing::debug;

use super::{Cluster, ClusterId, ExternalId};
use crate::cards::CardId;
use crate::constants::NEW_CLUSTER_NAME;
use crate::context::ArchetypeContext;
use crate::errors::{ArchetypeResult, MergeError};

/// Fuse `clusters` into one new cluster with id `new_cluster_id`.
///
/// The result owns the union of observations, required cards and rules, and
/// takes its curated identity from whichever input carries one. Two different
/// identities are an error. The merged cluster's invariants are validated
/// before it is returned; a violation means the inputs were never eligible.
/// The signature is left empty for the caller to recompute.
pub fn merge_clusters(
    new_cluster_id: ClusterId,
    clusters: Vec<Cluster>,
    ctx: &ArchetypeContext<'_>,
) -> ArchetypeResult<Cluster> {
    if clusters.is_empty() {
        return Err(MergeError::NoInputs.into());
    }

    let mut data_points = Vec::new();
    let mut required_cards: BTreeSet<CardId> = BTreeSet::new();
    let mut rules: BTreeSet<String> = BTreeSet::new();
    let mut external_id: Option<ExternalId> = None;
    let mut name = NEW_CLUSTER_NAME.to_string();

    for cluster in clusters {
        if let Some(id) = cluster.external_id {
            match external_id {
                Some(existing) if existing != id => {
                    return Err(MergeError::ConflictingExternalIds {
                        first: existing,
                        second: id,
                    }
                    .into());
                }
                _ => {
                    external_id = Some(id);
                    name = cluster.name;
                }
            }
        }
        required_cards.extend(cluster.required_cards);
        rules.extend(cluster.rules);
        data_points.extend(cluster.data_points);
    }

    for &card in &required_cards {
        if !data_points.iter().all(|d| d.contains(card)) {
            return Err(MergeError::MissingRequiredCard { card }.into());
        }
    }

    for rule in &rules {
        for deck in &data_points {
            if !ctx.rule_holds(rule, &deck.cards)? {
                return Err(MergeError::RuleViolation { rule: rule.clone() }.into());
            }
        }
    }

    debug!(
        cluster_id = new_cluster_id,
        data_points = data_points.len(),
        external_id = ?external_id,
        "clusters merged"
    );

    let mut merged = Cluster::new(new_cluster_id, data_points);
    merged.external_id = external_id;
    merged.name = name;
    merged.required_cards = required_cards;
    merged.rules = rules;
    merged.tag_data_points();
    Ok(merged)
}
