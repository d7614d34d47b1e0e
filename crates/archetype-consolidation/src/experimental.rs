//! Experimental cluster extraction.
//!
//! Low-volume clusters are pooled into the reserved experimental cluster
//! (`cluster_id = -1`) so they stay out of the curated archetype list while
//! keeping their decks.

use std::collections::BTreeMap;

use archetype_core::cards::CardDatabase;
use archetype_core::config::ExperimentalConfig;
use archetype_core::models::ExperimentalExtraction;
use archetype_core::{ClassCluster, DeckObservation, PlayerClass};
use archetype_observability::tracing_setup::events;
use archetype_signatures::SignatureCalculator;

/// Per-class thresholds: `floor(class_observations * threshold_pct)`.
pub fn experimental_thresholds(
    decks: &BTreeMap<PlayerClass, Vec<DeckObservation>>,
    config: &ExperimentalConfig,
) -> BTreeMap<PlayerClass, u64> {
    decks
        .iter()
        .map(|(&class, decks)| {
            let observations = decks.iter().map(|d| d.observations).sum();
            (class, config.threshold_for(observations))
        })
        .collect()
}

/// Threshold for `class`, falling back to the small-cluster cutoff.
pub fn threshold_for_class(
    thresholds: &BTreeMap<PlayerClass, u64>,
    class: PlayerClass,
    config: &ExperimentalConfig,
) -> u64 {
    thresholds
        .get(&class)
        .copied()
        .unwrap_or(config.small_cluster_cutoff)
}

/// Pool every cluster below `threshold` into the experimental cluster and
/// recompute signatures.
pub fn extract_experimental(
    class_cluster: &mut ClassCluster,
    threshold: u64,
    calculator: &SignatureCalculator,
    cards: Option<&dyn CardDatabase>,
) -> Option<ExperimentalExtraction> {
    let extraction = class_cluster.split_off_experimental(threshold);
    if let Some(extraction) = &extraction {
        events::experimental_extracted(
            class_cluster.player_class.name(),
            extraction.absorbed_cluster_ids.len(),
            extraction.observations,
            threshold,
        );
    }
    calculator.update_cluster_signatures(class_cluster, cards);
    extraction
}
