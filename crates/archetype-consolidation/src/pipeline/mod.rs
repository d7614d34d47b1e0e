//! Cluster-set pipeline orchestrator.
//!
//! Grouping → Rule splitting → Signatures + Consolidation → Experimental
//! extraction, per player class.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::info;

use archetype_core::config::ArchetypeConfig;
use archetype_core::errors::ArchetypeResult;
use archetype_core::models::{split_by_rules, ExperimentalExtraction, GameFormat};
use archetype_core::traits::{validate_partition, DeckGrouper};
use archetype_core::{
    ArchetypeContext, ClassCluster, Cluster, ClusterId, ClusterSet, DeckObservation, PlayerClass,
};
use archetype_observability::pipeline_span;

use crate::engine::{ClusterConsolidator, ConsolidationReport};
use crate::experimental::{experimental_thresholds, extract_experimental, threshold_for_class};

/// One period's observations, keyed by class.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub as_of: DateTime<Utc>,
    pub game_format: GameFormat,
    pub decks: BTreeMap<PlayerClass, Vec<DeckObservation>>,
}

/// The new snapshot plus what each stage decided.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cluster_set: ClusterSet,
    pub consolidation: Vec<ConsolidationReport>,
    pub experimental_thresholds: BTreeMap<PlayerClass, u64>,
    pub experimental: BTreeMap<PlayerClass, ExperimentalExtraction>,
}

/// Build a [`ClusterSet`] from raw observations.
///
/// Classes with no decks are omitted. Classes are consolidated in parallel;
/// each class's merge loop is sequential.
pub fn create_cluster_set(
    input: PipelineInput,
    grouper: &dyn DeckGrouper,
    ctx: &ArchetypeContext<'_>,
    config: &ArchetypeConfig,
) -> ArchetypeResult<PipelineOutput> {
    let span = pipeline_span!(input.game_format, input.decks.len());
    let _guard = span.enter();

    let thresholds = experimental_thresholds(&input.decks, &config.experimental);

    let mut class_clusters = Vec::with_capacity(input.decks.len());
    for (player_class, decks) in input.decks {
        if decks.is_empty() {
            continue;
        }
        for deck in &decks {
            deck.validate()?;
        }
        let clusters = initial_clusters(player_class, decks, grouper, ctx)?;
        class_clusters.push(ClassCluster::new(player_class, clusters));
    }

    let consolidator = ClusterConsolidator::from_config(config);
    let consolidation = class_clusters
        .par_iter_mut()
        .map(|cc| consolidator.consolidate(cc, ctx))
        .collect::<ArchetypeResult<Vec<_>>>()?;

    let mut experimental = BTreeMap::new();
    for cc in &mut class_clusters {
        let threshold = threshold_for_class(&thresholds, cc.player_class, &config.experimental);
        if let Some(extraction) = extract_experimental(cc, threshold, consolidator.calculator(), None) {
            experimental.insert(cc.player_class, extraction);
        }
    }

    let cluster_set = ClusterSet::new(input.as_of, input.game_format, class_clusters);
    info!(
        classes = cluster_set.class_clusters.len(),
        observations = cluster_set.observations(),
        "cluster set created"
    );

    Ok(PipelineOutput {
        cluster_set,
        consolidation,
        experimental_thresholds: thresholds,
        experimental,
    })
}

/// Group one class's decks and split the groups along every rule.
fn initial_clusters(
    player_class: PlayerClass,
    decks: Vec<DeckObservation>,
    grouper: &dyn DeckGrouper,
    ctx: &ArchetypeContext<'_>,
) -> ArchetypeResult<Vec<Cluster>> {
    let groups = grouper.group(player_class, &decks)?;
    validate_partition(&groups, decks.len())?;

    let mut slots: Vec<Option<DeckObservation>> = decks.into_iter().map(Some).collect();
    let clusters: Vec<Cluster> = groups
        .iter()
        .enumerate()
        .map(|(id, members)| {
            let data_points = members.iter().filter_map(|&i| slots[i].take()).collect();
            Cluster::new(id as ClusterId, data_points)
        })
        .collect();

    let mut next_cluster_id = clusters.len() as ClusterId;
    let split = split_by_rules(clusters, &mut next_cluster_id, ctx)?;
    info!(
        player_class = %player_class,
        grouper = grouper.name(),
        groups = groups.len(),
        clusters = split.len(),
        "initial clusters created"
    );
    Ok(split)
}
