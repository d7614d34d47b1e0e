use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{merge_clusters, ArchetypeCandidate, Cluster, ClusterId, ExternalId};
use crate::cards::PlayerClass;
use crate::constants::EXPERIMENTAL_CLUSTER_ID;
use crate::context::ArchetypeContext;
use crate::errors::{ArchetypeResult, MergeError};

/// What an experimental extraction moved into the catch-all cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentalExtraction {
    pub absorbed_cluster_ids: Vec<ClusterId>,
    pub data_points: usize,
    pub observations: u64,
}

/// All clusters of one player class. Clusters partition the class's decks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCluster {
    pub player_class: PlayerClass,
    pub clusters: Vec<Cluster>,
}

impl ClassCluster {
    pub fn new(player_class: PlayerClass, clusters: Vec<Cluster>) -> Self {
        Self {
            player_class,
            clusters,
        }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total observation weight across every cluster of the class.
    pub fn observations(&self) -> u64 {
        self.clusters.iter().map(Cluster::observations).sum()
    }

    /// One past the largest cluster id in use.
    pub fn next_cluster_id(&self) -> ClusterId {
        self.clusters
            .iter()
            .map(|c| c.cluster_id)
            .max()
            .map_or(0, |max| (max + 1).max(0))
    }

    pub fn get(&self, cluster_id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.cluster_id == cluster_id)
    }

    pub fn get_mut(&mut self, cluster_id: ClusterId) -> Option<&mut Cluster> {
        self.clusters.iter_mut().find(|c| c.cluster_id == cluster_id)
    }

    pub fn experimental(&self) -> Option<&Cluster> {
        self.get(EXPERIMENTAL_CLUSTER_ID)
    }

    /// Non-experimental clusters carrying a curated identity.
    pub fn curated(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|c| c.is_curated())
    }

    pub fn external_ids(&self) -> BTreeSet<ExternalId> {
        self.curated().filter_map(|c| c.external_id).collect()
    }

    /// External id → dense index, in ascending id order.
    pub fn one_hot_external_ids(&self) -> BTreeMap<ExternalId, usize> {
        self.external_ids()
            .into_iter()
            .enumerate()
            .map(|(idx, id)| (id, idx))
            .collect()
    }

    /// Dense index → external id; the inverse of [`Self::one_hot_external_ids`].
    pub fn one_hot_index_to_external_id(&self) -> BTreeMap<usize, ExternalId> {
        self.external_ids().into_iter().enumerate().collect()
    }

    /// Remove the clusters with ids `removed` and put `merged` at the front.
    pub fn replace_clusters(&mut self, removed: &[ClusterId], merged: Cluster) {
        self.clusters.retain(|c| !removed.contains(&c.cluster_id));
        self.clusters.insert(0, merged);
    }

    /// Pool every cluster whose observation weight is below `threshold` (and
    /// any existing experimental cluster) into one experimental cluster.
    ///
    /// Signatures are not recomputed here.
    pub fn split_off_experimental(&mut self, threshold: u64) -> Option<ExperimentalExtraction> {
        let mut kept = Vec::with_capacity(self.clusters.len());
        let mut pooled = Vec::new();
        let mut absorbed_cluster_ids = Vec::new();

        for cluster in std::mem::take(&mut self.clusters) {
            if cluster.is_experimental() || cluster.observations() < threshold {
                absorbed_cluster_ids.push(cluster.cluster_id);
                pooled.extend(cluster.data_points);
            } else {
                kept.push(cluster);
            }
        }

        if pooled.is_empty() {
            self.clusters = kept;
            return None;
        }

        let experimental = Cluster::new(EXPERIMENTAL_CLUSTER_ID, pooled);
        let extraction = ExperimentalExtraction {
            absorbed_cluster_ids,
            data_points: experimental.data_points.len(),
            observations: experimental.observations(),
        };
        kept.push(experimental);
        self.clusters = kept;
        Some(extraction)
    }

    /// Archetype maintenance: fold a cluster without curated identity into one
    /// that has it. Returns the id of the resulting cluster.
    pub fn merge_into_external(
        &mut self,
        external_cluster_id: ClusterId,
        to_be_merged_id: ClusterId,
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<ClusterId> {
        let survivor = self
            .get(external_cluster_id)
            .ok_or(MergeError::ClusterNotFound {
                cluster_id: external_cluster_id,
            })?;
        if survivor.external_id.is_none() {
            return Err(MergeError::SurvivorWithoutExternalId {
                cluster_id: external_cluster_id,
            }
            .into());
        }
        let absorbed = self.get(to_be_merged_id).ok_or(MergeError::ClusterNotFound {
            cluster_id: to_be_merged_id,
        })?;
        if absorbed.external_id.is_some() {
            return Err(MergeError::AbsorbedHasExternalId {
                cluster_id: to_be_merged_id,
            }
            .into());
        }

        let new_id = self.next_cluster_id();
        let inputs = vec![survivor.clone(), absorbed.clone()];
        let merged = merge_clusters(new_id, inputs, ctx)?;
        info!(
            player_class = %self.player_class,
            survivor = external_cluster_id,
            absorbed = to_be_merged_id,
            new_cluster_id = new_id,
            "merged cluster into curated archetype"
        );
        self.replace_clusters(&[external_cluster_id, to_be_merged_id], merged);
        Ok(new_id)
    }

    /// Classification candidates for the curated clusters of a frozen snapshot.
    pub fn archetype_candidates(&self) -> Vec<ArchetypeCandidate> {
        self.curated()
            .filter_map(ArchetypeCandidate::from_cluster)
            .collect()
    }
}

impl fmt::Display for ClassCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} clusters", self.player_class, self.clusters.len())
    }
}
