//! Data model: deck observations, signatures, clusters and snapshots.

mod candidate;
mod class_cluster;
mod cluster;
mod cluster_set;
mod deck;
mod merge;
mod signature;
mod split;

pub use candidate::ArchetypeCandidate;
pub use class_cluster::{ClassCluster, ExperimentalExtraction};
pub use cluster::Cluster;
pub use cluster_set::{ClusterSet, GameFormat};
pub use deck::{ClusterAssignment, DeckCards, DeckObservation};
pub use merge::merge_clusters;
pub use signature::CardSignature;
pub use split::split_by_rules;

/// Cluster id, unique within a [`ClassCluster`]. `-1` is the experimental cluster.
pub type ClusterId = i64;

/// Curator-assigned archetype identity that persists across periods.
pub type ExternalId = i64;

/// Identifier of an archetype that decks are classified into.
pub type ArchetypeId = i64;
