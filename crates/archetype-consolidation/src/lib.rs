//! # archetype-consolidation
//!
//! Turns one period's deck observations into a [`ClusterSet`]:
//!
//! 1. Grouping: a [`DeckGrouper`] partitions each class's decks
//!    ([`HdbscanGrouper`] by default).
//! 2. Rule splitting along the registered false-positive rules.
//! 3. Consolidation: greedy pairwise merging until no eligible pair clears
//!    the similarity floor ([`ClusterConsolidator`]).
//! 4. Experimental extraction of low-volume clusters.
//!
//! [`InheritanceMatcher`] then carries curated identities over from the
//! previous period's snapshot.
//!
//! [`ClusterSet`]: archetype_core::ClusterSet
//! [`DeckGrouper`]: archetype_core::traits::DeckGrouper

pub mod engine;
pub mod experimental;
pub mod grouping;
pub mod inheritance;
pub mod pipeline;

pub use engine::{ClusterConsolidator, ConsolidationReport, MergeRecord, StopReason};
pub use experimental::{experimental_thresholds, extract_experimental, threshold_for_class};
pub use grouping::HdbscanGrouper;
pub use inheritance::{
    ClusterSetInheritance, InheritanceMatch, InheritanceMatcher, InheritanceReport,
    RequiredCardsWarning,
};
pub use pipeline::{create_cluster_set, PipelineInput, PipelineOutput};
