//! # archetype-signatures
//!
//! Turns a cluster's deck observations into a card signature and compares
//! signatures.
//!
//! - [`SignatureCalculator`]: prevalence per card, optional tiering, optional
//!   player-class-prevalence (PCP) dampening, and the cross-cluster-prevalence
//!   (CCP) post-pass across a class.
//! - [`SimilarityScorer`]: weighted overlap of two signatures in `[0, 1]`.

pub mod algorithms;
pub mod calculator;
pub mod prevalence;

pub use algorithms::similarity::{SharedCard, SimilarityBreakdown, SimilarityScorer};
pub use calculator::SignatureCalculator;
pub use prevalence::class_prevalence::ClassPrevalence;
pub use prevalence::cross_cluster::{apply_cross_cluster_prevalence, cross_cluster_modifier};
