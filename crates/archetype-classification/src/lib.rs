//! # archetype-classification
//!
//! Assigns a single deck to the best-matching archetype of a frozen snapshot.
//! Scores are normalized so archetypes with dense and sparse signatures
//! compete on the same scale; required-card and false-positive-rule gates
//! veto matches, and near misses are reported through a callback.

pub mod engine;
pub mod failure;
pub mod normalizers;

pub use engine::{ArchetypeScore, ClassificationEngine};
pub use failure::{ClassificationFailure, FailureReason};
pub use normalizers::Normalizers;
