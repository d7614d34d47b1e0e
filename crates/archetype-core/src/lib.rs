//! # archetype-core
//!
//! Foundation crate for the deck archetype engine.
//! Defines all types, traits, errors, config, rules, and constants, plus the
//! cluster lifecycle (create, merge, split by rule, inherit identity).
//! Every other crate in the workspace depends on this.

pub mod cards;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod models;
pub mod rules;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cards::{CardDatabase, CardId, CardInfo, InMemoryCardDatabase, PlayerClass};
pub use config::ArchetypeConfig;
pub use context::ArchetypeContext;
pub use errors::{ArchetypeError, ArchetypeResult};
pub use models::{
    ArchetypeCandidate, ArchetypeId, CardSignature, ClassCluster, Cluster, ClusterId,
    ClusterSet, DeckCards, DeckObservation, ExternalId,
};
pub use rules::RuleRegistry;
