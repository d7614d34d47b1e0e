//! Configuration for the archetype engine.
//! TOML-based: file < `ARCHETYPE_*` env overrides < validation.

pub mod archetype_config;
pub mod classification_config;
pub mod consolidation_config;
pub mod defaults;
pub mod experimental_config;
pub mod grouping_config;
pub mod inheritance_config;
pub mod observability_config;
pub mod signature_config;
pub mod similarity_config;

pub use archetype_config::ArchetypeConfig;
pub use classification_config::ClassificationConfig;
pub use consolidation_config::ConsolidationConfig;
pub use experimental_config::ExperimentalConfig;
pub use grouping_config::GroupingConfig;
pub use inheritance_config::InheritanceConfig;
pub use observability_config::ObservabilityConfig;
pub use signature_config::{SignatureConfig, ThresholdTier};
pub use similarity_config::SimilarityConfig;
