//! Span definitions per operation: pipeline, consolidation, inheritance, classification.

/// Create a cluster-set pipeline span.
#[macro_export]
macro_rules! pipeline_span {
    ($game_format:expr, $classes:expr) => {
        tracing::info_span!("archetype.pipeline", game_format = %$game_format, classes = $classes)
    };
}

/// Create a consolidation span for one player class.
#[macro_export]
macro_rules! consolidation_span {
    ($player_class:expr, $clusters:expr) => {
        tracing::info_span!(
            "archetype.consolidation",
            player_class = %$player_class,
            clusters = $clusters
        )
    };
}

/// Create an inheritance span for one player class.
#[macro_export]
macro_rules! inheritance_span {
    ($player_class:expr) => {
        tracing::info_span!("archetype.inheritance", player_class = %$player_class)
    };
}

/// Create a classification span.
#[macro_export]
macro_rules! classification_span {
    ($candidates:expr) => {
        tracing::debug_span!("archetype.classification", candidates = $candidates)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "archetype.pipeline";
    pub const CONSOLIDATION: &str = "archetype.consolidation";
    pub const INHERITANCE: &str = "archetype.inheritance";
    pub const CLASSIFICATION: &str = "archetype.classification";
}
