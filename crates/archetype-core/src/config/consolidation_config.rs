use serde::{Deserialize, Serialize};

use super::defaults;

/// Consolidation subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Similarity floor below which the merge loop stops.
    pub merge_similarity: f64,
    /// Run the merge loop at all.
    pub consolidate: bool,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            merge_similarity: defaults::DEFAULT_MERGE_SIMILARITY,
            consolidate: defaults::DEFAULT_CONSOLIDATE,
        }
    }
}
