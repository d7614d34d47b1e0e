use serde::{Deserialize, Serialize};

use super::defaults;

/// Signature similarity configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Weight at which a card counts as present in a signature.
    pub significance_floor: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            significance_floor: defaults::DEFAULT_SIGNIFICANCE_FLOOR,
        }
    }
}
