use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Fraction of the largest signature weight-sum a distance must reach.
    pub cutoff_ratio: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            cutoff_ratio: defaults::DEFAULT_CUTOFF_RATIO,
        }
    }
}
