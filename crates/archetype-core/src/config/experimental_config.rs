use serde::{Deserialize, Serialize};

use super::defaults;

/// Experimental cluster extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalConfig {
    /// Share of a class's observations a cluster needs to stay out of
    /// the experimental cluster.
    pub threshold_pct: f64,
    /// Threshold for classes without a computed one.
    pub small_cluster_cutoff: u64,
}

impl ExperimentalConfig {
    /// `floor(class_observations * threshold_pct)`.
    pub fn threshold_for(&self, class_observations: u64) -> u64 {
        (class_observations as f64 * self.threshold_pct).floor() as u64
    }
}

impl Default for ExperimentalConfig {
    fn default() -> Self {
        Self {
            threshold_pct: defaults::DEFAULT_EXPERIMENTAL_THRESHOLD_PCT,
            small_cluster_cutoff: defaults::DEFAULT_SMALL_CLUSTER_CUTOFF,
        }
    }
}
