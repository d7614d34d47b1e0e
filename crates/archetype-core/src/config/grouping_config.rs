use serde::{Deserialize, Serialize};

use super::defaults;

/// Initial deck grouping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Minimum cluster size for HDBSCAN.
    pub min_cluster_size: usize,
    /// Neighbourhood size for HDBSCAN core distances.
    pub min_samples: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: defaults::DEFAULT_MIN_CLUSTER_SIZE,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
        }
    }
}
