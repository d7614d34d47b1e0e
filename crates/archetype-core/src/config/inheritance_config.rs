use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InheritanceConfig {
    /// Minimum similarity for a new cluster to take over a previous identity.
    pub threshold: f64,
}

impl Default for InheritanceConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_INHERITANCE_THRESHOLD,
        }
    }
}
