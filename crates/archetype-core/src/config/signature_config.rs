use serde::{Deserialize, Serialize};

use super::defaults;

/// One row of the tier table: prevalence at or above `threshold` is
/// multiplied by `weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTier {
    pub threshold: f64,
    pub weight: f64,
}

/// Signature calculation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Tiered weighting instead of raw prevalence.
    pub use_thresholds: bool,
    /// Dampen cards that are common across the whole player class.
    pub use_pcp: bool,
    /// Class prevalence above which dampening applies.
    pub pcp_threshold: f64,
    /// Exponent in `1 - class_prevalence^exponent`.
    pub pcp_exponent: i32,
    /// Compute cross-cluster prevalence signatures for curated clusters.
    pub use_ccp: bool,
    /// Minimum weight for a card to count as present in another cluster.
    pub ccp_inclusion_cutoff: f64,
    /// Tier table for tiered weighting. Order does not matter.
    pub tiers: Vec<ThresholdTier>,
}

impl SignatureConfig {
    /// Tiers sorted highest threshold first.
    pub fn sorted_tiers(&self) -> Vec<ThresholdTier> {
        let mut tiers = self.tiers.clone();
        tiers.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        tiers
    }
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            use_thresholds: defaults::DEFAULT_USE_THRESHOLDS,
            use_pcp: defaults::DEFAULT_USE_PCP,
            pcp_threshold: defaults::DEFAULT_PCP_THRESHOLD,
            pcp_exponent: defaults::DEFAULT_PCP_EXPONENT,
            use_ccp: defaults::DEFAULT_USE_CCP,
            ccp_inclusion_cutoff: defaults::DEFAULT_CCP_INCLUSION_CUTOFF,
            tiers: defaults::DEFAULT_SIGNATURE_TIERS
                .iter()
                .map(|&(threshold, weight)| ThresholdTier { threshold, weight })
                .collect(),
        }
    }
}
