//! Top-level archetype engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ClassificationConfig, ConsolidationConfig, ExperimentalConfig, GroupingConfig,
    InheritanceConfig, ObservabilityConfig, SignatureConfig, SimilarityConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ARCHETYPE_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArchetypeConfig {
    pub signatures: SignatureConfig,
    pub similarity: SimilarityConfig,
    pub consolidation: ConsolidationConfig,
    pub inheritance: InheritanceConfig,
    pub experimental: ExperimentalConfig,
    pub classification: ClassificationConfig,
    pub grouping: GroupingConfig,
    pub observability: ObservabilityConfig,
}

impl ArchetypeConfig {
    /// Load `path`, apply environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: ArchetypeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ArchetypeConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ARCHETYPE_*` overrides read through `lookup`.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parsed(&lookup, "ARCHETYPE_USE_THRESHOLDS") {
            self.signatures.use_thresholds = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_USE_PCP") {
            self.signatures.use_pcp = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_PCP_EXPONENT") {
            self.signatures.pcp_exponent = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_USE_CCP") {
            self.signatures.use_ccp = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_SIGNIFICANCE_FLOOR") {
            self.similarity.significance_floor = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_MERGE_SIMILARITY") {
            self.consolidation.merge_similarity = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_CONSOLIDATE") {
            self.consolidation.consolidate = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_INHERITANCE_THRESHOLD") {
            self.inheritance.threshold = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_EXPERIMENTAL_THRESHOLD_PCT") {
            self.experimental.threshold_pct = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_SMALL_CLUSTER_CUTOFF") {
            self.experimental.small_cluster_cutoff = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_CUTOFF_RATIO") {
            self.classification.cutoff_ratio = v;
        }
        if let Some(v) = parsed(&lookup, "ARCHETYPE_MIN_CLUSTER_SIZE") {
            self.grouping.min_cluster_size = v;
        }
        if let Some(v) = lookup("ARCHETYPE_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in &self.signatures.tiers {
            if !(tier.threshold > 0.0 && tier.threshold <= 1.0) {
                return Err(invalid("signatures.tiers.threshold", "must be in (0.0, 1.0]"));
            }
            if !tier.weight.is_finite() || tier.weight < 0.0 {
                return Err(invalid("signatures.tiers.weight", "must be finite and >= 0.0"));
            }
        }
        unit_interval("signatures.pcp_threshold", self.signatures.pcp_threshold)?;
        if self.signatures.pcp_exponent < 1 {
            return Err(invalid("signatures.pcp_exponent", "must be at least 1"));
        }
        if !self.signatures.ccp_inclusion_cutoff.is_finite()
            || self.signatures.ccp_inclusion_cutoff < 0.0
        {
            return Err(invalid(
                "signatures.ccp_inclusion_cutoff",
                "must be finite and >= 0.0",
            ));
        }
        unit_interval("similarity.significance_floor", self.similarity.significance_floor)?;
        unit_interval("consolidation.merge_similarity", self.consolidation.merge_similarity)?;
        unit_interval("inheritance.threshold", self.inheritance.threshold)?;
        unit_interval("experimental.threshold_pct", self.experimental.threshold_pct)?;
        unit_interval("classification.cutoff_ratio", self.classification.cutoff_ratio)?;
        if self.grouping.min_cluster_size < 2 {
            return Err(invalid("grouping.min_cluster_size", "must be at least 2"));
        }
        if self.grouping.min_samples < 1 {
            return Err(invalid("grouping.min_samples", "must be at least 1"));
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
