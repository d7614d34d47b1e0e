//! Default [`DeckGrouper`]: HDBSCAN on deck feature vectors.
//!
//! Noise points become singleton groups so every deck lands in exactly one
//! group; consolidation decides later whether they join anything.

use std::collections::BTreeMap;

use hdbscan::{Hdbscan, HdbscanHyperParams};
use tracing::debug;

use archetype_core::config::GroupingConfig;
use archetype_core::errors::{ArchetypeResult, GroupingError};
use archetype_core::traits::{validate_partition, DeckGrouper};
use archetype_core::{ArchetypeContext, DeckObservation, PlayerClass};

use super::features::FeatureBuilder;

/// HDBSCAN-backed deck grouper.
#[derive(Debug, Clone, Copy)]
pub struct HdbscanGrouper<'a> {
    min_cluster_size: usize,
    min_samples: usize,
    features: FeatureBuilder<'a>,
}

impl HdbscanGrouper<'static> {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            min_cluster_size: config.min_cluster_size,
            min_samples: config.min_samples,
            features: FeatureBuilder::new(),
        }
    }
}

impl<'a> HdbscanGrouper<'a> {
    /// Feature vectors also carry rule outcomes and, optionally, the mana curve.
    pub fn with_context<'b>(self, ctx: ArchetypeContext<'b>, use_mana_curve: bool) -> HdbscanGrouper<'b> {
        HdbscanGrouper {
            min_cluster_size: self.min_cluster_size,
            min_samples: self.min_samples,
            features: FeatureBuilder::with_context(ctx, use_mana_curve),
        }
    }

    fn singletons(len: usize) -> Vec<Vec<usize>> {
        (0..len).map(|i| vec![i]).collect()
    }
}

impl DeckGrouper for HdbscanGrouper<'_> {
    fn group(
        &self,
        player_class: PlayerClass,
        decks: &[DeckObservation],
    ) -> ArchetypeResult<Vec<Vec<usize>>> {
        if decks.len() < self.min_cluster_size {
            return Ok(Self::singletons(decks.len()));
        }

        let features = self.features.build(decks);
        if features.first().map_or(true, |row| row.is_empty()) {
            return Ok(vec![(0..decks.len()).collect()]);
        }

        let hyper_params = HdbscanHyperParams::builder()
            .min_cluster_size(self.min_cluster_size)
            .min_samples(self.min_samples)
            .build();
        let labels = Hdbscan::new(&features, hyper_params)
            .cluster()
            .map_err(|e| GroupingError::GroupingFailed {
                reason: format!("{e:?}"),
            })?;

        let mut by_label: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        let mut noise = Vec::new();
        for (idx, &label) in labels.iter().enumerate() {
            if label < 0 {
                noise.push(idx);
            } else {
                by_label.entry(label).or_default().push(idx);
            }
        }

        debug!(
            player_class = %player_class,
            decks = decks.len(),
            groups = by_label.len(),
            noise = noise.len(),
            "hdbscan grouping complete"
        );

        let mut groups: Vec<Vec<usize>> = by_label.into_values().collect();
        groups.extend(noise.into_iter().map(|idx| vec![idx]));
        validate_partition(&groups, decks.len())?;
        Ok(groups)
    }

    fn name(&self) -> &str {
        "hdbscan"
    }
}
