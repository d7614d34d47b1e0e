//! Signature calculation for clusters and whole classes.

use std::collections::BTreeMap;

use tracing::debug;

use archetype_core::cards::CardDatabase;
use archetype_core::config::{SignatureConfig, ThresholdTier};
use archetype_core::{CardSignature, ClassCluster, ClusterId, DeckObservation};

use crate::prevalence::class_prevalence::{card_counts, ClassPrevalence};
use crate::prevalence::cross_cluster::apply_cross_cluster_prevalence;

/// Computes card signatures from deck observations.
#[derive(Debug, Clone)]
pub struct SignatureCalculator {
    config: SignatureConfig,
    tiers: Vec<ThresholdTier>,
}

impl SignatureCalculator {
    pub fn new(config: SignatureConfig) -> Self {
        let tiers = config.sorted_tiers();
        Self { config, tiers }
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// Tiered weighting is only used when requested and a tier table exists.
    fn tiered(&self) -> bool {
        self.config.use_thresholds && !self.tiers.is_empty()
    }

    /// Signature of a single cluster.
    ///
    /// `pcp` enables class-prevalence dampening; `cards` restricts dampening
    /// to evergreen cards. Empty or zero-weight input gives an empty
    /// signature.
    pub fn cluster_signature(
        &self,
        decks: &[DeckObservation],
        pcp: Option<&ClassPrevalence>,
        cards: Option<&dyn CardDatabase>,
    ) -> CardSignature {
        let (counts, total) = card_counts(decks);
        if total == 0 {
            return CardSignature::new();
        }

        let mut signature = CardSignature::new();
        for (card, count) in counts {
            let mut prevalence = count as f64 / total as f64;
            if let Some(pcp) = pcp {
                prevalence *= pcp.modifier(
                    card,
                    self.config.pcp_threshold,
                    self.config.pcp_exponent,
                    cards,
                );
            }

            if self.tiered() {
                if let Some(tier) = self.tiers.iter().find(|t| prevalence >= t.threshold) {
                    signature.insert(card, tier.weight * prevalence);
                }
            } else {
                signature.insert(card, prevalence);
            }
        }
        signature
    }

    /// Signatures for a group of sibling clusters, optionally followed by the
    /// cross-cluster-prevalence pass over that same group.
    pub fn signatures(
        &self,
        clusters: &[(ClusterId, &[DeckObservation])],
        pcp: Option<&ClassPrevalence>,
        cards: Option<&dyn CardDatabase>,
        use_ccp: bool,
    ) -> BTreeMap<ClusterId, CardSignature> {
        let raw: BTreeMap<ClusterId, CardSignature> = clusters
            .iter()
            .map(|&(id, decks)| (id, self.cluster_signature(decks, pcp, cards)))
            .collect();
        if !use_ccp {
            return raw;
        }

        raw.iter()
            .map(|(&id, weights)| {
                let others: Vec<&CardSignature> = raw
                    .iter()
                    .filter(|&(&other_id, _)| other_id != id)
                    .map(|(_, sig)| sig)
                    .collect();
                let scaled = apply_cross_cluster_prevalence(
                    weights,
                    &others,
                    self.config.ccp_inclusion_cutoff,
                );
                (id, scaled)
            })
            .collect()
    }

    /// Refresh every cluster's `signature` and, for curated clusters, the
    /// `ccp_signature` computed against the other curated clusters only.
    pub fn update_cluster_signatures(
        &self,
        class_cluster: &mut ClassCluster,
        cards: Option<&dyn CardDatabase>,
    ) {
        let pcp = self.config.use_pcp.then(|| {
            ClassPrevalence::from_decks(
                class_cluster
                    .clusters
                    .iter()
                    .flat_map(|c| c.data_points.iter()),
            )
        });
        let pcp = pcp.as_ref();

        let all: Vec<(ClusterId, &[DeckObservation])> = class_cluster
            .clusters
            .iter()
            .map(|c| (c.cluster_id, c.data_points.as_slice()))
            .collect();
        let mut signatures = self.signatures(&all, pcp, cards, false);

        let mut ccp_signatures = if self.config.use_ccp {
            let curated: Vec<(ClusterId, &[DeckObservation])> = class_cluster
                .curated()
                .map(|c| (c.cluster_id, c.data_points.as_slice()))
                .collect();
            self.signatures(&curated, pcp, cards, true)
        } else {
            BTreeMap::new()
        };

        for cluster in &mut class_cluster.clusters {
            cluster.signature = signatures.remove(&cluster.cluster_id).unwrap_or_default();
            cluster.ccp_signature = ccp_signatures.remove(&cluster.cluster_id);
        }

        debug!(
            player_class = %class_cluster.player_class,
            clusters = class_cluster.clusters.len(),
            "updated cluster signatures"
        );
    }
}

impl Default for SignatureCalculator {
    fn default() -> Self {
        Self::new(SignatureConfig::default())
    }
}
