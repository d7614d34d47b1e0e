use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ArchetypeId, CardSignature, Cluster};
use crate::cards::CardId;

/// An archetype as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCandidate {
    pub archetype_id: ArchetypeId,
    pub signature_weights: CardSignature,
    #[serde(default)]
    pub required_cards: BTreeSet<CardId>,
    #[serde(default)]
    pub rules: BTreeSet<String>,
}

impl ArchetypeCandidate {
    pub fn new(archetype_id: ArchetypeId, signature_weights: CardSignature) -> Self {
        Self {
            archetype_id,
            signature_weights,
            required_cards: BTreeSet::new(),
            rules: BTreeSet::new(),
        }
    }

    pub fn with_required_cards(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.required_cards.extend(cards);
        self
    }

    pub fn with_rules<S: Into<String>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Candidate for a curated cluster, keyed by its external id. Uses the
    /// cross-cluster-prevalence signature when one was computed.
    pub fn from_cluster(cluster: &Cluster) -> Option<Self> {
        let archetype_id = cluster.external_id?;
        let signature_weights = match &cluster.ccp_signature {
            Some(ccp) if !ccp.is_empty() => ccp.clone(),
            _ => cluster.signature.clone(),
        };
        Some(Self {
            archetype_id,
            signature_weights,
            required_cards: cluster.required_cards.clone(),
            rules: cluster.rules.clone(),
        })
    }
}
