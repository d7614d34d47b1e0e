use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ClusterId, ExternalId};
use crate::cards::CardId;
use crate::errors::DataError;

/// Card id → copy count for one deck list.
pub type DeckCards = BTreeMap<CardId, u32>;

/// Cluster-assignment tags written onto an observation by its owning cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub cluster_id: ClusterId,
    pub archetype_name: String,
    #[serde(default)]
    pub external_id: Option<ExternalId>,
}

/// One distinct deck list seen in the wild, weighted by how often it was seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckObservation {
    pub cards: DeckCards,
    /// Frequency weight used wherever prevalence is computed. Always ≥ 1.
    pub observations: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<ClusterAssignment>,
    /// Auxiliary metadata (short ids, deck strings, ...) carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl DeckObservation {
    pub fn new(cards: DeckCards, observations: u64) -> Result<Self, DataError> {
        let deck = Self {
            cards,
            observations,
            assignment: None,
            metadata: BTreeMap::new(),
        };
        deck.validate()?;
        Ok(deck)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Rejects observations that carry no frequency weight.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.observations == 0 {
            return Err(DataError::ZeroObservations);
        }
        Ok(())
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains_key(&card)
    }

    pub fn cluster_id(&self) -> Option<ClusterId> {
        self.assignment.as_ref().map(|a| a.cluster_id)
    }

    pub(crate) fn assign(
        &mut self,
        cluster_id: ClusterId,
        archetype_name: &str,
        external_id: Option<ExternalId>,
    ) {
        self.assignment = Some(ClusterAssignment {
            cluster_id,
            archetype_name: archetype_name.to_string(),
            external_id,
        });
    }
}
