use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CardSignature, ClusterId, DeckObservation, ExternalId};
use crate::cards::{CardDatabase, CardId};
use crate::constants::{EXPERIMENTAL_CLUSTER_ID, EXPERIMENTAL_CLUSTER_NAME, NEW_CLUSTER_NAME};
use crate::context::ArchetypeContext;
use crate::errors::ArchetypeResult;

/// A group of deck observations that share a strategy.
///
/// Invariant: every observation contains every card in `required_cards` and
/// satisfies every rule in `rules`. The signature is derived from the
/// observations and is recomputed whenever membership changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: ClusterId,
    #[serde(default)]
    pub external_id: Option<ExternalId>,
    pub name: String,
    #[serde(default)]
    pub signature: CardSignature,
    #[serde(default)]
    pub ccp_signature: Option<CardSignature>,
    #[serde(default)]
    pub required_cards: BTreeSet<CardId>,
    #[serde(default)]
    pub rules: BTreeSet<String>,
    pub data_points: Vec<DeckObservation>,
}

impl Cluster {
    /// Create a cluster with no curated identity. Id `-1` yields the
    /// experimental cluster.
    pub fn new(cluster_id: ClusterId, data_points: Vec<DeckObservation>) -> Self {
        let name = if cluster_id == EXPERIMENTAL_CLUSTER_ID {
            EXPERIMENTAL_CLUSTER_NAME
        } else {
            NEW_CLUSTER_NAME
        };
        let mut cluster = Self {
            cluster_id,
            external_id: None,
            name: name.to_string(),
            signature: CardSignature::new(),
            ccp_signature: None,
            required_cards: BTreeSet::new(),
            rules: BTreeSet::new(),
            data_points,
        };
        cluster.tag_data_points();
        cluster
    }

    pub fn with_identity(mut self, external_id: ExternalId, name: impl Into<String>) -> Self {
        self.external_id = Some(external_id);
        self.name = name.into();
        self.tag_data_points();
        self
    }

    pub fn with_required_cards(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.required_cards.extend(cards);
        self
    }

    pub fn with_rules<S: Into<String>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn is_experimental(&self) -> bool {
        self.cluster_id == EXPERIMENTAL_CLUSTER_ID
    }

    /// Has a curator-assigned identity.
    pub fn is_curated(&self) -> bool {
        self.external_id.is_some() && !self.is_experimental()
    }

    /// Total observation weight across all member decks.
    pub fn observations(&self) -> u64 {
        self.data_points.iter().map(|d| d.observations).sum()
    }

    pub fn single_deck_max_observations(&self) -> Option<u64> {
        self.data_points.iter().map(|d| d.observations).max()
    }

    pub fn most_popular_deck(&self) -> Option<&DeckObservation> {
        self.top_decks(1).into_iter().next()
    }

    /// The `n` most observed decks, most observed first.
    pub fn top_decks(&self, n: usize) -> Vec<&DeckObservation> {
        let mut decks: Vec<&DeckObservation> = self.data_points.iter().collect();
        decks.sort_by(|a, b| b.observations.cmp(&a.observations));
        decks.truncate(n);
        decks
    }

    /// Every member deck satisfies every named rule.
    pub fn satisfies_rules(
        &self,
        rules: &BTreeSet<String>,
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<bool> {
        for rule in rules {
            for deck in &self.data_points {
                if !ctx.rule_holds(rule, &deck.cards)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Every member deck includes every listed card.
    pub fn satisfies_required_cards(&self, required_cards: &BTreeSet<CardId>) -> bool {
        required_cards
            .iter()
            .all(|&card| self.data_points.iter().all(|d| d.contains(card)))
    }

    /// Two curated identities that differ can never be merged.
    pub fn external_id_conflicts(&self, other: &Cluster) -> bool {
        matches!((self.external_id, other.external_id), (Some(a), Some(b)) if a != b)
    }

    /// Merge eligibility: each side's rules and required cards hold for the
    /// other side's decks, and the curated identities do not conflict.
    pub fn can_merge(&self, other: &Cluster, ctx: &ArchetypeContext<'_>) -> ArchetypeResult<bool> {
        if self.external_id_conflicts(other) {
            return Ok(false);
        }
        let other_satisfies_self = other.satisfies_rules(&self.rules, ctx)?
            && other.satisfies_required_cards(&self.required_cards);
        if !other_satisfies_self {
            return Ok(false);
        }
        let self_satisfies_other = self.satisfies_rules(&other.rules, ctx)?
            && self.satisfies_required_cards(&other.required_cards);
        Ok(self_satisfies_other)
    }

    /// Both sides carry the same curated identity and are merge-eligible.
    pub fn must_merge(&self, other: &Cluster, ctx: &ArchetypeContext<'_>) -> ArchetypeResult<bool> {
        let same_identity = matches!(
            (self.external_id, other.external_id),
            (Some(a), Some(b)) if a == b
        );
        Ok(same_identity && self.can_merge(other, ctx)?)
    }

    /// Copy curated identity from last period's matching cluster. Membership
    /// is unchanged.
    pub fn inherit_from(&mut self, previous: &Cluster) {
        self.name = previous.name.clone();
        self.external_id = previous.external_id;
        self.required_cards = previous.required_cards.clone();
        self.tag_data_points();
    }

    /// Required cards that some member deck lacks.
    pub fn unsatisfied_required_cards(&self) -> Vec<CardId> {
        self.required_cards
            .iter()
            .copied()
            .filter(|&card| !self.data_points.iter().all(|d| d.contains(card)))
            .collect()
    }

    pub fn pretty_signature(&self, cards: &dyn CardDatabase) -> String {
        self.signature.pretty(cards, ", ")
    }

    pub fn pretty_ccp_signature(&self, cards: &dyn CardDatabase) -> String {
        self.ccp_signature
            .as_ref()
            .map(|s| s.pretty(cards, ", "))
            .unwrap_or_default()
    }

    pub(crate) fn tag_data_points(&mut self) {
        let (id, name, external_id) = (self.cluster_id, self.name.clone(), self.external_id);
        for deck in &mut self.data_points {
            deck.assign(id, &name, external_id);
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sig = self
            .signature
            .sorted_by_weight()
            .into_iter()
            .map(|(card, w)| format!("{}:{:.2}", card, w))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Cluster {} - {} data points ({} games) - {}",
            self.cluster_id,
            self.data_points.len(),
            self.observations(),
            sig
        )
    }
}
