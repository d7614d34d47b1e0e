//! Player-class prevalence (PCP) dampening.
//!
//! Staple cards that show up in most decks of a class say little about which
//! archetype a deck belongs to. Their per-cluster prevalence is scaled by
//! `1 - class_prevalence^exponent` once the class-wide prevalence passes a
//! threshold.

use std::collections::BTreeMap;

use archetype_core::cards::{CardDatabase, CardId};
use archetype_core::DeckObservation;

/// Observation-weighted prevalence of every card across a whole class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassPrevalence {
    prevalence: BTreeMap<CardId, f64>,
}

impl ClassPrevalence {
    /// Prevalence over every deck of the class. Empty input gives an empty table.
    pub fn from_decks<'a>(decks: impl IntoIterator<Item = &'a DeckObservation>) -> Self {
        let (counts, total) = card_counts(decks);
        if total == 0 {
            return Self::default();
        }
        let prevalence = counts
            .into_iter()
            .map(|(card, count)| (card, count as f64 / total as f64))
            .collect();
        Self { prevalence }
    }

    pub fn get(&self, card: CardId) -> f64 {
        self.prevalence.get(&card).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.prevalence.is_empty()
    }

    /// Multiplier for `card`'s cluster prevalence.
    ///
    /// 1.0 unless the class prevalence exceeds `threshold`. When `cards` is
    /// given, only cards from evergreen sets are dampened; cards the database
    /// does not know are left alone.
    pub fn modifier(
        &self,
        card: CardId,
        threshold: f64,
        exponent: i32,
        cards: Option<&dyn CardDatabase>,
    ) -> f64 {
        let class_prevalence = self.get(card);
        if class_prevalence <= threshold {
            return 1.0;
        }
        if let Some(db) = cards {
            let evergreen = db.card(card).is_some_and(|info| info.is_evergreen());
            if !evergreen {
                return 1.0;
            }
        }
        1.0 - class_prevalence.powi(exponent)
    }
}

/// Per-card observation counts and the total observation weight.
pub(crate) fn card_counts<'a>(
    decks: impl IntoIterator<Item = &'a DeckObservation>,
) -> (BTreeMap<CardId, u64>, u64) {
    let mut counts: BTreeMap<CardId, u64> = BTreeMap::new();
    let mut total = 0u64;
    for deck in decks {
        total += deck.observations;
        for &card in deck.cards.keys() {
            *counts.entry(card).or_default() += deck.observations;
        }
    }
    (counts, total)
}
