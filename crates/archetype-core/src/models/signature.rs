use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::cards::{CardDatabase, CardId};

/// Sparse card-id → weight mapping summarizing a group of decks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSignature(BTreeMap<CardId, f64>);

impl CardSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card: CardId) -> Option<f64> {
        self.0.get(&card).copied()
    }

    pub fn insert(&mut self, card: CardId, weight: f64) {
        self.0.insert(card, weight);
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.0.contains_key(&card)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, f64)> + '_ {
        self.0.iter().map(|(&c, &w)| (c, w))
    }

    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.0.keys().copied()
    }

    /// Sum of all weights: the maximum score a deck can reach against this signature.
    pub fn total_weight(&self) -> f64 {
        self.0.values().sum()
    }

    /// Cards whose weight is at least `floor`.
    pub fn significant_cards(&self, floor: f64) -> BTreeSet<CardId> {
        self.0
            .iter()
            .filter(|(_, &w)| w >= floor)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Entries ordered by descending weight, ties by ascending card id.
    pub fn sorted_by_weight(&self) -> Vec<(CardId, f64)> {
        let mut entries: Vec<(CardId, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Human-readable `Name:weight` listing, heaviest first.
    pub fn pretty(&self, cards: &dyn CardDatabase, sep: &str) -> String {
        self.sorted_by_weight()
            .into_iter()
            .map(|(card, w)| format!("{}:{}", cards.card_name(card), round_to(w, 4)))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl FromIterator<(CardId, f64)> for CardSignature {
    fn from_iter<I: IntoIterator<Item = (CardId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<CardId, f64>> for CardSignature {
    fn from(map: BTreeMap<CardId, f64>) -> Self {
        Self(map)
    }
}

impl IntoIterator for CardSignature {
    type Item = (CardId, f64);
    type IntoIter = btree_map::IntoIter<CardId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
