//! Weighted Jaccard-style overlap between two card signatures.
//!
//! A card is present in a signature when its weight reaches the significance
//! floor. The union is the set of cards present in either signature, the
//! intersection the set present in both. Union values are the average weight
//! for cards both raw signatures carry, the one-sided weight otherwise;
//! intersection values shrink the average by the relative gap between the two
//! weights. The score is `Σ intersection / Σ union`, or 0 for an empty union.

use serde::Serialize;

use archetype_core::cards::{CardDatabase, CardId};
use archetype_core::config::defaults::DEFAULT_SIGNIFICANCE_FLOOR;
use archetype_core::config::SimilarityConfig;
use archetype_core::CardSignature;

/// A card present in both signatures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedCard {
    pub card: CardId,
    pub first: f64,
    pub second: f64,
    pub union_value: f64,
    pub intersection_value: f64,
}

/// Per-card view of a similarity computation, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub score: f64,
    pub intersection_weight: f64,
    pub union_weight: f64,
    /// Cards present in both signatures, highest intersection value first.
    pub intersection: Vec<SharedCard>,
    /// Cards present in only one signature with their union value, highest first.
    pub difference: Vec<(CardId, f64)>,
}

impl SimilarityBreakdown {
    /// Human-readable rendering with card names, three decimals per weight.
    pub fn describe(&self, cards: &dyn CardDatabase) -> String {
        let intersection = self
            .intersection
            .iter()
            .map(|s| format!("{}:{:.3}", cards.card_name(s.card), s.intersection_value))
            .collect::<Vec<_>>()
            .join(", ");
        let union = self
            .intersection
            .iter()
            .map(|s| format!("{}:{:.3}", cards.card_name(s.card), s.union_value))
            .collect::<Vec<_>>()
            .join(", ");
        let difference = self
            .difference
            .iter()
            .map(|(card, w)| format!("{}:{:.3}", cards.card_name(*card), w))
            .collect::<Vec<_>>()
            .join(", ");
        format!("INTERSECTION: [{intersection}] UNION: [{union}] DIFFERENCE: [{difference}]")
    }
}

/// Signature similarity with a configurable significance floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    significance_floor: f64,
}

impl SimilarityScorer {
    pub fn new(significance_floor: f64) -> Self {
        Self { significance_floor }
    }

    pub fn from_config(config: &SimilarityConfig) -> Self {
        Self::new(config.significance_floor)
    }

    pub fn significance_floor(&self) -> f64 {
        self.significance_floor
    }

    /// Similarity in `[0, 1]`. Symmetric.
    pub fn score(&self, first: &CardSignature, second: &CardSignature) -> f64 {
        self.breakdown(first, second).score
    }

    pub fn breakdown(&self, first: &CardSignature, second: &CardSignature) -> SimilarityBreakdown {
        let present_first = first.significant_cards(self.significance_floor);
        let present_second = second.significant_cards(self.significance_floor);

        let mut intersection = Vec::new();
        let mut difference = Vec::new();
        let mut intersection_weight = 0.0;
        let mut union_weight = 0.0;

        for &card in present_first.union(&present_second) {
            let in_both = present_first.contains(&card) && present_second.contains(&card);
            let (union_value, intersection_value) = match (first.get(card), second.get(card)) {
                (Some(a), Some(b)) => {
                    let union_value = (a + b) / 2.0;
                    let max = a.max(b);
                    let modifier = if max > 0.0 {
                        (max - (a - b).abs()) / max
                    } else {
                        0.0
                    };
                    (union_value, modifier * union_value)
                }
                (Some(w), None) | (None, Some(w)) => (w, 0.0),
                (None, None) => continue,
            };

            union_weight += union_value;
            if in_both {
                intersection_weight += intersection_value;
                intersection.push(SharedCard {
                    card,
                    first: first.get(card).unwrap_or_default(),
                    second: second.get(card).unwrap_or_default(),
                    union_value,
                    intersection_value,
                });
            } else {
                difference.push((card, union_value));
            }
        }

        intersection.sort_by(|a, b| b.intersection_value.total_cmp(&a.intersection_value));
        difference.sort_by(|a, b| b.1.total_cmp(&a.1));

        let score = if union_weight == 0.0 {
            0.0
        } else {
            intersection_weight / union_weight
        };

        SimilarityBreakdown {
            score,
            intersection_weight,
            union_weight,
            intersection,
            difference,
        }
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNIFICANCE_FLOOR)
    }
}
