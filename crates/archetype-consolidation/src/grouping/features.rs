//! Per-deck feature vectors for initial grouping.
//!
//! Layout: one column per card seen in the class (copy count / 2), one
//! column per registered false-positive rule (1.0 when it holds), then,
//! with a card database, the mana curve as the share of cards in each
//! cost bucket 0..=10 (10 collects everything above).

use std::collections::BTreeMap;

use archetype_core::{ArchetypeContext, CardId, DeckObservation};

/// Number of mana-curve buckets.
pub const MANA_CURVE_BUCKETS: usize = 11;

/// Builds feature vectors for one class's decks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder<'a> {
    ctx: Option<ArchetypeContext<'a>>,
    use_mana_curve: bool,
}

impl<'a> FeatureBuilder<'a> {
    /// Card-count columns only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rule-outcome columns and, when `use_mana_curve`, the mana curve.
    pub fn with_context(ctx: ArchetypeContext<'a>, use_mana_curve: bool) -> Self {
        Self {
            ctx: Some(ctx),
            use_mana_curve,
        }
    }

    pub fn build(&self, decks: &[DeckObservation]) -> Vec<Vec<f32>> {
        let vocabulary: BTreeMap<CardId, usize> = decks
            .iter()
            .flat_map(|d| d.cards.keys().copied())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(column, card)| (card, column))
            .collect();

        decks
            .iter()
            .map(|deck| {
                let mut row = vec![0.0f32; vocabulary.len()];
                for (card, &count) in &deck.cards {
                    if let Some(&column) = vocabulary.get(card) {
                        row[column] = count as f32 / 2.0;
                    }
                }
                if let Some(ctx) = &self.ctx {
                    for (_, rule) in ctx.rules.iter() {
                        row.push(if rule(&deck.cards, ctx.cards) { 1.0 } else { 0.0 });
                    }
                    if self.use_mana_curve {
                        row.extend(mana_curve(deck, ctx));
                    }
                }
                row
            })
            .collect()
    }
}

/// Share of known cards per cost bucket. Unknown cards are skipped.
fn mana_curve(deck: &DeckObservation, ctx: &ArchetypeContext<'_>) -> [f32; MANA_CURVE_BUCKETS] {
    let mut curve = [0.0f32; MANA_CURVE_BUCKETS];
    let mut total = 0u32;
    for (&card, &count) in &deck.cards {
        if let Some(info) = ctx.cards.card(card) {
            let bucket = (info.cost.max(0) as usize).min(MANA_CURVE_BUCKETS - 1);
            curve[bucket] += count as f32;
            total += count;
        }
    }
    if total > 0 {
        for value in &mut curve {
            *value /= total as f32;
        }
    }
    curve
}
