//! ClassificationEngine: pick the archetype whose signature best covers a deck.
//!
//! Distance is the weighted overlap `Σ weight × count` over signature cards
//! present in the deck, scaled by the archetype's normalizer. An archetype
//! qualifies when its distance is positive, reaches the cutoff, and it passes
//! both gates (required cards, then false-positive rules). The highest
//! distance wins; ties keep the first candidate in the order given.

use serde::Serialize;

use archetype_core::config::ArchetypeConfig;
use archetype_core::errors::ArchetypeResult;
use archetype_core::{ArchetypeCandidate, ArchetypeContext, ArchetypeId, DeckCards};
use archetype_observability::classification_span;
use archetype_observability::tracing_setup::events;

use crate::failure::{ClassificationFailure, FailureReason};
use crate::normalizers::Normalizers;

/// Per-archetype diagnostics from [`ClassificationEngine::scores`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeScore {
    pub archetype_id: ArchetypeId,
    pub normalizer: f64,
    /// Normalized distance before any gate.
    pub distance: f64,
    /// Whether the distance clears the cutoff.
    pub above_cutoff: bool,
    /// Gate that vetoed the archetype, if any.
    pub failure: Option<FailureReason>,
}

impl ArchetypeScore {
    pub fn qualifies(&self) -> bool {
        self.above_cutoff && self.failure.is_none()
    }
}

/// Stateless deck classifier. Safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationEngine {
    cutoff_ratio: f64,
}

impl ClassificationEngine {
    pub fn new(cutoff_ratio: f64) -> Self {
        Self { cutoff_ratio }
    }

    pub fn from_config(config: &ArchetypeConfig) -> Self {
        Self::new(config.classification.cutoff_ratio)
    }

    pub fn cutoff_ratio(&self) -> f64 {
        self.cutoff_ratio
    }

    pub fn normalizers(&self, candidates: &[ArchetypeCandidate]) -> Normalizers {
        Normalizers::new(candidates, self.cutoff_ratio)
    }

    /// Classify `deck` against `candidates`.
    ///
    /// `on_failure` is called for each archetype whose distance cleared the
    /// cutoff but was vetoed by a gate. Returns `None` when nothing qualifies.
    pub fn classify(
        &self,
        deck: &DeckCards,
        candidates: &[ArchetypeCandidate],
        ctx: &ArchetypeContext<'_>,
        on_failure: Option<&dyn Fn(&ClassificationFailure)>,
    ) -> ArchetypeResult<Option<ArchetypeId>> {
        let span = classification_span!(candidates.len());
        let _guard = span.enter();

        let mut best: Option<(ArchetypeId, f64)> = None;
        for score in self.scores(deck, candidates, ctx)? {
            if let (true, Some(reason)) = (score.above_cutoff, &score.failure) {
                let failure = ClassificationFailure {
                    archetype_id: score.archetype_id,
                    reason: reason.clone(),
                    distance: score.distance,
                };
                events::classification_near_miss(
                    failure.archetype_id,
                    failure.reason.as_str(),
                    failure.distance,
                );
                if let Some(callback) = on_failure {
                    callback(&failure);
                }
            }
            if score.qualifies() && best.map_or(true, |(_, d)| score.distance > d) {
                best = Some((score.archetype_id, score.distance));
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    /// Score every candidate, in candidate order.
    ///
    /// Gates are evaluated only for archetypes that clear the cutoff; the
    /// first missing required card (ascending) is reported before any rule.
    pub fn scores(
        &self,
        deck: &DeckCards,
        candidates: &[ArchetypeCandidate],
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<Vec<ArchetypeScore>> {
        let normalizers = self.normalizers(candidates);
        let cutoff = normalizers.cutoff();

        let mut scores = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let normalizer = normalizers.get(candidate.archetype_id);
            let distance = weighted_overlap(deck, candidate) * normalizer;
            let above_cutoff = distance > 0.0 && distance >= cutoff;
            let failure = if above_cutoff {
                gate(deck, candidate, ctx)?
            } else {
                None
            };
            scores.push(ArchetypeScore {
                archetype_id: candidate.archetype_id,
                normalizer,
                distance,
                above_cutoff,
                failure,
            });
        }
        Ok(scores)
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::from_config(&ArchetypeConfig::default())
    }
}

/// `Σ weight × count` over signature cards present in the deck.
fn weighted_overlap(deck: &DeckCards, candidate: &ArchetypeCandidate) -> f64 {
    candidate
        .signature_weights
        .iter()
        .filter_map(|(card, weight)| deck.get(&card).map(|&count| weight * f64::from(count)))
        .sum()
}

fn gate(
    deck: &DeckCards,
    candidate: &ArchetypeCandidate,
    ctx: &ArchetypeContext<'_>,
) -> ArchetypeResult<Option<FailureReason>> {
    if let Some(&card) = candidate
        .required_cards
        .iter()
        .find(|&&card| !deck.contains_key(&card))
    {
        return Ok(Some(FailureReason::MissingRequiredCard { card }));
    }
    Ok(ctx
        .first_failing_rule(&candidate.rules, deck)?
        .map(|rule| FailureReason::FalsePositive {
            rule: rule.to_string(),
        }))
}
