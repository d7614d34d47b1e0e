//! Per-archetype score normalizers and the classification cutoff.

use std::collections::BTreeMap;

use archetype_core::config::defaults::DEFAULT_CUTOFF_RATIO;
use archetype_core::{ArchetypeCandidate, ArchetypeId};

/// Scale factors that put every archetype on the largest signature's scale.
///
/// The archetype with the largest weight-sum `M` (first on ties) gets 1.0,
/// every other archetype `M / own_sum`, and 0.0 when its own sum is zero.
/// The cutoff is `cutoff_ratio * M`.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizers {
    factors: BTreeMap<ArchetypeId, f64>,
    largest: Option<ArchetypeId>,
    max_weight_sum: f64,
    cutoff: f64,
}

impl Normalizers {
    pub fn new(candidates: &[ArchetypeCandidate], cutoff_ratio: f64) -> Self {
        let mut largest = None;
        let mut max_weight_sum = 0.0;
        for candidate in candidates {
            let sum = candidate.signature_weights.total_weight();
            if sum > max_weight_sum {
                max_weight_sum = sum;
                largest = Some(candidate.archetype_id);
            }
        }

        let factors = candidates
            .iter()
            .map(|candidate| {
                let factor = if Some(candidate.archetype_id) == largest {
                    1.0
                } else {
                    let sum = candidate.signature_weights.total_weight();
                    if sum > 0.0 {
                        max_weight_sum / sum
                    } else {
                        0.0
                    }
                };
                (candidate.archetype_id, factor)
            })
            .collect();

        Self {
            factors,
            largest,
            max_weight_sum,
            cutoff: cutoff_ratio * max_weight_sum,
        }
    }

    pub fn get(&self, archetype_id: ArchetypeId) -> f64 {
        self.factors.get(&archetype_id).copied().unwrap_or(0.0)
    }

    /// Archetype whose signature has the largest weight-sum.
    pub fn largest(&self) -> Option<ArchetypeId> {
        self.largest
    }

    pub fn max_weight_sum(&self) -> f64 {
        self.max_weight_sum
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl From<&[ArchetypeCandidate]> for Normalizers {
    fn from(candidates: &[ArchetypeCandidate]) -> Self {
        Self::new(candidates, DEFAULT_CUTOFF_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use archetype_core::CardSignature;

    use super::*;

    fn candidate(id: ArchetypeId, weights: &[(u32, f64)]) -> ArchetypeCandidate {
        ArchetypeCandidate::new(id, weights.iter().copied().collect::<CardSignature>())
    }

    #[test]
    fn largest_signature_sets_the_scale() {
        let candidates = vec![
            candidate(1, &[(1, 1.0), (2, 1.0)]),
            candidate(2, &[(3, 1.0), (4, 1.0), (5, 2.0)]),
            candidate(3, &[]),
        ];
        let n = Normalizers::from(candidates.as_slice());
        assert_eq!(n.largest(), Some(2));
        assert_eq!(n.max_weight_sum(), 4.0);
        assert_eq!(n.get(2), 1.0);
        assert_eq!(n.get(1), 2.0);
        assert_eq!(n.get(3), 0.0);
        assert_eq!(n.cutoff(), 1.0);
    }

    #[test]
    fn first_largest_wins_ties() {
        let candidates = vec![candidate(7, &[(1, 1.0)]), candidate(8, &[(2, 1.0)])];
        let n = Normalizers::new(&candidates, 0.5);
        assert_eq!(n.largest(), Some(7));
        assert_eq!(n.get(8), 1.0);
        assert_eq!(n.cutoff(), 0.5);
    }

    #[test]
    fn empty_candidates_have_zero_cutoff() {
        let n = Normalizers::new(&[], 0.25);
        assert_eq!(n.largest(), None);
        assert_eq!(n.cutoff(), 0.0);
        assert_eq!(n.get(1), 0.0);
    }
}
