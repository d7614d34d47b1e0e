//! Cross-cluster prevalence (CCP) scaling.
//!
//! A card that many sibling clusters also carry does not distinguish this
//! cluster, so its weight is multiplied by `p²` with
//! `p = 1 - count_in_others / num_others`.

use archetype_core::CardSignature;

/// `(1 - k/n)²`; 1.0 when there are no other clusters.
pub fn cross_cluster_modifier(count_in_others: usize, num_others: usize) -> f64 {
    if num_others == 0 {
        return 1.0;
    }
    let p = 1.0 - count_in_others as f64 / num_others as f64;
    p * p
}

/// Scale every weight of `weights` by its cross-cluster modifier against
/// `others`. A card counts as present in another cluster when that cluster's
/// weight for it is at least `inclusion_cutoff`.
pub fn apply_cross_cluster_prevalence(
    weights: &CardSignature,
    others: &[&CardSignature],
    inclusion_cutoff: f64,
) -> CardSignature {
    weights
        .iter()
        .map(|(card, weight)| {
            let count_in_others = others
                .iter()
                .filter(|other| other.get(card).is_some_and(|w| w >= inclusion_cutoff))
                .count();
            (card, weight * cross_cluster_modifier(count_in_others, others.len()))
        })
        .collect()
}
