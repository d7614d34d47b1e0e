//! InheritanceMatcher: carry curated identities from last period's clusters
//! onto this period's.
//!
//! Greedy bipartite matching on signature similarity. The best remaining
//! (previous, new) pair inherits while it clears the floor; previous external
//! ids left over are reported for review.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use archetype_core::cards::CardId;
use archetype_core::config::ArchetypeConfig;
use archetype_core::constants::EXPERIMENTAL_CLUSTER_ID;
use archetype_core::{ClassCluster, Cluster, ClusterId, ClusterSet, ExternalId, PlayerClass};
use archetype_observability::inheritance_span;
use archetype_observability::tracing_setup::events;
use archetype_signatures::{SignatureCalculator, SimilarityScorer};

/// A new cluster that took over a previous cluster's identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InheritanceMatch {
    pub previous_cluster_id: ClusterId,
    pub cluster_id: ClusterId,
    pub external_id: ExternalId,
    pub name: String,
    pub score: f64,
}

/// Inherited required cards that not every member deck of the new cluster
/// contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredCardsWarning {
    pub cluster_id: ClusterId,
    pub external_id: ExternalId,
    pub cards: Vec<CardId>,
}

/// Outcome of matching one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InheritanceReport {
    pub player_class: PlayerClass,
    pub matches: Vec<InheritanceMatch>,
    /// Previous external ids no new cluster inherited.
    pub unconsumed_external_ids: BTreeSet<ExternalId>,
    pub warnings: Vec<RequiredCardsWarning>,
    /// Best score of the pass that stopped matching, if any pair was left.
    pub stop_score: Option<f64>,
}

/// Outcome of matching a whole cluster set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSetInheritance {
    pub reports: Vec<InheritanceReport>,
    pub unconsumed_external_ids: BTreeSet<ExternalId>,
}

/// Greedy identity matcher with a similarity floor.
#[derive(Debug, Clone)]
pub struct InheritanceMatcher {
    scorer: SimilarityScorer,
    threshold: f64,
    calculator: SignatureCalculator,
}

impl InheritanceMatcher {
    pub fn new(scorer: SimilarityScorer, threshold: f64) -> Self {
        Self {
            scorer,
            threshold,
            calculator: SignatureCalculator::default(),
        }
    }

    pub fn from_config(config: &ArchetypeConfig) -> Self {
        Self::new(
            SimilarityScorer::from_config(&config.similarity),
            config.inheritance.threshold,
        )
        .with_calculator(SignatureCalculator::new(config.signatures.clone()))
    }

    /// Calculator used to refresh signatures once identities are assigned.
    pub fn with_calculator(mut self, calculator: SignatureCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match `current` against `previous`, copying name, external id and
    /// required cards onto each matched new cluster.
    ///
    /// When anything matched, signatures are recomputed so newly curated
    /// clusters carry a cross-cluster signature.
    pub fn inherit(&self, current: &mut ClassCluster, previous: &ClassCluster) -> InheritanceReport {
        let player_class = current.player_class;
        let span = inheritance_span!(player_class);
        let _guard = span.enter();

        let mut old: Vec<&Cluster> = previous
            .clusters
            .iter()
            .filter(|c| c.is_curated() && c.external_id != Some(EXPERIMENTAL_CLUSTER_ID))
            .collect();
        let mut new: Vec<usize> = current
            .clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_experimental())
            .map(|(i, _)| i)
            .collect();

        let mut matches = Vec::new();
        let mut warnings = Vec::new();
        let mut stop_score = None;

        while !old.is_empty() {
            let Some((old_pos, new_pos, score)) = self.closest_pair(&old, &new, current) else {
                break;
            };
            if score < self.threshold {
                stop_score = Some(score);
                break;
            }

            let previous_cluster = old.remove(old_pos);
            let cluster = &mut current.clusters[new.remove(new_pos)];
            cluster.inherit_from(previous_cluster);

            let external_id = cluster.external_id.unwrap_or_default();
            events::archetype_inherited(
                player_class.name(),
                cluster.cluster_id,
                external_id,
                score,
            );
            let unsatisfied = cluster.unsatisfied_required_cards();
            if !unsatisfied.is_empty() {
                events::required_cards_unsatisfied(cluster.cluster_id, external_id, &unsatisfied);
                warnings.push(RequiredCardsWarning {
                    cluster_id: cluster.cluster_id,
                    external_id,
                    cards: unsatisfied,
                });
            }
            matches.push(InheritanceMatch {
                previous_cluster_id: previous_cluster.cluster_id,
                cluster_id: cluster.cluster_id,
                external_id,
                name: cluster.name.clone(),
                score,
            });
        }

        if !matches.is_empty() {
            self.calculator.update_cluster_signatures(current, None);
        }

        let unconsumed_external_ids: BTreeSet<ExternalId> =
            old.iter().filter_map(|c| c.external_id).collect();
        events::inheritance_stopped(
            player_class.name(),
            stop_score,
            unconsumed_external_ids.len(),
        );

        InheritanceReport {
            player_class,
            matches,
            unconsumed_external_ids,
            warnings,
            stop_score,
        }
    }

    /// Apply [`inherit`](Self::inherit) to every class present in `previous`.
    ///
    /// A class missing from `current` leaves all its previous identities
    /// unconsumed.
    pub fn inherit_cluster_set(
        &self,
        current: &mut ClusterSet,
        previous: &ClusterSet,
    ) -> ClusterSetInheritance {
        let mut reports = Vec::new();
        let mut unconsumed_external_ids = BTreeSet::new();

        for previous_cc in &previous.class_clusters {
            match current.get_class_cluster_mut(previous_cc.player_class) {
                Some(current_cc) => {
                    let report = self.inherit(current_cc, previous_cc);
                    unconsumed_external_ids.extend(report.unconsumed_external_ids.iter().copied());
                    reports.push(report);
                }
                None => {
                    info!(
                        player_class = %previous_cc.player_class,
                        "class absent from current period, identities not inherited"
                    );
                    unconsumed_external_ids.extend(
                        previous_cc
                            .curated()
                            .filter_map(|c| c.external_id)
                            .filter(|&id| id != EXPERIMENTAL_CLUSTER_ID),
                    );
                }
            }
        }

        ClusterSetInheritance {
            reports,
            unconsumed_external_ids,
        }
    }

    /// Highest-scoring (previous, new) pair as positions into `old` and `new`.
    /// Ties keep the first pair found.
    fn closest_pair(
        &self,
        old: &[&Cluster],
        new: &[usize],
        current: &ClassCluster,
    ) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (old_pos, previous) in old.iter().enumerate() {
            for (new_pos, &idx) in new.iter().enumerate() {
                let score = self
                    .scorer
                    .score(&previous.signature, &current.clusters[idx].signature);
                if best.map_or(true, |(_, _, s)| score > s) {
                    best = Some((old_pos, new_pos, score));
                }
            }
        }
        best
    }
}

impl Default for InheritanceMatcher {
    fn default() -> Self {
        Self::from_config(&ArchetypeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use archetype_core::{CardSignature, DeckObservation};

    use super::*;

    fn deck(cards: &[u32]) -> DeckObservation {
        DeckObservation::new(cards.iter().map(|&c| (c, 2)).collect(), 1).unwrap()
    }

    fn cluster(id: ClusterId, cards: &[u32]) -> Cluster {
        let mut c = Cluster::new(id, vec![deck(cards)]);
        c.signature = cards.iter().map(|&card| (card, 1.0)).collect::<CardSignature>();
        c
    }

    #[test]
    fn best_pairs_inherit_and_leftovers_are_reported() {
        let previous = ClassCluster::new(
            PlayerClass::Hunter,
            vec![
                cluster(0, &[1, 2, 3]).with_identity(100, "Face Hunter"),
                cluster(1, &[7, 8, 9]).with_identity(101, "Deathrattle Hunter"),
                cluster(2, &[20, 21]).with_identity(102, "Gone Hunter"),
            ],
        );
        let mut current = ClassCluster::new(
            PlayerClass::Hunter,
            vec![cluster(0, &[7, 8, 9]), cluster(1, &[1, 2, 3]), cluster(2, &[40])],
        );
        let report = InheritanceMatcher::default().inherit(&mut current, &previous);

        assert_eq!(report.matches.len(), 2);
        assert_eq!(current.clusters[0].external_id, Some(101));
        assert_eq!(current.clusters[0].name, "Deathrattle Hunter");
        assert_eq!(current.clusters[1].external_id, Some(100));
        assert_eq!(current.clusters[2].external_id, None);
        assert_eq!(report.unconsumed_external_ids, [102].into_iter().collect());
        assert_eq!(report.stop_score, Some(0.0));
    }

    #[test]
    fn inherited_clusters_get_a_cross_cluster_signature() {
        let previous = ClassCluster::new(
            PlayerClass::Druid,
            vec![cluster(0, &[1, 2, 3]).with_identity(50, "Token Druid")],
        );
        let mut current = ClassCluster::new(
            PlayerClass::Druid,
            vec![cluster(0, &[1, 2, 3]), cluster(1, &[8, 9])],
        );
        assert!(current.clusters[0].ccp_signature.is_none());

        let report = InheritanceMatcher::default().inherit(&mut current, &previous);
        assert_eq!(report.matches.len(), 1);

        let candidates = current.archetype_candidates();
        assert_eq!(candidates.len(), 1);
        let ccp = current.clusters[0].ccp_signature.as_ref().unwrap();
        assert!(!ccp.is_empty());
        assert_eq!(&candidates[0].signature_weights, ccp);
        assert!(current.clusters[1].ccp_signature.is_none());
    }

    #[test]
    fn experimental_and_uncurated_clusters_are_ignored() {
        let previous = ClassCluster::new(
            PlayerClass::Hunter,
            vec![
                cluster(0, &[1, 2]),
                cluster(EXPERIMENTAL_CLUSTER_ID, &[5, 6]).with_identity(-1, "Experimental"),
            ],
        );
        let mut current = ClassCluster::new(
            PlayerClass::Hunter,
            vec![cluster(EXPERIMENTAL_CLUSTER_ID, &[5, 6]), cluster(0, &[1, 2])],
        );
        let report = InheritanceMatcher::default().inherit(&mut current, &previous);
        assert!(report.matches.is_empty());
        assert!(report.unconsumed_external_ids.is_empty());
        assert_eq!(report.stop_score, None);
    }

    #[test]
    fn unsatisfied_required_cards_are_warned() {
        let previous = ClassCluster::new(
            PlayerClass::Paladin,
            vec![cluster(3, &[1, 2])
                .with_identity(77, "Odd Paladin")
                .with_required_cards([9])],
        );
        let mut current = ClassCluster::new(PlayerClass::Paladin, vec![cluster(0, &[1, 2])]);
        let report = InheritanceMatcher::default().inherit(&mut current, &previous);

        assert_eq!(report.matches[0].previous_cluster_id, 3);
        assert_eq!(
            report.warnings,
            vec![RequiredCardsWarning {
                cluster_id: 0,
                external_id: 77,
                cards: vec![9],
            }]
        );
        assert!(current.clusters[0].required_cards.contains(&9));
    }

    #[test]
    fn cluster_set_unions_unconsumed_ids() {
        use archetype_core::models::GameFormat;
        use chrono::Utc;

        let previous = ClusterSet::new(
            Utc::now(),
            GameFormat::Standard,
            vec![
                ClassCluster::new(
                    PlayerClass::Mage,
                    vec![
                        cluster(0, &[1]).with_identity(1, "A"),
                        cluster(1, &[2]).with_identity(2, "B"),
                    ],
                ),
                ClassCluster::new(
                    PlayerClass::Rogue,
                    vec![cluster(0, &[3]).with_identity(3, "C")],
                ),
            ],
        );
        let mut current = ClusterSet::new(
            Utc::now(),
            GameFormat::Standard,
            vec![ClassCluster::new(PlayerClass::Mage, vec![cluster(0, &[1])])],
        );
        let outcome = InheritanceMatcher::default().inherit_cluster_set(&mut current, &previous);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.unconsumed_external_ids, [2, 3].into_iter().collect());
    }
}
