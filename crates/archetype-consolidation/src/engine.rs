//! ClusterConsolidator: greedy agglomeration of one class's clusters.
//!
//! Each pass recomputes every signature, finds the most similar merge-eligible
//! pair and merges it when it clears the similarity floor. Pairs that share a
//! curated identity are merged first regardless of score.

use serde::Serialize;
use tracing::{debug, Level};

use archetype_core::cards::CardDatabase;
use archetype_core::config::ArchetypeConfig;
use archetype_core::errors::ArchetypeResult;
use archetype_core::models::merge_clusters;
use archetype_core::{ArchetypeContext, ClassCluster, Cluster, ClusterId};
use archetype_observability::consolidation_span;
use archetype_observability::tracing_setup::events;
use archetype_signatures::{SignatureCalculator, SimilarityScorer};

/// Score recorded for a merge forced by a shared curated identity.
pub const FORCED_MERGE_SCORE: f64 = 1.0;

/// Why the merge loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// Consolidation is switched off; only signatures were computed.
    Disabled,
    /// At most one cluster left.
    SingleCluster,
    /// No pair passes `can_merge`.
    NoEligiblePair,
    /// The best eligible pair scored below the floor.
    BelowThreshold { best_score: f64 },
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::SingleCluster => "single_cluster",
            Self::NoEligiblePair => "no_eligible_pair",
            Self::BelowThreshold { .. } => "below_threshold",
        }
    }
}

/// One merge performed by the loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRecord {
    pub first: ClusterId,
    pub second: ClusterId,
    pub new_cluster_id: ClusterId,
    pub score: f64,
    pub forced: bool,
}

/// Outcome of consolidating one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidationReport {
    pub player_class: archetype_core::PlayerClass,
    pub merges: Vec<MergeRecord>,
    pub final_clusters: usize,
    pub stop_reason: StopReason,
}

/// Best merge-eligible pair of a pass, as indices into the cluster list.
#[derive(Debug, Clone, Copy)]
struct PairCandidate {
    first: usize,
    second: usize,
    score: f64,
    forced: bool,
}

/// Greedy pairwise cluster merger.
#[derive(Debug, Clone)]
pub struct ClusterConsolidator {
    calculator: SignatureCalculator,
    scorer: SimilarityScorer,
    merge_similarity: f64,
    enabled: bool,
    evergreen_pcp: bool,
}

impl ClusterConsolidator {
    pub fn new(
        calculator: SignatureCalculator,
        scorer: SimilarityScorer,
        merge_similarity: f64,
    ) -> Self {
        Self {
            calculator,
            scorer,
            merge_similarity,
            enabled: true,
            evergreen_pcp: false,
        }
    }

    pub fn from_config(config: &ArchetypeConfig) -> Self {
        Self {
            enabled: config.consolidation.consolidate,
            ..Self::new(
                SignatureCalculator::new(config.signatures.clone()),
                SimilarityScorer::from_config(&config.similarity),
                config.consolidation.merge_similarity,
            )
        }
    }

    /// Restrict class-prevalence dampening to evergreen cards, looked up in
    /// the context's card database.
    pub fn with_evergreen_pcp(mut self, evergreen_pcp: bool) -> Self {
        self.evergreen_pcp = evergreen_pcp;
        self
    }

    pub fn calculator(&self) -> &SignatureCalculator {
        &self.calculator
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    pub fn merge_similarity(&self) -> f64 {
        self.merge_similarity
    }

    /// Recompute every signature of `class_cluster`.
    pub fn update_signatures(&self, class_cluster: &mut ClassCluster, ctx: &ArchetypeContext<'_>) {
        self.calculator
            .update_cluster_signatures(class_cluster, self.card_lookup(ctx));
    }

    /// Merge clusters of `class_cluster` until stable.
    ///
    /// Errors only on structural violations (an unknown rule, or a merge that
    /// breaks cluster invariants).
    pub fn consolidate(
        &self,
        class_cluster: &mut ClassCluster,
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<ConsolidationReport> {
        let span = consolidation_span!(class_cluster.player_class, class_cluster.len());
        let _guard = span.enter();

        self.update_signatures(class_cluster, ctx);
        let mut merges = Vec::new();

        let stop_reason = if !self.enabled {
            StopReason::Disabled
        } else {
            loop {
                if class_cluster.len() <= 1 {
                    break StopReason::SingleCluster;
                }
                let Some(best) = self.most_similar_pair(&class_cluster.clusters, ctx)? else {
                    break StopReason::NoEligiblePair;
                };
                self.log_best_pair(class_cluster, best, ctx);
                if best.score < self.merge_similarity {
                    break StopReason::BelowThreshold {
                        best_score: best.score,
                    };
                }

                let record = self.merge_pair(class_cluster, best, ctx)?;
                events::clusters_merged(
                    class_cluster.player_class.name(),
                    record.first,
                    record.second,
                    record.new_cluster_id,
                    record.score,
                    record.forced,
                );
                merges.push(record);
                self.update_signatures(class_cluster, ctx);
            }
        };

        events::consolidation_completed(
            class_cluster.player_class.name(),
            merges.len(),
            class_cluster.len(),
            stop_reason.as_str(),
        );
        Ok(ConsolidationReport {
            player_class: class_cluster.player_class,
            merges,
            final_clusters: class_cluster.len(),
            stop_reason,
        })
    }

    /// Highest-scoring eligible pair; the first forced pair short-circuits.
    /// Ties keep the earliest pair in enumeration order.
    fn most_similar_pair(
        &self,
        clusters: &[Cluster],
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<Option<PairCandidate>> {
        let mut best: Option<PairCandidate> = None;
        for (i, first) in clusters.iter().enumerate() {
            for (j, second) in clusters.iter().enumerate().skip(i + 1) {
                if !first.can_merge(second, ctx)? {
                    continue;
                }
                if first.must_merge(second, ctx)? {
                    return Ok(Some(PairCandidate {
                        first: i,
                        second: j,
                        score: FORCED_MERGE_SCORE,
                        forced: true,
                    }));
                }
                let score = self.scorer.score(&first.signature, &second.signature);
                if best.map_or(true, |b| score > b.score) {
                    best = Some(PairCandidate {
                        first: i,
                        second: j,
                        score,
                        forced: false,
                    });
                }
            }
        }
        Ok(best)
    }

    fn merge_pair(
        &self,
        class_cluster: &mut ClassCluster,
        pair: PairCandidate,
        ctx: &ArchetypeContext<'_>,
    ) -> ArchetypeResult<MergeRecord> {
        let first = class_cluster.clusters[pair.first].clone();
        let second = class_cluster.clusters[pair.second].clone();
        let (first_id, second_id) = (first.cluster_id, second.cluster_id);
        let new_cluster_id = class_cluster.next_cluster_id();

        let merged = merge_clusters(new_cluster_id, vec![first, second], ctx)?;
        class_cluster.replace_clusters(&[first_id, second_id], merged);

        Ok(MergeRecord {
            first: first_id,
            second: second_id,
            new_cluster_id,
            score: pair.score,
            forced: pair.forced,
        })
    }

    fn log_best_pair(&self, class_cluster: &ClassCluster, pair: PairCandidate, ctx: &ArchetypeContext<'_>) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        let first = &class_cluster.clusters[pair.first];
        let second = &class_cluster.clusters[pair.second];
        let breakdown = self.scorer.breakdown(&first.signature, &second.signature);
        debug!(
            player_class = %class_cluster.player_class,
            first = first.cluster_id,
            second = second.cluster_id,
            score = pair.score,
            forced = pair.forced,
            breakdown = %breakdown.describe(ctx.cards),
            "most similar clusters"
        );
    }

    fn card_lookup<'c>(&self, ctx: &ArchetypeContext<'c>) -> Option<&'c dyn CardDatabase> {
        self.evergreen_pcp.then_some(ctx.cards)
    }
}

impl Default for ClusterConsolidator {
    fn default() -> Self {
        Self::from_config(&ArchetypeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use archetype_core::config::SignatureConfig;
    use archetype_core::{DeckObservation, InMemoryCardDatabase, PlayerClass, RuleRegistry};

    use super::*;

    fn deck(cards: &[u32], observations: u64) -> DeckObservation {
        DeckObservation::new(cards.iter().map(|&c| (c, 2)).collect(), observations).unwrap()
    }

    fn consolidator(floor: f64) -> ClusterConsolidator {
        let calculator = SignatureCalculator::new(SignatureConfig {
            use_pcp: false,
            use_ccp: false,
            ..SignatureConfig::default()
        });
        ClusterConsolidator::new(calculator, SimilarityScorer::default(), floor)
    }

    #[test]
    fn merges_near_duplicates_and_stops_on_distinct() {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::empty();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut cc = ClassCluster::new(
            PlayerClass::Mage,
            vec![
                Cluster::new(0, vec![deck(&[1, 2, 3, 4], 10)]),
                Cluster::new(1, vec![deck(&[1, 2, 3, 4], 5)]),
                Cluster::new(2, vec![deck(&[7, 8, 9], 5)]),
            ],
        );
        let report = consolidator(0.85).consolidate(&mut cc, &ctx).unwrap();

        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.merges[0].new_cluster_id, 3);
        assert!(!report.merges[0].forced);
        assert_eq!(cc.len(), 2);
        assert_eq!(cc.clusters[0].cluster_id, 3);
        assert_eq!(cc.clusters[0].observations(), 15);
        assert_eq!(report.stop_reason.as_str(), "below_threshold");
    }

    #[test]
    fn shared_identity_forces_merge_below_floor() {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::empty();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut cc = ClassCluster::new(
            PlayerClass::Mage,
            vec![
                Cluster::new(0, vec![deck(&[1, 2], 1)]).with_identity(40, "Tempo Mage"),
                Cluster::new(1, vec![deck(&[5, 6], 1)]).with_identity(40, "Tempo Mage"),
            ],
        );
        let report = consolidator(0.85).consolidate(&mut cc, &ctx).unwrap();

        assert_eq!(report.merges.len(), 1);
        assert!(report.merges[0].forced);
        assert_eq!(report.merges[0].score, FORCED_MERGE_SCORE);
        assert_eq!(cc.clusters[0].external_id, Some(40));
        assert_eq!(report.stop_reason, StopReason::SingleCluster);
    }

    #[test]
    fn conflicting_identities_never_merge() {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::empty();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut cc = ClassCluster::new(
            PlayerClass::Mage,
            vec![
                Cluster::new(0, vec![deck(&[1, 2], 1)]).with_identity(40, "A"),
                Cluster::new(1, vec![deck(&[1, 2], 1)]).with_identity(41, "B"),
            ],
        );
        let report = consolidator(0.5).consolidate(&mut cc, &ctx).unwrap();
        assert!(report.merges.is_empty());
        assert_eq!(report.stop_reason, StopReason::NoEligiblePair);
        assert_eq!(cc.len(), 2);
    }

    #[test]
    fn disabled_consolidation_only_computes_signatures() {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::empty();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut config = ArchetypeConfig::default();
        config.consolidation.consolidate = false;
        let mut cc = ClassCluster::new(
            PlayerClass::Rogue,
            vec![
                Cluster::new(0, vec![deck(&[1], 1)]),
                Cluster::new(1, vec![deck(&[1], 1)]),
            ],
        );
        let report = ClusterConsolidator::from_config(&config)
            .consolidate(&mut cc, &ctx)
            .unwrap();
        assert_eq!(report.stop_reason, StopReason::Disabled);
        assert_eq!(cc.len(), 2);
        assert!(!cc.clusters[0].signature.is_empty());
    }

    #[test]
    fn ties_keep_first_pair() {
        let db = InMemoryCardDatabase::new();
        let rules = RuleRegistry::empty();
        let ctx = ArchetypeContext::new(&db, &rules);
        let mut cc = ClassCluster::new(
            PlayerClass::Druid,
            vec![
                Cluster::new(0, vec![deck(&[1, 2], 1)]),
                Cluster::new(1, vec![deck(&[1, 2], 1)]),
                Cluster::new(2, vec![deck(&[1, 2], 1)]),
            ],
        );
        let report = consolidator(0.85).consolidate(&mut cc, &ctx).unwrap();
        assert_eq!(report.merges[0].first, 0);
        assert_eq!(report.merges[0].second, 1);
        assert_eq!(report.merges.len(), 2);
        assert_eq!(cc.len(), 1);
        assert_eq!(cc.clusters[0].cluster_id, 4);
    }
}
