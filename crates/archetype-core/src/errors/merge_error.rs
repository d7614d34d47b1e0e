//! Cluster merge errors.
//!
//! Every variant signals that a caller tried to merge clusters that were never
//! eligible. These stop the pipeline; they are never downgraded.

use crate::cards::CardId;
use crate::models::{ClusterId, ExternalId};

use super::error_code::{self, ArchetypeErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("cannot merge clusters with different external IDs: {first}, {second}")]
    ConflictingExternalIds {
        first: ExternalId,
        second: ExternalId,
    },

    #[error("not all data points in clusters to be merged include card: {card}")]
    MissingRequiredCard { card: CardId },

    #[error("not all data points in clusters to be merged pass rule: {rule}")]
    RuleViolation { rule: String },

    #[error("nothing to merge: no input clusters")]
    NoInputs,

    #[error("the surviving cluster {cluster_id} must have an external ID assigned")]
    SurvivorWithoutExternalId { cluster_id: ClusterId },

    #[error("the cluster to be merged ({cluster_id}) cannot have an external ID assigned")]
    AbsorbedHasExternalId { cluster_id: ClusterId },

    #[error("cluster {cluster_id} not found")]
    ClusterNotFound { cluster_id: ClusterId },
}

impl ArchetypeErrorCode for MergeError {
    fn error_code(&self) -> &'static str {
        error_code::MERGE_ERROR
    }
}
