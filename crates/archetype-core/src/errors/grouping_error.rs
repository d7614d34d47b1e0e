//! Errors raised by the grouping collaborator.

use super::error_code::{self, ArchetypeErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupingError {
    #[error("grouping failed: {reason}")]
    GroupingFailed { reason: String },

    #[error("grouping is not a disjoint cover: {reason}")]
    NotAPartition { reason: String },
}

impl ArchetypeErrorCode for GroupingError {
    fn error_code(&self) -> &'static str {
        error_code::GROUPING_ERROR
    }
}
