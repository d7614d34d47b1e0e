//! Top-level error aggregating every subsystem error via `From` conversions.

use super::error_code::ArchetypeErrorCode;
use super::{ConfigError, DataError, GroupingError, MergeError, RuleError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArchetypeError {
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("grouping error: {0}")]
    Grouping(#[from] GroupingError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

impl ArchetypeErrorCode for ArchetypeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Merge(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Grouping(e) => e.error_code(),
            Self::Data(e) => e.error_code(),
        }
    }
}

pub type ArchetypeResult<T> = Result<T, ArchetypeError>;
