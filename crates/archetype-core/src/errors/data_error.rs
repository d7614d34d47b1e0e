//! Input data errors: malformed observations and card databases.

use super::error_code::{self, ArchetypeErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("deck observation must have at least one observation")]
    ZeroObservations,

    #[error("unknown player class: {name}")]
    UnknownPlayerClass { name: String },

    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },
}

impl ArchetypeErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        error_code::DATA_ERROR
    }
}
