//! False-positive rule registry errors.

use super::error_code::{self, ArchetypeErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown false-positive rule: {name}")]
    UnknownRule { name: String },

    #[error("rule already registered: {name}")]
    DuplicateRule { name: String },
}

impl ArchetypeErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
