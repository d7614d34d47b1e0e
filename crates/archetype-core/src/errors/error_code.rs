//! Stable, machine-readable error codes.

pub const MERGE_ERROR: &str = "MERGE_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const GROUPING_ERROR: &str = "GROUPING_ERROR";
pub const DATA_ERROR: &str = "DATA_ERROR";

/// Maps an error to a stable code usable by callers that log or report errors.
pub trait ArchetypeErrorCode {
    fn error_code(&self) -> &'static str;
}
