//! Error handling for the archetype engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Structural violations (conflicting curated identities, broken cluster
//! invariants, unknown rules) are errors. "No match" outcomes are not: they
//! are represented by `None` or empty collections at the call site.

pub mod archetype_error;
pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod grouping_error;
pub mod merge_error;
pub mod rule_error;

pub use archetype_error::{ArchetypeError, ArchetypeResult};
pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::ArchetypeErrorCode;
pub use grouping_error::GroupingError;
pub use merge_error::MergeError;
pub use rule_error::RuleError;
