//! # archetype-observability
//!
//! Structured logging for the archetype engine: subscriber setup honouring
//! `ARCHETYPE_LOG`, span constructors per operation, and one event helper per
//! lifecycle decision (merges, inheritance, experimental extraction,
//! classification near-misses).

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter, try_init_from_config};
