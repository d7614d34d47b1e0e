//! Initial deck grouping: HDBSCAN over per-deck feature vectors.

pub mod features;
pub mod hdbscan_grouper;

pub use features::FeatureBuilder;
pub use hdbscan_grouper::HdbscanGrouper;
