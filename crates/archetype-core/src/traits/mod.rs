//! Seams for external collaborators.

mod grouper;

pub use grouper::{validate_partition, DeckGrouper};
