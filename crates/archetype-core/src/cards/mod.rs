//! Card metadata lookup.
//!
//! The engine never owns card metadata. A [`CardDatabase`] is constructed once
//! by the caller and passed by reference into the components that need it
//! (false-positive rules and evergreen detection for class-prevalence
//! dampening).

mod database;
mod player_class;

pub use database::{CardDatabase, CardInfo, InMemoryCardDatabase, EVERGREEN_CARD_SETS};
pub use player_class::PlayerClass;

/// Opaque card identifier (the card's database id).
pub type CardId = u32;

/// Mechanic tag marking a quest card.
pub const QUEST_MECHANIC: &str = "QUEST";
