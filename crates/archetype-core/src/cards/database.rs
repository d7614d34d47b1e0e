use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CardId, PlayerClass, QUEST_MECHANIC};
use crate::errors::DataError;

/// Card sets that rotate back into every season. Staples from these sets are
/// the candidates for class-prevalence dampening.
pub const EVERGREEN_CARD_SETS: &[&str] = &["CORE", "EXPERT1", "BASIC", "LEGACY"];

/// Metadata about a single card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInfo {
    pub id: CardId,
    pub name: String,
    pub cost: i32,
    #[serde(default)]
    pub tribe: Option<String>,
    /// Mechanic tags, e.g. `"QUEST"`, `"BATTLECRY"`.
    #[serde(default)]
    pub mechanics: BTreeSet<String>,
    #[serde(default = "default_collectible")]
    pub collectible: bool,
    #[serde(default)]
    pub card_set: String,
    /// Owning class; `None` for neutral cards.
    #[serde(default)]
    pub player_class: Option<PlayerClass>,
}

fn default_collectible() -> bool {
    true
}

impl CardInfo {
    pub fn has_mechanic(&self, mechanic: &str) -> bool {
        self.mechanics.contains(mechanic)
    }

    pub fn is_quest(&self) -> bool {
        self.has_mechanic(QUEST_MECHANIC)
    }

    pub fn is_evergreen(&self) -> bool {
        EVERGREEN_CARD_SETS.contains(&self.card_set.as_str())
    }
}

/// Read-only card metadata lookup.
pub trait CardDatabase: Send + Sync {
    fn card(&self, id: CardId) -> Option<&CardInfo>;

    /// Display name of a card, falling back to its id.
    fn card_name(&self, id: CardId) -> String {
        self.card(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Collectible card ids for a class (class cards plus neutrals), ascending.
    fn collectible_ids(&self, player_class: Option<PlayerClass>) -> Vec<CardId>;
}

/// Card database held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardDatabase {
    cards: HashMap<CardId, CardInfo>,
}

impl InMemoryCardDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = CardInfo>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Parse a JSON array of [`CardInfo`] records.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let cards: Vec<CardInfo> = serde_json::from_str(json).map_err(|e| DataError::Parse {
            what: "card database".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_cards(cards))
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::Parse {
            what: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, card: CardInfo) {
        self.cards.insert(card.id, card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardDatabase for InMemoryCardDatabase {
    fn card(&self, id: CardId) -> Option<&CardInfo> {
        self.cards.get(&id)
    }

    fn collectible_ids(&self, player_class: Option<PlayerClass>) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .cards
            .values()
            .filter(|c| c.collectible)
            .filter(|c| match player_class {
                Some(class) => c.player_class.is_none() || c.player_class == Some(class),
                None => true,
            })
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, cost: i32, class: Option<PlayerClass>) -> CardInfo {
        CardInfo {
            id,
            name: format!("Card {id}"),
            cost,
            tribe: None,
            mechanics: BTreeSet::new(),
            collectible: true,
            card_set: "EXPERT1".to_string(),
            player_class: class,
        }
    }

    #[test]
    fn parses_json_with_defaults() {
        let db = InMemoryCardDatabase::from_json(
            r#"[{"id": 7, "name": "Quest", "cost": 1, "mechanics": ["QUEST"]}]"#,
        )
        .unwrap();
        let c = db.card(7).unwrap();
        assert!(c.is_quest());
        assert!(c.collectible);
        assert!(!c.is_evergreen());
    }

    #[test]
    fn bad_json_is_a_data_error() {
        assert!(matches!(
            InMemoryCardDatabase::from_json("{"),
            Err(DataError::Parse { .. })
        ));
    }

    #[test]
    fn collectible_ids_include_neutrals_and_exclude_other_classes() {
        let mut uncollectible = card(4, 1, None);
        uncollectible.collectible = false;
        let db = InMemoryCardDatabase::from_cards([
            card(3, 1, Some(PlayerClass::Warlock)),
            card(1, 2, None),
            card(2, 3, Some(PlayerClass::Mage)),
            uncollectible,
        ]);
        assert_eq!(db.collectible_ids(Some(PlayerClass::Warlock)), vec![1, 3]);
        assert_eq!(db.collectible_ids(None), vec![1, 2, 3]);
    }

    #[test]
    fn card_name_falls_back_to_id() {
        let db = InMemoryCardDatabase::new();
        assert_eq!(db.card_name(42), "42");
    }
}
