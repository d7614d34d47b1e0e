//! Built-in false-positive predicates.
//!
//! Cards missing from the database fail cost checks: a deck we cannot verify
//! is never claimed to be even- or odd-only.

use crate::cards::CardDatabase;
use crate::constants::HIGHLANDER_DISTINCT_CARDS;
use crate::models::DeckCards;

/// Every card is a singleton: 30 distinct cards.
pub fn is_highlander_deck(deck: &DeckCards, _cards: &dyn CardDatabase) -> bool {
    deck.len() == HIGHLANDER_DISTINCT_CARDS
}

/// The deck runs a quest.
pub fn is_quest_deck(deck: &DeckCards, cards: &dyn CardDatabase) -> bool {
    deck.keys()
        .any(|&id| cards.card(id).is_some_and(|c| c.is_quest()))
}

/// Every card costs an even amount of mana.
pub fn is_even_only_deck(deck: &DeckCards, cards: &dyn CardDatabase) -> bool {
    deck.keys()
        .all(|&id| cards.card(id).is_some_and(|c| c.cost.rem_euclid(2) == 0))
}

/// Every card costs an odd amount of mana.
pub fn is_odd_only_deck(deck: &DeckCards, cards: &dyn CardDatabase) -> bool {
    deck.keys()
        .all(|&id| cards.card(id).is_some_and(|c| c.cost.rem_euclid(2) == 1))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::cards::{CardInfo, InMemoryCardDatabase};

    fn db() -> InMemoryCardDatabase {
        let card = |id, cost, quest: bool| CardInfo {
            id,
            name: format!("Card {id}"),
            cost,
            tribe: None,
            mechanics: if quest {
                ["QUEST".to_string()].into_iter().collect()
            } else {
                BTreeSet::new()
            },
            collectible: true,
            card_set: "EXPERT1".to_string(),
            player_class: None,
        };
        InMemoryCardDatabase::from_cards((1..=40).map(|id| card(id, id as i32 % 10, id == 40)))
    }

    fn deck(ids: impl IntoIterator<Item = u32>) -> DeckCards {
        ids.into_iter().map(|id| (id, 2)).collect()
    }

    #[test]
    fn highlander_needs_thirty_distinct_cards() {
        let db = db();
        assert!(is_highlander_deck(&(1..=30).map(|id| (id, 1)).collect(), &db));
        assert!(!is_highlander_deck(&deck(1..=15), &db));
    }

    #[test]
    fn quest_deck_detected_by_mechanic() {
        let db = db();
        assert!(is_quest_deck(&deck([1, 2, 40]), &db));
        assert!(!is_quest_deck(&deck([1, 2, 3]), &db));
    }

    #[test]
    fn even_and_odd_only() {
        let db = db();
        assert!(is_even_only_deck(&deck([2, 4, 6, 10]), &db));
        assert!(!is_even_only_deck(&deck([2, 3]), &db));
        assert!(is_odd_only_deck(&deck([1, 3, 5]), &db));
        assert!(!is_odd_only_deck(&deck([1, 2]), &db));
    }

    #[test]
    fn unknown_cards_fail_cost_rules() {
        let db = db();
        assert!(!is_even_only_deck(&deck([2, 999]), &db));
        assert!(!is_odd_only_deck(&deck([1, 999]), &db));
    }
}
