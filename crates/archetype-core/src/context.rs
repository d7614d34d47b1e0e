//! Explicit dependencies for operations that evaluate false-positive rules.

use std::collections::BTreeSet;

use crate::cards::CardDatabase;
use crate::errors::ArchetypeResult;
use crate::models::DeckCards;
use crate::rules::RuleRegistry;

/// Read-only collaborators handed to cluster lifecycle and classification code.
///
/// Constructed once by the caller and passed by reference; nothing in the
/// engine reaches for global card data.
#[derive(Clone, Copy)]
pub struct ArchetypeContext<'a> {
    pub cards: &'a dyn CardDatabase,
    pub rules: &'a RuleRegistry,
}

impl<'a> ArchetypeContext<'a> {
    pub fn new(cards: &'a dyn CardDatabase, rules: &'a RuleRegistry) -> Self {
        Self { cards, rules }
    }

    /// Evaluate a single named rule against a deck.
    pub fn rule_holds(&self, rule: &str, deck: &DeckCards) -> ArchetypeResult<bool> {
        let predicate = self.rules.get(rule)?;
        Ok(predicate(deck, self.cards))
    }

    /// First rule (in set order) the deck fails, if any.
    pub fn first_failing_rule<'r>(
        &self,
        rules: &'r BTreeSet<String>,
        deck: &DeckCards,
    ) -> ArchetypeResult<Option<&'r str>> {
        for rule in rules {
            if !self.rule_holds(rule, deck)? {
                return Ok(Some(rule.as_str()));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for ArchetypeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchetypeContext")
            .field("rules", &self.rules.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
