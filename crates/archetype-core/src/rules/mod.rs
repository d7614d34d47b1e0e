//! False-positive rule registry.
//!
//! A rule is a pure predicate over a deck list. Clusters and archetypes refer
//! to rules by stable name so the reference survives serialization, the same
//! way required cards are referenced by card id.

mod predicates;

pub use predicates::{is_even_only_deck, is_highlander_deck, is_odd_only_deck, is_quest_deck};

use crate::cards::CardDatabase;
use crate::errors::RuleError;
use crate::models::DeckCards;

/// Predicate signature shared by every false-positive rule.
pub type RulePredicate = fn(&DeckCards, &dyn CardDatabase) -> bool;

pub const HIGHLANDER_RULE: &str = "is_highlander_deck";
pub const QUEST_RULE: &str = "is_quest_deck";
pub const EVEN_ONLY_RULE: &str = "is_even_only_deck";
pub const ODD_ONLY_RULE: &str = "is_odd_only_deck";

/// Ordered name → predicate registry. Iteration order is registration order.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<(String, RulePredicate)>,
}

impl RuleRegistry {
    /// Registry with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry with the four built-in rules.
    pub fn with_defaults() -> Self {
        Self {
            rules: vec![
                (HIGHLANDER_RULE.to_string(), is_highlander_deck as RulePredicate),
                (QUEST_RULE.to_string(), is_quest_deck as RulePredicate),
                (EVEN_ONLY_RULE.to_string(), is_even_only_deck as RulePredicate),
                (ODD_ONLY_RULE.to_string(), is_odd_only_deck as RulePredicate),
            ],
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        predicate: RulePredicate,
    ) -> Result<(), RuleError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(RuleError::DuplicateRule { name });
        }
        self.rules.push((name, predicate));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<RulePredicate, RuleError> {
        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
            .ok_or_else(|| RuleError::UnknownRule {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RulePredicate)> {
        self.rules.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
