//! Near-miss diagnostics: an archetype whose score cleared the cutoff but was
//! vetoed by a gate.

use std::fmt;

use serde::{Deserialize, Serialize};

use archetype_core::{ArchetypeId, CardId};

/// Which gate vetoed the archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    MissingRequiredCard { card: CardId },
    FalsePositive { rule: String },
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredCard { .. } => "missing_required_card",
            Self::FalsePositive { .. } => "false_positive",
        }
    }
}

/// Reported to the failure callback during classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationFailure {
    pub archetype_id: ArchetypeId,
    #[serde(flatten)]
    pub reason: FailureReason,
    /// Distance the archetype would have scored without the gate.
    pub distance: f64,
}

impl fmt::Display for ClassificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FailureReason::MissingRequiredCard { card } => write!(
                f,
                "archetype {} missing required card {}",
                self.archetype_id, card
            ),
            FailureReason::FalsePositive { rule } => write!(
                f,
                "archetype {} failed rule {}",
                self.archetype_id, rule
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_with_reason_tag() {
        let failure = ClassificationFailure {
            archetype_id: 224,
            reason: FailureReason::FalsePositive {
                rule: "is_odd_only_deck".to_string(),
            },
            distance: 6.5,
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["archetype_id"], 224);
        assert_eq!(value["reason"], "false_positive");
        assert_eq!(value["rule"], "is_odd_only_deck");

        let back: ClassificationFailure = serde_json::from_value(value).unwrap();
        assert_eq!(back, failure);
    }

    #[test]
    fn display_names_the_gate() {
        let failure = ClassificationFailure {
            archetype_id: 63,
            reason: FailureReason::MissingRequiredCard { card: 1019 },
            distance: 20.0,
        };
        assert_eq!(failure.to_string(), "archetype 63 missing required card 1019");
        assert_eq!(failure.reason.as_str(), "missing_required_card");
    }
}
