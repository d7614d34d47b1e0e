use crate::cards::PlayerClass;
use crate::errors::{ArchetypeResult, GroupingError};
use crate::models::DeckObservation;

/// Initial unsupervised partitioning of one class's decks into raw groups.
///
/// Implementations return groups of indices into `decks`. The only contract is
/// a disjoint cover: every index appears in exactly one group.
pub trait DeckGrouper: Send + Sync {
    fn group(
        &self,
        player_class: PlayerClass,
        decks: &[DeckObservation],
    ) -> ArchetypeResult<Vec<Vec<usize>>>;

    /// Name for logging.
    fn name(&self) -> &str;
}

/// Check that `groups` is a disjoint cover of `0..len` with no empty group.
pub fn validate_partition(groups: &[Vec<usize>], len: usize) -> Result<(), GroupingError> {
    let mut seen = vec![false; len];
    for group in groups {
        if group.is_empty() {
            return Err(GroupingError::NotAPartition {
                reason: "empty group".to_string(),
            });
        }
        for &idx in group {
            if idx >= len {
                return Err(GroupingError::NotAPartition {
                    reason: format!("index {idx} out of range for {len} decks"),
                });
            }
            if seen[idx] {
                return Err(GroupingError::NotAPartition {
                    reason: format!("deck {idx} assigned to more than one group"),
                });
            }
            seen[idx] = true;
        }
    }
    if let Some(missing) = seen.iter().position(|s| !s) {
        return Err(GroupingError::NotAPartition {
            reason: format!("deck {missing} not assigned to any group"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_disjoint_cover() {
        assert!(validate_partition(&[vec![0, 2], vec![1]], 3).is_ok());
    }

    #[test]
    fn rejects_overlap_gap_and_range() {
        assert!(validate_partition(&[vec![0, 1], vec![1]], 2).is_err());
        assert!(validate_partition(&[vec![0]], 2).is_err());
        assert!(validate_partition(&[vec![0, 5]], 2).is_err());
        assert!(validate_partition(&[vec![0, 1], vec![]], 2).is_err());
    }
}
