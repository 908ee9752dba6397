//! Best-neighbor imitation with tie-breaking
//!
//! Each cell looks at itself and its orthogonal neighbors, finds the highest
//! payoff among them and copies the behavior that earned it. When several
//! candidates share the maximum, a candidate behaving like the cell itself
//! wins, so a tie never pushes a cell away from what it already does.

use crate::core::types::{Behavior, Payoff};

/// One entry in a cell's candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub payoff: Payoff,
    pub behavior: Behavior,
}

impl Candidate {
    pub fn new(payoff: Payoff, behavior: Behavior) -> Self {
        Self { payoff, behavior }
    }
}

/// Pick the next behavior for a cell currently behaving as `own`.
///
/// `candidates` must be in canonical order: the cell itself first, then
/// up, down, left, right (missing neighbors skipped).
///
/// Tied candidates are walked in that order and the first one sharing the
/// cell's behavior is adopted. If none does, the last tied candidate visited
/// is adopted. That fallback looks like an accident of the scan rather than
/// a deliberate rule; with only two behaviors every tied candidate then has
/// the other behavior, so the choice of "last" never changes the outcome.
/// A lone maximum goes through the same walk and resolves to itself.
pub fn select_behavior(own: Behavior, candidates: &[Candidate]) -> Behavior {
    let Some(best) = candidates.iter().map(|c| c.payoff).max() else {
        return own;
    };

    let mut chosen = own;
    for candidate in candidates.iter().filter(|c| c.payoff == best) {
        chosen = candidate.behavior;
        if candidate.behavior == own {
            break;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use Behavior::{Cooperate as C, Defect as D};

    #[test]
    fn test_single_best_is_copied() {
        let candidates = [
            Candidate::new(-4, C),
            Candidate::new(10, D),
            Candidate::new(3, C),
        ];
        assert_eq!(select_behavior(C, &candidates), D);
    }

    #[test]
    fn test_self_only_keeps_behavior() {
        assert_eq!(select_behavior(C, &[Candidate::new(0, C)]), C);
        assert_eq!(select_behavior(D, &[Candidate::new(0, D)]), D);
    }

    #[test]
    fn test_tie_prefers_own_category() {
        let candidates = [
            Candidate::new(5, D),
            Candidate::new(7, C),
            Candidate::new(7, D),
        ];
        assert_eq!(select_behavior(D, &candidates), D);
        let candidates = [
            Candidate::new(5, C),
            Candidate::new(7, D),
            Candidate::new(7, C),
        ];
        assert_eq!(select_behavior(C, &candidates), C);
    }

    #[test]
    fn test_tie_without_match_falls_back_to_last() {
        // Cooperator surrounded by four equally rewarded defectors
        let candidates = [
            Candidate::new(-4, C),
            Candidate::new(10, D),
            Candidate::new(10, D),
            Candidate::new(10, D),
            Candidate::new(10, D),
        ];
        assert_eq!(select_behavior(C, &candidates), D);
    }

    #[test]
    fn test_empty_candidates_keep_behavior() {
        assert_eq!(select_behavior(D, &[]), D);
    }
}
