//! Conway's B3/S23 transition rule.
//!
//! Each cell's next state is a pure function of its own state and the number
//! of live cells in its Moore neighborhood.

use serde::{Deserialize, Serialize};

use super::CellState;

/// Which clause of the rule fired for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOutcome {
    /// Live cell with fewer than two live neighbors.
    Underpopulation,
    /// Live cell with two or three live neighbors.
    Survival,
    /// Live cell with more than three live neighbors.
    Overpopulation,
    /// Dead cell with exactly three live neighbors.
    Birth,
    /// Dead cell with any other count.
    StaysDead,
}

impl RuleOutcome {
    #[inline]
    pub fn next_state(self) -> CellState {
        match self {
            RuleOutcome::Survival | RuleOutcome::Birth => CellState::Alive,
            RuleOutcome::Underpopulation | RuleOutcome::Overpopulation | RuleOutcome::StaysDead => {
                CellState::Dead
            }
        }
    }
}

/// Classify the transition for a cell with `alive_neighbors` live neighbors.
#[inline]
pub fn classify(state: CellState, alive_neighbors: u8) -> RuleOutcome {
    match (state, alive_neighbors) {
        (CellState::Alive, 0 | 1) => RuleOutcome::Underpopulation,
        (CellState::Alive, 2 | 3) => RuleOutcome::Survival,
        (CellState::Alive, _) => RuleOutcome::Overpopulation,
        (CellState::Dead, 3) => RuleOutcome::Birth,
        (CellState::Dead, _) => RuleOutcome::StaysDead,
    }
}

/// Next committed state for a cell.
#[inline]
pub fn next_state(state: CellState, alive_neighbors: u8) -> CellState {
    classify(state, alive_neighbors).next_state()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four independent guarded checks, each allowed to overwrite the previous
    /// result, starting from "dead next".
    fn guarded_checks(state: CellState, n: u8) -> CellState {
        let mut alive_next = false;
        if state == CellState::Alive && n < 2 {
            alive_next = false;
        }
        if state == CellState::Alive && (n == 2 || n == 3) {
            alive_next = true;
        }
        if state == CellState::Alive && n > 3 {
            alive_next = false;
        }
        if state == CellState::Dead && n == 3 {
            alive_next = true;
        }
        CellState::from(alive_next)
    }

    #[test]
    fn test_live_cell_transitions() {
        assert_eq!(classify(CellState::Alive, 0), RuleOutcome::Underpopulation);
        assert_eq!(classify(CellState::Alive, 1), RuleOutcome::Underpopulation);
        assert_eq!(classify(CellState::Alive, 2), RuleOutcome::Survival);
        assert_eq!(classify(CellState::Alive, 3), RuleOutcome::Survival);
        for n in 4..=8 {
            assert_eq!(classify(CellState::Alive, n), RuleOutcome::Overpopulation);
        }
    }

    #[test]
    fn test_dead_cell_transitions() {
        for n in 0..=8 {
            let expected = if n == 3 {
                RuleOutcome::Birth
            } else {
                RuleOutcome::StaysDead
            };
            assert_eq!(classify(CellState::Dead, n), expected);
        }
    }

    #[test]
    fn test_matches_guarded_checks() {
        for state in [CellState::Dead, CellState::Alive] {
            for n in 0..=8 {
                assert_eq!(
                    next_state(state, n),
                    guarded_checks(state, n),
                    "state {state:?}, {n} neighbors"
                );
            }
        }
    }
}
