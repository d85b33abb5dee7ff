//! Cell storage for the automaton.

use serde::{Deserialize, Serialize};

/// Life state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A single automaton unit.
///
/// `pending_next` only carries meaning while a generation is being computed;
/// it is written for every cell before any cell commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    state: CellState,
    pending_next: Option<CellState>,
    parity: bool,
}

impl Cell {
    /// Create a dead cell at `(x, y)`.
    ///
    /// Parity follows a checkerboard: set when exactly one of `x`, `y` is odd.
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            state: CellState::Dead,
            pending_next: None,
            parity: (x + y) % 2 == 1,
        }
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Checkerboard flag fixed at construction. Presentation metadata only.
    #[inline]
    pub fn parity(&self) -> bool {
        self.parity
    }

    #[inline]
    pub fn pending_next(&self) -> Option<CellState> {
        self.pending_next
    }

    /// Overwrite the committed state and drop any leftover pending value.
    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.pending_next = None;
        self.state = state;
    }

    #[inline]
    pub(crate) fn set_pending_next(&mut self, next: CellState) {
        self.pending_next = Some(next);
    }

    /// Promote the pending value to the committed state.
    #[inline]
    pub(crate) fn commit(&mut self) {
        if let Some(next) = self.pending_next.take() {
            self.state = next;
        }
    }

    /// Read-only view handed to presentation collaborators.
    #[inline]
    pub fn view(&self) -> CellView {
        CellView {
            state: self.state,
            parity: self.parity,
        }
    }
}

/// Snapshot of a cell's externally visible attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    pub parity: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dead() {
        let cell = Cell::new(3, 4);
        assert_eq!(cell.state(), CellState::Dead);
        assert_eq!(cell.pending_next(), None);
    }

    #[test]
    fn test_parity_checkerboard() {
        assert!(!Cell::new(0, 0).parity());
        assert!(Cell::new(0, 1).parity());
        assert!(Cell::new(1, 0).parity());
        assert!(!Cell::new(1, 1).parity());
        assert!(Cell::new(4, 7).parity());
    }

    #[test]
    fn test_set_state_clears_pending() {
        let mut cell = Cell::new(0, 0);
        cell.set_pending_next(CellState::Alive);
        cell.set_state(CellState::Dead);
        assert_eq!(cell.pending_next(), None);

        // A later commit must not resurrect the discarded value
        cell.commit();
        assert_eq!(cell.state(), CellState::Dead);
    }

    #[test]
    fn test_commit_consumes_pending() {
        let mut cell = Cell::new(0, 0);
        cell.set_pending_next(CellState::Alive);
        cell.commit();
        assert!(cell.is_alive());
        assert_eq!(cell.pending_next(), None);
    }

    #[test]
    fn test_view() {
        let mut cell = Cell::new(1, 2);
        cell.set_state(CellState::Alive);
        assert_eq!(
            cell.view(),
            CellView {
                state: CellState::Alive,
                parity: true,
            }
        );
    }
}
