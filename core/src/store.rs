use crate::*;

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Sole owner of the mutable board of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct CellStore {
    board: Board,
}

impl CellStore {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords).copied()
    }

    /// Opens a closed, unflagged cell. Returns the opened cell when the state changed.
    pub fn open(&mut self, coords: Coord2) -> Option<Cell> {
        let cell = self.board.get_mut(coords)?;
        if cell.is_open || cell.is_flagged {
            return None;
        }
        cell.is_open = true;
        Some(*cell)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        match self.board.get_mut(coords) {
            Some(cell) if !cell.is_open => {
                cell.is_flagged = !cell.is_flagged;
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    /// Places a flag without toggling; used for the end-of-game bomb markers.
    pub fn set_flag(&mut self, coords: Coord2) -> MarkOutcome {
        match self.board.get_mut(coords) {
            Some(cell) if !cell.is_open && !cell.is_flagged => {
                cell.is_flagged = true;
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    pub fn snapshot(&self) -> &Board {
        &self.board
    }
}
