use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Decides win or loss once per session generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStateEvaluator {
    outcome: GameOutcome,
}

impl GameStateEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn reset(&mut self) {
        self.outcome = GameOutcome::Playing;
    }

    /// Any open bomb loses.
    pub fn is_lost(board: &Board) -> bool {
        board
            .iter()
            .any(|(_, cell)| cell.value.is_bomb() && cell.is_open)
    }

    /// Every safe cell open and every bomb closed.
    pub fn is_won(board: &Board) -> bool {
        board
            .iter()
            .all(|(_, cell)| cell.value.is_bomb() != cell.is_open)
    }

    /// Loss is checked before win. Returns the outcome only when it is newly reached.
    pub fn evaluate(&mut self, board: &Board) -> Option<GameOutcome> {
        if self.outcome.is_finished() {
            return None;
        }

        self.outcome = if Self::is_lost(board) {
            GameOutcome::Lost
        } else if Self::is_won(board) {
            GameOutcome::Won
        } else {
            return None;
        };
        Some(self.outcome)
    }
}
