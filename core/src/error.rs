use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least one cell wide and tall")]
    EmptyArea,
    #[error("At least one bomb is required")]
    NoBombs,
    #[error("Too many bombs, requested {bombs} but only {cells} cells available")]
    TooManyBombs { bombs: CellCount, cells: CellCount },
    #[error("Bomb layout has {actual} distinct bombs, expected {expected}")]
    BombCountMismatch { expected: CellCount, actual: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
