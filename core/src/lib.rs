use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use input::*;
pub use reveal::*;
pub use scheduler::*;
pub use session::*;
pub use store::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod evaluator;
mod generator;
mod input;
mod reveal;
mod scheduler;
mod session;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, bombs: CellCount) -> Self {
        Self { size, bombs }
    }

    /// Validated constructor, at least one cell must stay free of bombs.
    pub fn new(size: Coord2, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, bombs);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let cells = self.total_cells();
        if cells == 0 {
            Err(GameError::EmptyArea)
        } else if self.bombs == 0 {
            Err(GameError::NoBombs)
        } else if self.bombs >= cells {
            Err(GameError::TooManyBombs {
                bombs: self.bombs,
                cells,
            })
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.bombs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Level::default().config()
    }
}

/// Difficulty presets offered to players.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Relax,
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Relax, Level::Easy, Level::Medium, Level::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Relax => GameConfig::new_unchecked((10, 10), 7),
            Self::Easy => GameConfig::new_unchecked((10, 10), 10),
            Self::Medium => GameConfig::new_unchecked((20, 20), 50),
            Self::Hard => GameConfig::new_unchecked((40, 20), 100),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Relax => "relax",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Durations driving input disambiguation and animation pacing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Hold time that turns a press into a flag toggle.
    pub press_ms: Millis,
    /// Pause between two cascade layers.
    pub open_delay_ms: Millis,
    /// Pause between game end and the callbacks.
    pub settle_ms: Millis,
}

impl Timings {
    pub const DEFAULT: Self = Self {
        press_ms: 500,
        open_delay_ms: 50,
        settle_ms: 1000,
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
